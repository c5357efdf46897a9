/// Replay adapter: package managers backed by recorded output
mod replay_manager;

pub use replay_manager::ReplayManager;
