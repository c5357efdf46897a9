use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;

/// Resolve recorded package manager output into per-project dependency trees
#[derive(Parser, Debug)]
#[command(name = "deptree")]
#[command(version)]
#[command(
    about = "Resolve recorded package manager output into per-project dependency trees",
    long_about = None
)]
pub struct Args {
    /// Recording files, one per package manager run
    #[arg(required = true, value_name = "RECORDING")]
    pub recordings: Vec<PathBuf>,

    /// Output format: json or yaml [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exclude scopes matching patterns (supports wildcards: *), optionally
    /// with a reason: -x "test*=TEST_DEPENDENCY_OF" -x "devDependencies"
    #[arg(short = 'x', long = "exclude-scope", value_name = "PATTERN[=REASON]")]
    pub exclude_scopes: Vec<String>,

    /// Path to a config file (defaults to deptree.config.yml in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Zero issue timestamps and sort project issues so results can be diffed
    #[arg(long)]
    pub canonical: bool,

    /// Exit with code 1 if the result contains error-severity issues
    #[arg(long)]
    pub fail_on_issues: bool,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["deptree", "gradle.json"]).unwrap();
        assert_eq!(args.recordings, vec![PathBuf::from("gradle.json")]);
        assert!(args.format.is_none());
        assert!(args.exclude_scopes.is_empty());
        assert!(!args.canonical);
        assert!(!args.fail_on_issues);
    }

    #[test]
    fn test_parse_all_options() {
        let args = Args::try_parse_from([
            "deptree",
            "-f",
            "yaml",
            "-o",
            "out.yml",
            "-x",
            "test*",
            "--exclude-scope",
            "docs",
            "-c",
            "custom.yml",
            "--canonical",
            "--fail-on-issues",
            "-v",
            "npm.json",
            "gradle.json",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Yaml));
        assert_eq!(args.output, Some(PathBuf::from("out.yml")));
        assert_eq!(args.exclude_scopes, vec!["test*".to_string(), "docs".to_string()]);
        assert_eq!(args.config, Some(PathBuf::from("custom.yml")));
        assert!(args.canonical);
        assert!(args.fail_on_issues);
        assert!(args.verbose);
        assert_eq!(args.recordings.len(), 2);
    }

    #[test]
    fn test_recording_is_required() {
        assert!(Args::try_parse_from(["deptree"]).is_err());
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let err = Args::try_parse_from(["deptree", "-f", "markdown", "npm.json"]).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }
}
