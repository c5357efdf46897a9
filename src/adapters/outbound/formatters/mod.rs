/// Formatter adapters for the supported output formats
mod json_formatter;
mod yaml_formatter;

pub use json_formatter::JsonFormatter;
pub use yaml_formatter::YamlFormatter;
