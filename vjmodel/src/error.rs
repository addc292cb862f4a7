use strum::EnumIs;
use thiserror::Error;

#[derive(Debug, EnumIs, Error)]
pub enum VjError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    /// The declaration selected for generation is unknown to the reflection source.
    #[error(
        "The declaration `{0}` selected for generation was not found by the reflection source."
    )]
    UnknownTarget(String),

    /// The build finished but recorded error diagnostics, so its model must not be rendered.
    #[error(
        "The model of `{clazz}` cannot be rendered: {count} error diagnostic(s) were recorded while building it."
    )]
    ErrorsReported { clazz: String, count: usize },
}

pub type VjResult<T> = Result<T, VjError>;
