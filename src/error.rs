//! Error types for clipscan.

/// Result type alias for clipscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for clipscan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Command-line arguments are inconsistent.
    #[error("{message}")]
    InvalidArguments {
        /// Description of the conflict.
        message: String,
    },

    /// No timeline files found.
    #[error("no timeline XML files found in the provided paths")]
    NoValidInputFiles,

    /// Failed to read a timeline document.
    #[error("failed to read timeline document '{path}'")]
    DocumentRead {
        /// Path to the document.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Timeline document is not well-formed XML.
    #[error("failed to parse timeline document '{path}'")]
    DocumentParse {
        /// Path to the document.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: roxmltree::Error,
    },

    /// In-memory timeline text is not well-formed XML.
    #[error("malformed timeline XML")]
    Xml(#[from] roxmltree::Error),

    /// An operation received input it cannot classify.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// Export was requested but there is no extraction result to export.
    #[error("no extraction result to export: {reason}")]
    NoExtractionResult {
        /// Why the input is not an extraction result.
        reason: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a CSV table.
    #[error("failed to write CSV table '{path}'")]
    TableWrite {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: std::path::PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
