//! Error types for mount-option handling.

use std::path::PathBuf;

use thiserror::Error;

/// Why a mount-option string was rejected.
///
/// The `Display` form is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Empty option strings are not allowed.")]
    EmptyOptions,

    /// A flag-only option was given a value
    #[error("Unexpected value '{value}' for option '{key}'")]
    UnexpectedValue { key: String, value: String },

    #[error("Unknown option: '{key}'")]
    UnknownOption { key: String },

    /// The value of a valued option contains another `=`
    #[error("Invalid option: '{option}'")]
    InvalidOption { option: String },

    #[error("Empty value for option: '{key}'")]
    EmptyValue { key: String },
}

/// A `nfsvers`/`vers` value outside the known set of versions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Unknown NFS version value '{0}'")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum FstabError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fstab entry: '{0}'")]
    Malformed(String),
}
