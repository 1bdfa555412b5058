//! Handling of NFS client mount options.
//!
//! Parses and validates the options of NFS entries in `/etc/fstab` and
//! reads or rewrites the NFS protocol version they select.

pub mod error;
pub mod fstab;
pub mod options;
pub mod version;

pub use error::{FstabError, OptionsError, VersionError};
pub use fstab::FstabEntry;
pub use options::MountOptions;
pub use version::NfsVersion;
