// NFS Mount Options
//
// Parsing, validation and version handling for the fourth field of an NFS
// fstab entry. Everything here is pure: plain strings in, plain values out.

pub mod catalog;
pub mod token;
pub mod validate;
pub mod version;

pub use catalog::{TokenClass, classify};
pub use token::{DEFAULTS, MountOptionToken, MountOptions};
pub use validate::{validate, validation_message};
pub use version::{is_legacy, is_nfs41, set_nfs41, version_of, with_version};
