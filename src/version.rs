// NFS Protocol Version
//
// Maps how the protocol version is written in the mount options of an fstab
// entry (nfsvers=/vers=) to the version presented to the user.

use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// Version of the NFS protocol configured for a mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NfsVersion {
    /// No explicit version, the highest one available is negotiated
    #[default]
    Any,
    V3,
    V4,
    /// pNFS
    V4_1,
    V4_2,
}

const ALL: [NfsVersion; 5] = [
    NfsVersion::Any,
    NfsVersion::V3,
    NfsVersion::V4,
    NfsVersion::V4_1,
    NfsVersion::V4_2,
];

impl NfsVersion {
    /// Sorted list of all possible settings
    pub fn all() -> &'static [NfsVersion] {
        &ALL
    }

    /// Version for a value of the `nfsvers`/`vers` mount option.
    ///
    /// `None` means the option is absent. `"4.0"` is an alias of `"4"`.
    pub fn for_mntops_value(value: Option<&str>) -> Result<Self, VersionError> {
        let value = match value {
            Some("4.0") => Some("4"),
            other => other,
        };

        ALL.iter()
            .copied()
            .find(|version| version.mntops_value() == value)
            .ok_or_else(|| VersionError::Unknown(value.unwrap_or_default().to_string()))
    }

    /// Value used in the `nfsvers`/`vers` mount option, `None` for [`NfsVersion::Any`]
    pub fn mntops_value(&self) -> Option<&'static str> {
        match self {
            NfsVersion::Any => None,
            NfsVersion::V3 => Some("3"),
            NfsVersion::V4 => Some("4"),
            NfsVersion::V4_1 => Some("4.1"),
            NfsVersion::V4_2 => Some("4.2"),
        }
    }

    /// Short label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            NfsVersion::Any => "Any",
            NfsVersion::V3 => "NFSv3",
            NfsVersion::V4 => "NFSv4",
            NfsVersion::V4_1 => "NFSv4.1",
            NfsVersion::V4_2 => "NFSv4.2",
        }
    }

    /// Longer description for a selection list
    pub fn widget_text(&self) -> &'static str {
        match self {
            NfsVersion::Any => "Any (Highest Available)",
            NfsVersion::V3 => "Force NFSv3",
            NfsVersion::V4 => "Force NFSv4",
            NfsVersion::V4_1 => "Force pNFS (v4.1)",
            NfsVersion::V4_2 => "Force NFSv4.2",
        }
    }

    /// Whether the client-side NFSv4 infrastructure is needed to use this version
    pub fn requires_v4(&self) -> bool {
        self.mntops_value().is_some_and(|value| value.starts_with('4'))
    }

    /// Whether shares of this version are found with the NFSv4 browsing mechanism.
    ///
    /// Scanning a server for v3 exports and for v4 pseudo-filesystems are
    /// completely different operations.
    pub fn browse_with_v4(&self) -> bool {
        self.requires_v4()
    }
}

impl fmt::Display for NfsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses user input: `any` or a mount-option value such as `4.1`
impl FromStr for NfsVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("any") {
            return Ok(NfsVersion::Any);
        }
        NfsVersion::for_mntops_value(Some(s))
    }
}
