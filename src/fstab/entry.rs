// fstab Entries
//
// One line of /etc/fstab: spec, mount point, type, options, dump and pass.

use std::fmt;
use std::str::FromStr;

use crate::error::{FstabError, VersionError};
use crate::options;
use crate::version::NfsVersion;

/// Suffix of the version label of entries that use a legacy version encoding
const PLEASE_CHECK: &str = " (Please Check)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FstabEntry {
    /// Remote share, `server:/path`
    pub spec: String,
    /// Mount point
    pub file: String,
    pub vfstype: String,
    pub mntops: String,
    pub freq: u32,
    pub passno: u32,
}

impl FstabEntry {
    pub fn new(
        spec: impl Into<String>,
        file: impl Into<String>,
        vfstype: impl Into<String>,
        mntops: impl Into<String>,
    ) -> Self {
        Self {
            spec: spec.into(),
            file: file.into(),
            vfstype: vfstype.into(),
            mntops: mntops.into(),
            freq: 0,
            passno: 0,
        }
    }

    pub fn is_nfs(&self) -> bool {
        self.vfstype == "nfs" || self.vfstype == "nfs4"
    }

    /// Split the spec into server and remote path.
    ///
    /// The split happens at the first `:/`, so IPv6 addresses keep their
    /// colons. `server:` alone is a server without a path and anything else
    /// is a path without a server.
    pub fn server_and_path(&self) -> (&str, &str) {
        let spec = self.spec.as_str();

        if let Some(pos) = spec.find(":/") {
            return (&spec[..pos], &spec[pos + 1..]);
        }

        match spec.strip_suffix(':') {
            Some(server)
                if server
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c)) =>
            {
                (server, "")
            }
            _ => ("", spec),
        }
    }

    /// Whether the entry selects its version in a way that no longer works as
    /// it used to: `nfs4` as type or `minorversion` in the options
    pub fn is_legacy(&self) -> bool {
        self.vfstype == "nfs4" || options::is_legacy(&self.mntops)
    }

    pub fn version(&self) -> Result<NfsVersion, VersionError> {
        options::version_of(&self.mntops)
    }

    /// Version label for listings, flagged when the entry is legacy
    pub fn version_label(&self) -> Result<String, VersionError> {
        let label = self.version()?.label();
        if self.is_legacy() {
            Ok(format!("{label}{PLEASE_CHECK}"))
        } else {
            Ok(label.to_string())
        }
    }

    /// Switch the entry to the given version
    pub fn set_version(&mut self, version: NfsVersion) -> Result<(), VersionError> {
        self.mntops = options::with_version(&self.mntops, version)?;
        Ok(())
    }
}

impl FromStr for FstabEntry {
    type Err = FstabError;

    /// Parse a non-comment line. `freq` and `passno` are optional.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<String> = line.split_whitespace().map(unescape).collect();

        let [spec, file, vfstype, mntops, rest @ ..] = fields.as_slice() else {
            return Err(FstabError::Malformed(line.to_string()));
        };
        if rest.len() > 2 {
            return Err(FstabError::Malformed(line.to_string()));
        }

        let number = |field: Option<&String>| -> Result<u32, FstabError> {
            field.map_or(Ok(0), |value| {
                value
                    .parse()
                    .map_err(|_| FstabError::Malformed(line.to_string()))
            })
        };

        Ok(Self {
            spec: spec.clone(),
            file: file.clone(),
            vfstype: vfstype.clone(),
            mntops: mntops.clone(),
            freq: number(rest.first())?,
            passno: number(rest.get(1))?,
        })
    }
}

impl fmt::Display for FstabEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            escape(&self.spec),
            escape(&self.file),
            escape(&self.vfstype),
            escape(&self.mntops),
            self.freq,
            self.passno
        )
    }
}

/// Decode the octal escapes of fstab(5), such as `\040` for a space
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 4 <= bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let code = digits
                    .iter()
                    .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                if let Ok(byte) = u8::try_from(code) {
                    out.push(byte);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            ' ' => out.push_str("\\040"),
            '\t' => out.push_str("\\011"),
            '\n' => out.push_str("\\012"),
            '\\' => out.push_str("\\134"),
            '#' => out.push_str("\\043"),
            _ => out.push(c),
        }
    }
    out
}
