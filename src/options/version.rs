// NFS Version in Mount Options
//
// Reads and rewrites the protocol version carried by the nfsvers=/vers=
// options. The older `minorversion=` encoding is only detected, never used
// to compute the version.

use tracing::debug;

use crate::error::VersionError;
use crate::version::NfsVersion;

use super::token::{MountOptionToken, MountOptions};

/// Option used when a version has to be added
pub const NFSVERS: &str = "nfsvers";
pub const VERS: &str = "vers";
/// Legacy option for selecting NFSv4.1
pub const MINORVERSION: &str = "minorversion";

fn is_version_token(token: &MountOptionToken) -> bool {
    token.has_key(NFSVERS) || token.has_key(VERS)
}

/// Index of the version option that mount(8) honors: the last one
fn effective_version_index(options: &MountOptions) -> Option<usize> {
    options.tokens().iter().rposition(is_version_token)
}

fn version_at(options: &MountOptions, index: Option<usize>) -> Result<NfsVersion, VersionError> {
    match index {
        None => Ok(NfsVersion::Any),
        // A bare `vers` is reported as an unknown (empty) value
        Some(i) => {
            let value = options.tokens()[i].value.as_deref().unwrap_or_default();
            NfsVersion::for_mntops_value(Some(value))
        }
    }
}

/// Version of the NFS protocol set by an option string.
///
/// Among `nfsvers`/`vers` the last one wins; with none of them the version is
/// [`NfsVersion::Any`].
pub fn version_of(options: &str) -> Result<NfsVersion, VersionError> {
    let options = MountOptions::parse(options);
    version_at(&options, effective_version_index(&options))
}

/// Whether the options use `minorversion`, which no longer works the way it used to
pub fn is_legacy(options: &str) -> bool {
    MountOptions::parse(options)
        .tokens()
        .iter()
        .any(|token| token.has_key(MINORVERSION))
}

/// Rewrite an option string so it selects the given version.
///
/// Any `minorversion` option is dropped. An existing version option keeps its
/// position and spelling; otherwise `nfsvers=` is appended.
pub fn with_version(options: &str, version: NfsVersion) -> Result<String, VersionError> {
    let mut parsed = MountOptions::parse(options);
    parsed.retain(|token| !token.has_key(MINORVERSION));

    let keep = effective_version_index(&parsed);
    // Fails before anything is rewritten
    version_at(&parsed, keep)?;

    let keep = keep.filter(|_| version != NfsVersion::Any);

    let mut rewritten: MountOptions = parsed
        .tokens()
        .iter()
        .enumerate()
        .filter(|(i, token)| Some(*i) == keep || !is_version_token(token))
        .map(|(_, token)| token.clone())
        .collect();

    // Only empty fragments left (",vers=3" without its version): nothing to keep
    if rewritten.tokens().iter().all(MountOptionToken::is_empty_fragment) {
        rewritten = MountOptions::default();
    }

    if let Some(value) = version.mntops_value() {
        match rewritten.tokens_mut().iter_mut().find(|t| is_version_token(t)) {
            Some(token) => token.value = Some(value.to_string()),
            None => rewritten.push(MountOptionToken::new(NFSVERS, Some(value.to_string()))),
        }
    }

    let rewritten = rewritten.serialize();
    debug!(
        "Rewrote NFS options for {}: '{}' -> '{}'",
        version, options, rewritten
    );
    Ok(rewritten)
}

/// Whether the options select NFSv4.1
pub fn is_nfs41(options: &str) -> Result<bool, VersionError> {
    Ok(version_of(options)? == NfsVersion::V4_1)
}

/// Select NFSv4.1, or any version when `nfs41` is false
pub fn set_nfs41(options: &str, nfs41: bool) -> Result<String, VersionError> {
    let version = if nfs41 {
        NfsVersion::V4_1
    } else {
        NfsVersion::Any
    };
    with_version(options, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_of() {
        assert_eq!(version_of("defaults"), Ok(NfsVersion::Any));
        assert_eq!(version_of(""), Ok(NfsVersion::Any));
        assert_eq!(version_of("ro,sync"), Ok(NfsVersion::Any));
        assert_eq!(version_of("vers=3"), Ok(NfsVersion::V3));
        assert_eq!(version_of("ro,nfsvers=4.0"), Ok(NfsVersion::V4));
        assert_eq!(version_of("nfsvers=4.1,ro"), Ok(NfsVersion::V4_1));
        assert_eq!(version_of("vers=4.2"), Ok(NfsVersion::V4_2));
    }

    #[test]
    fn test_version_of_last_wins() {
        assert_eq!(
            version_of("nfsvers=4,minorversion=1,vers=3"),
            Ok(NfsVersion::V3)
        );
        assert_eq!(version_of("vers=3,nfsvers=4.1"), Ok(NfsVersion::V4_1));
    }

    #[test]
    fn test_version_of_ignores_minorversion() {
        assert_eq!(version_of("minorversion=1"), Ok(NfsVersion::Any));
        assert_eq!(version_of("nfsvers=4,minorversion=1"), Ok(NfsVersion::V4));
        assert_eq!(version_of("subvers=4"), Ok(NfsVersion::Any));
    }

    #[test]
    fn test_version_of_unknown_value() {
        assert_eq!(
            version_of("nfsvers=4.5"),
            Err(VersionError::Unknown("4.5".to_string()))
        );
        assert_eq!(
            version_of("vers=5,ro"),
            Err(VersionError::Unknown("5".to_string()))
        );
        assert_eq!(version_of("vers"), Err(VersionError::Unknown(String::new())));
        // Only the effective option is looked at
        assert_eq!(version_of("vers=5,vers=3"), Ok(NfsVersion::V3));
    }

    #[test]
    fn test_is_legacy() {
        assert!(is_legacy("minorversion=1"));
        assert!(is_legacy("ro,minorversion=0,sync"));
        assert!(is_legacy("minorversion"));
        assert!(!is_legacy("ro,nfsvers=4.1"));
        assert!(!is_legacy("subminorversion=1"));
        assert!(!is_legacy("defaults"));
    }

    #[test]
    fn test_with_version_examples() {
        assert_eq!(
            with_version("minorversion=1", NfsVersion::Any).as_deref(),
            Ok("defaults")
        );
        assert_eq!(
            with_version("vers=3,ro", NfsVersion::V4).as_deref(),
            Ok("vers=4,ro")
        );
        assert_eq!(
            with_version("defaults", NfsVersion::V4_1).as_deref(),
            Ok("nfsvers=4.1")
        );
        assert_eq!(with_version("", NfsVersion::V3).as_deref(), Ok("nfsvers=3"));
    }

    #[test]
    fn test_with_version_keeps_last_version_option() {
        assert_eq!(
            with_version("nfsvers=4,ro,vers=3,sync", NfsVersion::V4_2).as_deref(),
            Ok("ro,vers=4.2,sync")
        );
        assert_eq!(
            with_version("nfsvers=4,minorversion=1,vers=3", NfsVersion::V3).as_deref(),
            Ok("vers=3")
        );
    }

    #[test]
    fn test_with_version_any_removes_all() {
        assert_eq!(
            with_version("nfsvers=4,ro,vers=3,minorversion=1", NfsVersion::Any).as_deref(),
            Ok("ro")
        );
        assert_eq!(
            with_version("ro,sync", NfsVersion::Any).as_deref(),
            Ok("ro,sync")
        );
    }

    #[test]
    fn test_with_version_never_yields_empty_string() {
        for input in [",vers=3", ",minorversion=1", "nfsvers=4,"] {
            let once = with_version(input, NfsVersion::Any).expect("known versions");
            assert_eq!(once, "defaults", "input {input:?}");
            assert_eq!(
                crate::options::validate(&once),
                Ok(()),
                "input {input:?}"
            );
        }
        assert_eq!(
            with_version(",minorversion=1", NfsVersion::V4).as_deref(),
            Ok("nfsvers=4")
        );
        // Empty fragments next to real options are left for validation to report
        assert_eq!(
            with_version("ro,,vers=3", NfsVersion::Any).as_deref(),
            Ok("ro,")
        );
    }

    #[test]
    fn test_with_version_appends_nfsvers() {
        assert_eq!(
            with_version("ro,minorversion=1,sync", NfsVersion::V4).as_deref(),
            Ok("ro,sync,nfsvers=4")
        );
    }

    #[test]
    fn test_with_version_unknown_value() {
        assert_eq!(
            with_version("vers=7,ro", NfsVersion::V4),
            Err(VersionError::Unknown("7".to_string()))
        );
        assert_eq!(
            with_version("vers=7,ro", NfsVersion::Any),
            Err(VersionError::Unknown("7".to_string()))
        );
    }

    #[test]
    fn test_with_version_round_trip_and_idempotence() {
        let inputs = [
            "defaults",
            "",
            "ro",
            "minorversion=1",
            "vers=3,ro",
            "nfsvers=4,minorversion=1,vers=3",
            "rw,nfsvers=4.0,minorversion=0,hard",
            "_netdev,vers=4.2,vers=4.1",
            ",vers=3",
            ",minorversion=1",
            "minorversion=1,",
            ",,",
            "ro,,vers=4",
        ];
        for input in inputs {
            for version in NfsVersion::all() {
                let once = with_version(input, *version).expect("known versions");
                assert_eq!(version_of(&once), Ok(*version), "{input:?} -> {version}");
                assert!(!is_legacy(&once), "{input:?} -> {once:?}");

                let twice = with_version(&once, *version).expect("known versions");
                assert_eq!(twice, once, "{input:?} -> {version}");
            }
        }
    }

    #[test]
    fn test_nfs41_wrappers() {
        assert_eq!(is_nfs41("nfsvers=4.1"), Ok(true));
        assert_eq!(is_nfs41("vers=4.1,vers=4"), Ok(false));
        // minorversion does not count any more
        assert_eq!(is_nfs41("minorversion=1"), Ok(false));

        assert_eq!(set_nfs41("ro,sync", true).as_deref(), Ok("ro,sync,nfsvers=4.1"));
        assert_eq!(set_nfs41("ro,vers=4.1,sync", false).as_deref(), Ok("ro,sync"));
        assert_eq!(set_nfs41("minorversion=1", true).as_deref(), Ok("nfsvers=4.1"));
        assert_eq!(set_nfs41("defaults", false).as_deref(), Ok("defaults"));
    }
}
