// Option Catalog
//
// Classification tables for the mount options accepted in an NFS fstab entry.
// Sources of truth, which have to be followed by hand:
// - util-linux, mount(8) and libmount/src/optmap.c
// - nfs-utils, nfs(5) and utils/mount/nfsmount.c
// - kernel, fs/nfs/fs_context.c
//
// `minorversion` is known to the kernel but is not listed here: it is only
// looked at to detect the legacy way of selecting NFSv4.1.

/// Flags that also have a negated form with a `no` prefix (`ac` / `noac`)
pub const NEGATABLE: &[&str] = &[
    "ac",
    "acl",
    "atime",
    "auto",
    "bg",
    "cto",
    "dev",
    "diratime",
    "exec",
    "fg",
    "fsc",
    "group",
    "hard",
    "intr",
    "iversion",
    "lock",
    "mand",
    "owner",
    "posix",
    "rdirplus",
    "relatime",
    "resvport",
    "sharecache",
    "soft",
    "strictatime",
    "suid",
    "tcp",
    "udp",
    "user",
    "users",
];

/// Flags without a negated counterpart
pub const SIMPLE: &[&str] = &[
    "_netdev",
    "async",
    "bind",
    "defaults",
    "dirsync",
    "loud",
    "nofail",
    "rbind",
    "remount",
    "ro",
    "rw",
    "silent",
    "sync",
    "x-systemd.automount",
    "x-systemd.growfs",
    "x-systemd.makefs",
    "x-systemd.rw-only",
];

/// Options that must be given as `key=value`
pub const VALUED: &[&str] = &[
    "acdirmax",
    "acdirmin",
    "acregmax",
    "acregmin",
    "actimeo",
    "bsize",
    "clientaddr",
    "comment",
    "context",
    "defcontext",
    "fscontext",
    "local_lock",
    "lookupcache",
    "mounthost",
    "mountport",
    "mountproto",
    "mountprog",
    "mountvers",
    "namlen",
    "nconnect",
    "nfsprog",
    "nfsvers",
    "port",
    "proto",
    "retrans",
    "retry",
    "rootcontext",
    "rsize",
    "sec",
    "timeo",
    "vers",
    "wsize",
    "x-systemd.after",
    "x-systemd.before",
    "x-systemd.device-timeout",
    "x-systemd.idle-timeout",
    "x-systemd.mount-timeout",
    "x-systemd.required-by",
    "x-systemd.requires",
    "x-systemd.requires-mounts-for",
    "x-systemd.wanted-by",
];

/// Prefix that turns a negatable flag into its negated form
pub const NEGATION_PREFIX: &str = "no";

/// What kind of option a key names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A negatable flag in its base form (`ac`)
    Negatable,
    /// A negatable flag in its `no` form (`noac`)
    Negated,
    Simple,
    Valued,
    Unknown,
}

impl TokenClass {
    /// Whether options of this class are given without a value
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            TokenClass::Negatable | TokenClass::Negated | TokenClass::Simple
        )
    }
}

/// Classify an option by its key. Comparison is byte for byte.
pub fn classify(key: &str) -> TokenClass {
    if NEGATABLE.contains(&key) {
        TokenClass::Negatable
    } else if key
        .strip_prefix(NEGATION_PREFIX)
        .is_some_and(|base| NEGATABLE.contains(&base))
    {
        TokenClass::Negated
    } else if SIMPLE.contains(&key) {
        TokenClass::Simple
    } else if VALUED.contains(&key) {
        TokenClass::Valued
    } else {
        TokenClass::Unknown
    }
}
