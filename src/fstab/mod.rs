// fstab Reading
//
// Loads the entries of an fstab file and answers the questions asked about
// the NFS ones as a whole.

mod entry;
mod order;

use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::FstabError;

pub use entry::FstabEntry;
pub use order::sort_by_mount_order;

/// Parse fstab contents. Comments and blank lines are ignored, malformed
/// lines are logged and skipped.
pub fn parse_fstab(contents: &str) -> Vec<FstabEntry> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            match line.parse::<FstabEntry>() {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping line {}: {}", index + 1, e);
                    None
                }
            }
        })
        .collect()
}

/// Read all entries of an fstab file
pub fn read_fstab(path: &Path) -> Result<Vec<FstabEntry>, FstabError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FstabError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_fstab(&contents);
    debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// NFS entries of an fstab file, in mount order
pub fn read_nfs_entries(path: &Path) -> Result<Vec<FstabEntry>, FstabError> {
    let nfs: Vec<FstabEntry> = read_fstab(path)?
        .into_iter()
        .filter(FstabEntry::is_nfs)
        .collect();
    Ok(sort_by_mount_order(&nfs))
}

/// Whether any of the entries needs the client-side NFSv4 support.
///
/// Entries with an unknown version are logged and do not count.
pub fn requires_nfs4(entries: &[FstabEntry]) -> bool {
    entries.iter().any(|entry| match entry.version() {
        Ok(version) => version.requires_v4(),
        Err(e) => {
            error!("Invalid version in entry for {}: {}", entry.file, e);
            false
        }
    })
}
