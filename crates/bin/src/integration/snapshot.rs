//! Location of the company directory snapshot.
//!
//! The snapshot is OpenDART's `CORPCODE.xml`, extracted by the user. It lives
//! in a platform-specific cache directory unless a path is given.

use quarterly::data::DataError;
use quarterly::data::directory::CompanyDirectory;
use std::path::{Path, PathBuf};

/// Snapshot file name as distributed by OpenDART.
const SNAPSHOT_FILE: &str = "CORPCODE.xml";

/// Get the default snapshot directory.
///
/// Uses platform-specific cache directories:
/// - Linux: `~/.cache/quarterly/`
/// - macOS: `~/Library/Caches/quarterly/`
/// - Windows: `%LOCALAPPDATA%\quarterly\`
pub(crate) fn default_snapshot_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quarterly")
}

/// The configured snapshot path, or the default one.
pub(crate) fn snapshot_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| default_snapshot_dir().join(SNAPSHOT_FILE), Path::to_path_buf)
}

/// Load the directory, or `None` when no snapshot exists.
pub(crate) fn open_directory(path: &Path) -> Result<Option<CompanyDirectory>, DataError> {
    let directory = CompanyDirectory::load_if_present(path)?;
    match &directory {
        Some(d) => tracing::debug!(path = %path.display(), companies = d.len(), "directory loaded"),
        None => tracing::debug!(path = %path.display(), "no directory snapshot"),
    }
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_path() {
        let explicit = Path::new("/tmp/corp.xml");
        assert_eq!(snapshot_path(Some(explicit)), explicit);

        let default = snapshot_path(None);
        assert!(default.ends_with("quarterly/CORPCODE.xml"));
    }

    #[test]
    fn test_missing_snapshot() {
        let directory = open_directory(Path::new("/nonexistent/CORPCODE.xml")).unwrap();
        assert!(directory.is_none());
    }
}
