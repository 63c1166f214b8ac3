use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, error, warn};

use super::TokenStore;
use crate::models::TokenPair;

/// Persists the token pair as a small JSON document:
/// `{"access_token": "...", "refresh_token": "..."}`.
///
/// Nothing is cached: `get` reads the file every time, and `save`/`clear`
/// hit the disk before returning. Writes go to a sibling temp file that is
/// then renamed over the target, so a reader never sees one new token next
/// to one old token.
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: &Path) -> Self {
        FileTokenStore {
            path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<TokenPair> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TokenPair::default()),
            Err(e) => return Err(e),
        };
        if raw.trim().is_empty() {
            return Ok(TokenPair::default());
        }
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write(&self, pair: &TokenPair) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = open_private(&tmp)?;
            let body = serde_json::to_vec_pretty(pair)?;
            file.write_all(&body)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)
    }

    fn persist(&self, pair: &TokenPair, op: &str) {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match self.write(pair) {
            Ok(()) => debug!(
                event_name = "store.file.write",
                event_domain = "store",
                op,
                path = %self.path.display(),
                "token file updated"
            ),
            Err(e) => error!(
                event_name = "store.file.write_failed",
                event_domain = "store",
                op,
                path = %self.path.display(),
                "failed to write token file: {}",
                e
            ),
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> TokenPair {
        match self.read() {
            Ok(pair) => pair,
            Err(e) => {
                warn!(
                    event_name = "store.file.read_failed",
                    event_domain = "store",
                    path = %self.path.display(),
                    "treating token file as empty: {}",
                    e
                );
                TokenPair::default()
            }
        }
    }

    fn save(&self, access_token: &str, refresh_token: &str) {
        self.persist(&TokenPair::new(access_token, refresh_token), "save");
    }

    fn clear(&self) {
        self.persist(&TokenPair::default(), "clear");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ACCESS_TOKEN, REFRESH_TOKEN};

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(&dir.path().join("nope.json"));
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_save_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens.json");

        FileTokenStore::new(&path).save("access-1", "refresh-1");

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(), TokenPair::new("access-1", "refresh-1"));

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[ACCESS_TOKEN], "access-1");
        assert_eq!(value[REFRESH_TOKEN], "refresh-1");
    }

    #[test]
    fn test_clear_empties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);
        store.save("a", "r");
        store.clear();
        assert!(store.get().is_empty());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "{not json").unwrap();
        let store = FileTokenStore::new(&path);
        assert!(store.get().is_empty());

        store.save("a", "r");
        assert_eq!(store.get(), TokenPair::new("a", "r"));
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        FileTokenStore::new(&path).save("a", "r");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
