use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use tracing::warn;

use crate::domain::{BearerToken, TokenStorage};

/// Token storage as a single plain-text file.
///
/// The CLI's client-local storage entry. IO failures are logged and treated
/// as an absent or unwritable entry; they never abort the session flow that
/// triggered them.
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_token(&self, token: &BearerToken) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token.as_str())
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Option<BearerToken> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(BearerToken::new(trimmed))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read token file");
                None
            }
        }
    }

    fn store(&self, token: &BearerToken) {
        if let Err(e) = self.write_token(token) {
            warn!(path = %self.path.display(), error = %e, "Could not write token file");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not delete token file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_token_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("roster-client-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let storage = FileTokenStorage::new(temp_token_path("missing"));
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_store_then_load() {
        let path = temp_token_path("roundtrip");
        let storage = FileTokenStorage::new(&path);

        storage.store(&BearerToken::new("tok-123"));
        assert_eq!(storage.load(), Some(BearerToken::new("tok-123")));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_clear_removes_file() {
        let storage = FileTokenStorage::new(temp_token_path("clear"));

        storage.store(&BearerToken::new("tok"));
        storage.clear();
        assert_eq!(storage.load(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_clear_missing_file_is_quiet() {
        let storage = FileTokenStorage::new(temp_token_path("never-written"));
        storage.clear();
    }

    #[test]
    fn test_whitespace_only_file_is_none() {
        let storage = FileTokenStorage::new(temp_token_path("blank"));
        fs::write(storage.path(), "  \n").unwrap();

        assert_eq!(storage.load(), None);

        let _ = fs::remove_file(storage.path());
    }

    #[test]
    fn test_store_creates_parent_directory() {
        let dir = temp_token_path("nested-dir");
        let path = dir.join("token");
        let storage = FileTokenStorage::new(&path);

        storage.store(&BearerToken::new("tok"));
        assert_eq!(storage.load(), Some(BearerToken::new("tok")));

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(dir);
    }
}
