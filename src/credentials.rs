// Credential store: a single API key kept in a plain-text file under the
// user's home directory. The key is validated by the caller before `save`.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HvzError, Result};

const KEY_FILE_NAME: &str = ".hvz.api";

/// An API key with surrounding whitespace removed. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trim `raw`; returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ApiKey(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys end up in tracing output through `?` formatting; keep them out.
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Reads and writes the key file at a fixed path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    /// `~/.hvz.api`, falling back to the working directory when no home
    /// directory can be determined.
    pub fn default_path() -> PathBuf {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(KEY_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored key. A missing file or a file holding only
    /// whitespace is reported as `MissingCredential`.
    pub fn load(&self) -> Result<ApiKey> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(HvzError::MissingCredential(self.path.clone()));
            }
            Err(source) => {
                return Err(HvzError::Credential {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        ApiKey::parse(&data).ok_or_else(|| HvzError::MissingCredential(self.path.clone()))
    }

    /// Replace the stored key. The key is written to a sibling temp file
    /// first and renamed over the old one so a crash never leaves a
    /// half-written key behind.
    pub fn save(&self, key: &ApiKey) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let io_err = |source| HvzError::Credential {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, key.as_str()).map_err(io_err)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            // The temp file holds the key; don't leave it behind.
            let _ = fs::remove_file(&tmp);
            return Err(io_err(err));
        }
        debug!(path = %self.path.display(), "stored API key");
        Ok(())
    }
}
