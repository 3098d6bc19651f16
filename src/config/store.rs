//! On-disk storage for credentials.
//!
//! Credentials live in a single JSON file inside a per-user directory
//! (`~/.goji/config.json`). Every save replaces the whole file, and the file
//! is only ever readable by its owner.

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{ConfigError, Credentials, Result};

/// Name of the configuration directory under the user's home.
const CONFIG_DIR_NAME: &str = ".goji";

/// Name of the credentials file.
const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the scratch file written before replacing the credentials file.
const TEMP_FILE_NAME: &str = "config.json.tmp";

/// Reads and writes the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Directory holding the credentials file.
    dir: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at `~/.goji`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::in_dir(home.join(CONFIG_DIR_NAME)))
    }

    /// Create a store rooted at an explicit directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configuration directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The credentials file path. Performs no I/O.
    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Resolve the credentials file path, creating its directory if needed.
    ///
    /// A newly created directory gets mode 0700 on unix; an existing one is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CreateDir` if the directory cannot be created.
    pub fn locate(&self) -> Result<PathBuf> {
        create_private_dir(&self.dir).map_err(|source| ConfigError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        Ok(self.path())
    }

    /// Write credentials, replacing any existing file.
    ///
    /// The record is written to a scratch file with mode 0600 and then renamed
    /// over the target, so the result is owner-only whatever the previous
    /// file's permissions were.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CreateDir` if the directory cannot be created and
    /// `ConfigError::Write` if the file cannot be written.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let path = self.locate()?;

        let mut data = serde_json::to_vec_pretty(credentials).map_err(ConfigError::Serialize)?;
        data.push(b'\n');

        let temp_path = self.dir.join(TEMP_FILE_NAME);
        let written = write_private(&temp_path, &data).and_then(|_| fs::rename(&temp_path, &path));

        if let Err(source) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(ConfigError::Write { path, source });
        }

        Ok(())
    }

    /// Read credentials from disk.
    ///
    /// Returns `Ok(None)` when no credentials file exists yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read and
    /// `ConfigError::Parse` if it does not hold a valid credentials record.
    pub fn load(&self) -> Result<Option<Credentials>> {
        let path = self.path();

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Check whether a credentials file is present.
    ///
    /// Any error while probing counts as "not present".
    pub fn exists(&self) -> bool {
        fs::metadata(self.path())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

/// Create `dir` and any missing parents, owner-only on unix.
fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)
}

/// Write `data` to `path` with owner read/write permissions only.
fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // `mode` only applies on creation; a leftover scratch file keeps its bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(data)?;
    file.sync_all()
}
