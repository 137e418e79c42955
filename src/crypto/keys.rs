//! FIRESIGHT - Key Management
//!
//! Loads or lazily creates the persistent AES-128-GCM audit key.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use secrecy::{ExposeSecret, Secret};
use zeroize::ZeroizeOnDrop;

use crate::error::{FireError, FireResult};

/// Key length for AES-128-GCM
pub const KEY_LEN: usize = 16;

/// Nonce length for AES-GCM
pub const NONCE_LEN: usize = 12;

/// GCM authentication tag length
pub const TAG_LEN: usize = 16;

/// Secure key wrapper with automatic zeroization
#[derive(Clone, ZeroizeOnDrop)]
pub struct AnalysisKey {
    #[zeroize(skip)]
    inner: Secret<[u8; KEY_LEN]>,
}

impl AnalysisKey {
    /// Create a new key from bytes
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            inner: Secret::new(bytes),
        }
    }

    /// Expose the key bytes (use with caution)
    pub fn expose(&self) -> &[u8; KEY_LEN] {
        self.inner.expose_secret()
    }

    /// Generate a random key
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::new(bytes)
    }
}

/// Persistent key file store
///
/// One key per path for the lifetime of the deployment. Historical
/// audit records stay decryptable only as long as this file survives.
pub struct KeyStore;

impl KeyStore {
    /// Load the key at `path`, creating it on first use.
    ///
    /// Creation is exclusive (`create_new`), so two processes racing on
    /// a fresh path cannot end up with divergent keys: the loser of the
    /// race falls back to reading the winner's file.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> FireResult<AnalysisKey> {
        let path = path.as_ref();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }

            let key = AnalysisKey::generate();
            match Self::write_exclusive(path, key.expose()) {
                Ok(()) => return Ok(key),
                // Lost the creation race: another process wrote the
                // file first, read its key below.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }
        }

        Self::read_key(path)
    }

    fn write_exclusive(path: &Path, bytes: &[u8; KEY_LEN]) -> std::io::Result<()> {
        let mut opts = OpenOptions::new();
        opts.write(true).create_new(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }

        let mut file = opts.open(path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        Ok(())
    }

    /// Read an existing key file verbatim.
    ///
    /// No entropy validation. A truncated or oversized key file is fatal
    /// at startup rather than silently re-keyed, since re-keying would
    /// orphan every existing audit record.
    fn read_key(path: &Path) -> FireResult<AnalysisKey> {
        let data = fs::read(path)?;

        // A wrong-length key could never construct the AES-128 cipher,
        // so the failure belongs here, at load time, with a message that
        // names the file. There is deliberately no re-key path: every
        // existing record is sealed under these exact bytes.
        let bytes: [u8; KEY_LEN] = data.as_slice().try_into().map_err(|_| {
            FireError::Encryption(format!(
                "key file {} has invalid length {} (expected {})",
                path.display(),
                data.len(),
                KEY_LEN
            ))
        })?;

        Ok(AnalysisKey::new(bytes))
    }
}

/// Generate a random nonce for AES-GCM
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    use rand::RngCore;
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_key_created_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keys").join("audit.key");

        let k1 = KeyStore::load_or_create(&path).unwrap();
        assert!(path.exists());

        let k2 = KeyStore::load_or_create(&path).unwrap();
        assert_eq!(k1.expose(), k2.expose());

        // File holds exactly the 16 key bytes
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(raw.len(), KEY_LEN);
        assert_eq!(&raw[..], k1.expose());
    }

    #[test]
    fn test_fresh_paths_get_distinct_keys() {
        let dir = tempdir().unwrap();
        let k1 = KeyStore::load_or_create(dir.path().join("a.key")).unwrap();
        let k2 = KeyStore::load_or_create(dir.path().join("b.key")).unwrap();
        assert_ne!(k1.expose(), k2.expose());
    }

    #[test]
    fn test_existing_file_read_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.key");
        std::fs::write(&path, [0x42u8; KEY_LEN]).unwrap();

        let key = KeyStore::load_or_create(&path).unwrap();
        assert_eq!(key.expose(), &[0x42u8; KEY_LEN]);
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.key");
        KeyStore::load_or_create(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_key_file_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.key");
        std::fs::write(&path, [0u8; 7]).unwrap();

        assert!(matches!(
            KeyStore::load_or_create(&path),
            Err(FireError::Encryption(_))
        ));
    }

    #[test]
    fn test_nonce_randomness() {
        assert_ne!(generate_nonce(), generate_nonce());
    }
}
