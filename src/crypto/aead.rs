//! FIRESIGHT - AEAD Encryption
//!
//! AES-128-GCM for audit record payloads. Blob format is
//! `base64(nonce || ciphertext || tag)` with a fresh random nonce per call.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::keys::{generate_nonce, AnalysisKey, NONCE_LEN, TAG_LEN};
use crate::error::{FireError, FireResult};

/// Authenticated cipher bound to exactly one key
pub struct AeadCipher {
    cipher: Aes128Gcm,
}

impl AeadCipher {
    /// Build a cipher from a loaded key
    pub fn new(key: &AnalysisKey) -> FireResult<Self> {
        let cipher = Aes128Gcm::new_from_slice(key.expose())
            .map_err(|e| FireError::Encryption(e.to_string()))?;
        Ok(Self { cipher })
    }

    /// Encrypt a text payload into an opaque base64 blob.
    ///
    /// The nonce is drawn fresh from the OS CSPRNG on every call and
    /// prepended to the ciphertext; it is never derived from a counter
    /// or reused.
    pub fn encrypt(&self, plaintext: &str) -> FireResult<String> {
        let nonce_bytes = generate_nonce();
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| FireError::Encryption(e.to_string()))?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(&nonce_bytes);
        raw.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(raw))
    }

    /// Decrypt a blob produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails with [`FireError::Authentication`] on a bad tag (tampering,
    /// wrong key, corruption) or on a payload too short to contain a
    /// nonce and tag.
    pub fn decrypt(&self, blob: &str) -> FireResult<String> {
        let raw = BASE64.decode(blob).map_err(|_| FireError::Authentication)?;

        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(FireError::Authentication);
        }

        let nonce = Nonce::from_slice(&raw[..NONCE_LEN]);
        let plaintext = self
            .cipher
            .decrypt(nonce, &raw[NONCE_LEN..])
            .map_err(|_| FireError::Authentication)?;

        String::from_utf8(plaintext).map_err(|_| FireError::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> AeadCipher {
        AeadCipher::new(&AnalysisKey::generate()).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let cipher = cipher();
        let plaintext = "FIRESIGHT audit record - confidential";

        let blob = cipher.encrypt(plaintext).unwrap();
        assert_ne!(blob, plaintext);

        let decrypted = cipher.decrypt(&blob).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_nonce_never_reused() {
        let cipher = cipher();
        let a = cipher.encrypt("same payload").unwrap();
        let b = cipher.encrypt("same payload").unwrap();
        // Fresh nonce per call means distinct blobs for equal plaintext
        assert_ne!(a, b);
    }

    #[test]
    fn test_tamper_detected() {
        let cipher = cipher();
        let blob = cipher.encrypt("integrity matters").unwrap();

        let mut raw = BASE64.decode(&blob).unwrap();
        for i in 0..raw.len() {
            raw[i] ^= 0x01;
            let tampered = BASE64.encode(&raw);
            assert!(matches!(
                cipher.decrypt(&tampered),
                Err(FireError::Authentication)
            ));
            raw[i] ^= 0x01;
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let blob = cipher().encrypt("secret").unwrap();
        assert!(matches!(
            cipher().decrypt(&blob),
            Err(FireError::Authentication)
        ));
    }

    #[test]
    fn test_short_blob_rejected() {
        let cipher = cipher();
        let short = BASE64.encode([0u8; NONCE_LEN + TAG_LEN - 1]);
        assert!(matches!(
            cipher.decrypt(&short),
            Err(FireError::Authentication)
        ));
        assert!(matches!(
            cipher.decrypt("not base64 at all!!"),
            Err(FireError::Authentication)
        ));
    }
}
