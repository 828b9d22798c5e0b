use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm};
use hkdf::Hkdf;
use sha2::Sha256;

const HKDF_SALT: &[u8] = b"auditguard-v1";
const HKDF_INFO: &[u8] = b"aes256gcm-key";

/// Marker substituted for sensitive values when no encryption key is
/// configured.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Protects `old_value`/`new_value` snapshots before they reach the store.
/// Whatever the implementation, plaintext must never be persisted while
/// `encrypt_logs` is enabled.
pub trait ValueGuard: Send + Sync {
    fn seal(&self, value: &serde_json::Value) -> serde_json::Value;
}

/// Default guard: replaces the value with an opaque marker. The original
/// is unrecoverable, so this is redaction, not encryption — fine for the
/// confidentiality guarantee, not for audits that need the values back.
pub struct MarkerGuard;

impl ValueGuard for MarkerGuard {
    fn seal(&self, _value: &serde_json::Value) -> serde_json::Value {
        serde_json::Value::String(REDACTION_MARKER.to_string())
    }
}

/// AES-256-GCM guard with an HKDF-SHA256 derived key. Stores the nonce
/// prepended to the ciphertext, hex-encoded.
pub struct AesGcmGuard {
    key: [u8; 32],
}

impl AesGcmGuard {
    pub fn new(key: &str) -> Self {
        let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), key.as_bytes());
        let mut okm = [0u8; 32];
        hk.expand(HKDF_INFO, &mut okm)
            .expect("32 bytes is a valid HKDF-SHA256 output length");
        AesGcmGuard { key: okm }
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| format!("Invalid key: {e}"))?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| format!("Encryption failed: {e}"))?;

        let mut data = nonce.to_vec();
        data.extend_from_slice(&ciphertext);
        Ok(hex::encode(data))
    }
}

impl ValueGuard for AesGcmGuard {
    fn seal(&self, value: &serde_json::Value) -> serde_json::Value {
        match self.encrypt(&value.to_string()) {
            Ok(sealed) => serde_json::json!({ "encrypted": sealed }),
            Err(e) => {
                // Never fall through to plaintext.
                tracing::error!("Value encryption failed, storing marker: {e}");
                serde_json::Value::String(REDACTION_MARKER.to_string())
            }
        }
    }
}
