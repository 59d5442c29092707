use std::sync::OnceLock;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use rsa::{
    RsaPrivateKey,
    pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey},
    pkcs8::DecodePrivateKey,
};
use tracing::error;

use crate::domain::{
    common::{ServiceAccountConfig, entities::app_errors::CoreError},
    credential::{ports::AssertionSigner, value_objects::AssertionClaims},
};

/// Signs assertions with RS512 using the service account's private key.
///
/// The key is decrypted on first use and kept for the life of the signer.
pub struct RsaAssertionSigner {
    private_key: String,
    passphrase: String,
    key_id: Option<String>,
    encoding_key: OnceLock<EncodingKey>,
}

impl RsaAssertionSigner {
    pub fn new(account: &ServiceAccountConfig) -> Self {
        Self {
            private_key: normalize_pem(&account.private_key),
            passphrase: account.passphrase.clone(),
            key_id: account
                .public_key_id
                .clone()
                .filter(|kid| !kid.trim().is_empty()),
            encoding_key: OnceLock::new(),
        }
    }

    fn encoding_key(&self) -> Result<&EncodingKey, CoreError> {
        if let Some(key) = self.encoding_key.get() {
            return Ok(key);
        }

        let key = decode_private_key(&self.private_key, &self.passphrase)?;
        Ok(self.encoding_key.get_or_init(|| key))
    }
}

/// Environment values often carry the PEM on one line with literal `\n`.
pub fn normalize_pem(pem: &str) -> String {
    pem.replace("\\n", "\n").trim().to_string()
}

fn decode_private_key(pem: &str, passphrase: &str) -> Result<EncodingKey, CoreError> {
    let key = if pem.contains("BEGIN ENCRYPTED PRIVATE KEY") {
        RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase.as_bytes())
            .map_err(|e| auth_error("failed to decrypt private key", e))?
    } else if pem.contains("BEGIN RSA PRIVATE KEY") {
        RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| auth_error("invalid private key", e))?
    } else {
        RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| auth_error("invalid private key", e))?
    };

    let der = key
        .to_pkcs1_der()
        .map_err(|e| auth_error("failed to encode private key", e))?;

    Ok(EncodingKey::from_rsa_der(der.as_bytes()))
}

fn auth_error(context: &str, err: impl std::fmt::Display) -> CoreError {
    error!("{}: {}", context, err);
    CoreError::Authentication(format!("{}: {}", context, err))
}

impl AssertionSigner for RsaAssertionSigner {
    fn sign(&self, claims: &AssertionClaims) -> Result<String, CoreError> {
        let mut header = Header::new(Algorithm::RS512);
        header.kid = self.key_id.clone();

        encode(&header, claims, self.encoding_key()?)
            .map_err(|e| auth_error("failed to sign assertion", e))
    }
}
