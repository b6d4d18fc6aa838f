use std::fmt;
use std::ops::Deref;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand_core::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Modulus size for freshly generated peer keys
pub const RSA_KEY_BITS: usize = 2048;

/// `KeyType.RSA` in the libp2p key envelope
const KEY_TYPE_RSA: u64 = 0;
/// protobuf field 1, varint
const TYPE_FIELD_TAG: u8 = 0x08;
/// protobuf field 2, length delimited
const DATA_FIELD_TAG: u8 = 0x12;

/// Errors that can occur during key operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Public half of a peer keypair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubKey(RsaPublicKey);

impl Deref for PubKey {
    type Target = RsaPublicKey;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RsaPublicKey> for PubKey {
    fn from(key: RsaPublicKey) -> Self {
        PubKey(key)
    }
}

impl PubKey {
    /// Encode as a key envelope wrapping the PKIX (SubjectPublicKeyInfo) DER form
    pub fn to_bytes(&self) -> Result<Vec<u8>, KeyError> {
        let der = self
            .0
            .to_public_key_der()
            .map_err(|e| anyhow::anyhow!("public key DER encode error: {}", e))?;
        Ok(wrap_key(KEY_TYPE_RSA, der.as_bytes()))
    }

    /// Parse a key envelope produced by [`PubKey::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let data = unwrap_key(bytes, KEY_TYPE_RSA)?;
        let key = RsaPublicKey::from_public_key_der(data)
            .map_err(|e| anyhow::anyhow!("public key DER decode error: {}", e))?;
        Ok(PubKey(key))
    }
}

/// Private half of a peer keypair
///
/// Stored in profiles as the standard base64 encoding of its key envelope
/// (PKCS#1 DER inside), see [`PrivKey::encode`].
///
/// # Examples
///
/// ```ignore
/// let key = PrivKey::generate()?;
/// let stored = key.encode()?;
/// let recovered = PrivKey::decode(&stored)?;
/// assert_eq!(key.public(), recovered.public());
/// ```
#[derive(Clone)]
pub struct PrivKey(RsaPrivateKey);

impl fmt::Debug for PrivKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivKey").field(&"..").finish()
    }
}

impl Deref for PrivKey {
    type Target = RsaPrivateKey;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RsaPrivateKey> for PrivKey {
    fn from(key: RsaPrivateKey) -> Self {
        PrivKey(key)
    }
}

impl PrivKey {
    /// Generate a new [`RSA_KEY_BITS`] key from the OS random source.
    ///
    /// This blocks on system entropy and prime search; expect it to take
    /// tens to hundreds of milliseconds.
    pub fn generate() -> Result<Self, KeyError> {
        Self::generate_with_bits(RSA_KEY_BITS)
    }

    pub fn generate_with_bits(bits: usize) -> Result<Self, KeyError> {
        let key = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| anyhow::anyhow!("rsa key generation failed: {}", e))?;
        Ok(PrivKey(key))
    }

    /// Derive the public key
    pub fn public(&self) -> PubKey {
        PubKey(self.0.to_public_key())
    }

    /// Encode as a key envelope wrapping the PKCS#1 DER form
    pub fn to_bytes(&self) -> Result<Vec<u8>, KeyError> {
        let der = self
            .0
            .to_pkcs1_der()
            .map_err(|e| anyhow::anyhow!("private key DER encode error: {}", e))?;
        Ok(wrap_key(KEY_TYPE_RSA, der.as_bytes()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let data = unwrap_key(bytes, KEY_TYPE_RSA)?;
        let key = RsaPrivateKey::from_pkcs1_der(data)
            .map_err(|e| anyhow::anyhow!("private key DER decode error: {}", e))?;
        Ok(PrivKey(key))
    }

    /// Standard base64 of [`PrivKey::to_bytes`], the profile storage form
    pub fn encode(&self) -> Result<String, KeyError> {
        Ok(STANDARD.encode(self.to_bytes()?))
    }

    pub fn decode(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        Self::from_bytes(&bytes)
    }
}

fn wrap_key(key_type: u64, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 8);
    out.push(TYPE_FIELD_TAG);
    put_uvarint(&mut out, key_type);
    out.push(DATA_FIELD_TAG);
    put_uvarint(&mut out, data.len() as u64);
    out.extend_from_slice(data);
    out
}

fn unwrap_key(bytes: &[u8], expected_type: u64) -> Result<&[u8], KeyError> {
    let rest = expect_tag(bytes, TYPE_FIELD_TAG)?;
    let (key_type, rest) = take_uvarint(rest)?;
    if key_type != expected_type {
        return Err(anyhow::anyhow!(
            "unsupported key type, expected {}, got {}",
            expected_type,
            key_type
        )
        .into());
    }

    let rest = expect_tag(rest, DATA_FIELD_TAG)?;
    let (len, data) = take_uvarint(rest)?;
    if data.len() as u64 != len {
        return Err(anyhow::anyhow!(
            "key envelope length mismatch, expected {}, got {}",
            len,
            data.len()
        )
        .into());
    }
    Ok(data)
}

fn expect_tag(bytes: &[u8], tag: u8) -> Result<&[u8], KeyError> {
    match bytes.split_first() {
        Some((first, rest)) if *first == tag => Ok(rest),
        Some((first, _)) => {
            Err(anyhow::anyhow!("unexpected field tag {:#04x}, expected {:#04x}", first, tag).into())
        }
        None => Err(anyhow::anyhow!("truncated key envelope").into()),
    }
}

fn put_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn take_uvarint(bytes: &[u8]) -> Result<(u64, &[u8]), KeyError> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate().take(10) {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, bytes.get(i + 1..).unwrap_or_default()));
        }
    }
    Err(anyhow::anyhow!("malformed varint in key envelope").into())
}
