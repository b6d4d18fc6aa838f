use std::fmt;
use std::str::FromStr;

use multibase::Base;
use multihash::Multihash;
use sha2::{Digest, Sha256};

use super::keys::{KeyError, PubKey};

/// Envelopes up to this size are inlined instead of hashed
const MAX_INLINE_KEY_LENGTH: usize = 42;
const IDENTITY_CODE: u64 = 0x00;
const SHA2_256_CODE: u64 = 0x12;

/// Self-certifying identifier of a peer
///
/// The multihash of the peer's public key envelope. Unlike the peername,
/// a peer id cannot be reassigned: it is only ever derived from a key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerId(Multihash<64>);

impl PeerId {
    pub fn from_public_key(key: &PubKey) -> Result<Self, KeyError> {
        let encoded = key.to_bytes()?;
        let hash = if encoded.len() <= MAX_INLINE_KEY_LENGTH {
            Multihash::<64>::wrap(IDENTITY_CODE, &encoded)
        } else {
            Multihash::<64>::wrap(SHA2_256_CODE, &Sha256::digest(&encoded))
        }
        .map_err(|e| anyhow::anyhow!("peer id multihash error: {}", e))?;
        Ok(PeerId(hash))
    }

    /// Parse the binary multihash form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let hash = Multihash::<64>::from_bytes(bytes)
            .map_err(|e| anyhow::anyhow!("peer id multihash decode error: {}", e))?;
        match hash.code() {
            IDENTITY_CODE | SHA2_256_CODE => Ok(PeerId(hash)),
            code => Err(anyhow::anyhow!("unsupported peer id multihash code {:#x}", code).into()),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    /// Canonical text form, base58btc without a multibase prefix
    pub fn to_base58(&self) -> String {
        Base::Base58Btc.encode(self.to_bytes())
    }

    /// Whether this id was derived from `key`
    pub fn matches(&self, key: &PubKey) -> bool {
        PeerId::from_public_key(key).is_ok_and(|derived| derived == *self)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self.to_base58())
    }
}

impl FromStr for PeerId {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = Base::Base58Btc
            .decode(s)
            .map_err(|e| anyhow::anyhow!("peer id base58 decode error: {}", e))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::PrivKey;

    #[test]
    fn test_rsa_peer_id_is_sha256() {
        let key = PrivKey::generate_with_bits(1024).unwrap();
        let id = PeerId::from_public_key(&key.public()).unwrap();

        // sha2-256 multihashes render as Qm... in base58btc
        assert!(id.to_string().starts_with("Qm"));
        assert_eq!(id.to_bytes().len(), 34);
        assert!(id.matches(&key.public()));
    }

    #[test]
    fn test_peer_id_text_round_trip() {
        let key = PrivKey::generate_with_bits(1024).unwrap();
        let id = PeerId::from_public_key(&key.public()).unwrap();
        let parsed: PeerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_peer_id_rejects_invalid_text() {
        assert!("".parse::<PeerId>().is_err());
        assert!("0OIl".parse::<PeerId>().is_err());
        assert!("QmShort".parse::<PeerId>().is_err());
    }

    #[test]
    fn test_distinct_keys_distinct_ids() {
        let a = PrivKey::generate_with_bits(1024).unwrap();
        let b = PrivKey::generate_with_bits(1024).unwrap();
        let id_a = PeerId::from_public_key(&a.public()).unwrap();
        assert!(!id_a.matches(&b.public()));
    }
}
