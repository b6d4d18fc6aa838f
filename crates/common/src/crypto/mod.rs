//! Cryptographic identity for Quarry peers
//!
//! - **Keypairs**: 2048-bit RSA keys drawn from the operating system's CSPRNG
//! - **Key envelopes**: keys serialize into the libp2p protobuf envelope
//!   (`Type` + `Data`), so stored keys interoperate with other libp2p nodes
//! - **Peer identity**: a [`PeerId`] is the multihash of the public key
//!   envelope, rendered in base58btc
//!
//! # Peer Identifiers
//!
//! Envelopes of at most 42 bytes are inlined with the identity multihash,
//! anything larger is hashed with sha2-256. RSA keys are always hashed,
//! which gives the familiar `Qm...` identifiers.

mod keys;
mod peer_id;

pub use keys::{KeyError, PrivKey, PubKey, RSA_KEY_BITS};
pub use peer_id::PeerId;
