//! Peer profiles
//!
//! A [`Profile`] is the identity a peer presents to the network: a stable,
//! key-derived `id`, the serialized private key behind it, a mutable
//! `peername`, and descriptive metadata.
//!
//! Fresh peers get their profile from [`default_profile`], which never fails:
//! if key generation breaks, the key-derived fields stay empty and the
//! profile will not pass [`Profile::validate`].

mod nick;
#[allow(clippy::module_inception)]
mod profile;
mod validate;

pub use nick::nick;
pub use profile::{default_profile, Profile, ProfileType};
pub use validate::{ValidationErrors, Violation, RESERVED_PEERNAMES};
