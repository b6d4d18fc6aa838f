/**
 * Repository configuration document.
 *  Holds the peer profile and the local
 *  service settings persisted under `File::Config`.
 */
pub mod config;
/**
 * Cryptographic identity.
 *  - RSA keypair generation and serialization
 *  - Self-certifying peer identifiers
 */
pub mod crypto;
/**
 * Peer profiles: bootstrap of a fresh identity,
 *  nickname derivation and schema validation.
 */
pub mod profile;
/**
 * Repository addressing.
 *  - Translation of HTTP paths into canonical
 *    dataset reference strings
 *  - The dataset reference grammar
 *  - The logical file registry and its
 *    filesystem / datastore mappings
 */
pub mod repo;

pub mod prelude {
    pub use crate::config::{Config, ConfigError};
    pub use crate::crypto::{KeyError, PeerId, PrivKey};
    pub use crate::profile::{nick, Profile};
    pub use crate::repo::{http_path_to_ref_path, BasePath, DatasetRef, File, ParseError};
}
