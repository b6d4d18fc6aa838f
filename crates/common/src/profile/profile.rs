use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::nick::nick;
use crate::crypto::{KeyError, PeerId, PrivKey};

/// What kind of entity a profile represents
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    #[default]
    Peer,
    Organization,
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileType::Peer => write!(f, "peer"),
            ProfileType::Organization => write!(f, "organization"),
        }
    }
}

/// Identity and public metadata of a peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Base58 peer id derived from the public key. Never reassigned.
    #[serde(default)]
    pub id: String,
    /// Base64 private key envelope
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub privkey: String,
    /// Human handle, may change over the life of the peer
    #[serde(default)]
    pub peername: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ProfileType,
    #[serde(default)]
    pub email: String,
    /// Display name, "first last" by convention only
    #[serde(default)]
    pub name: String,
    /// Free-form bio
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homeurl: String,
    /// Theme color for web clients
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub photo: String,
    /// Banner image for the profile page
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub twitter: String,
}

impl Profile {
    /// An empty peer profile stamped with `now`
    pub(crate) fn blank(now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            privkey: String::new(),
            peername: String::new(),
            created: now,
            updated: now,
            kind: ProfileType::Peer,
            email: String::new(),
            name: String::new(),
            description: String::new(),
            homeurl: String::new(),
            color: String::new(),
            thumb: String::new(),
            photo: String::new(),
            poster: String::new(),
            twitter: String::new(),
        }
    }

    /// Parse the stored peer id
    pub fn peer_id(&self) -> Result<PeerId, KeyError> {
        self.id.parse()
    }

    /// Decode the stored private key
    pub fn priv_key(&self) -> Result<PrivKey, KeyError> {
        PrivKey::decode(&self.privkey)
    }

    /// Copy of this profile without the private key, for display
    pub fn redacted(&self) -> Self {
        Self {
            privkey: String::new(),
            ..self.clone()
        }
    }
}

/// Generate the profile of a freshly bootstrapped peer.
///
/// Creates a new RSA keypair, derives the peer id and a nickname from it.
/// This never fails: any error along the way is logged and leaves the
/// fields it would have set (`id`, `privkey`, `peername`) empty, while
/// `created`, `updated` and `type` are always populated.
///
/// Key generation blocks on system entropy; async callers should run this
/// on a blocking thread.
pub fn default_profile() -> Profile {
    profile_from_key(Utc::now(), PrivKey::generate())
}

pub(crate) fn profile_from_key(
    now: DateTime<Utc>,
    key: Result<PrivKey, KeyError>,
) -> Profile {
    let mut profile = Profile::blank(now);

    let key = match key {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "peer key generation failed, profile left without identity");
            return profile;
        }
    };

    match key.encode() {
        Ok(encoded) => profile.privkey = encoded,
        Err(e) => tracing::warn!(error = %e, "failed to serialize peer private key"),
    }

    match PeerId::from_public_key(&key.public()) {
        Ok(peer_id) => {
            profile.id = peer_id.to_string();
            profile.peername = nick(&profile.id);
        }
        Err(e) => tracing::warn!(error = %e, "failed to derive peer id from public key"),
    }

    profile
}
