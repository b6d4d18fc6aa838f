use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network assumed for a bare version hash (`peer/name@QmHash`)
const DEFAULT_NETWORK: &str = "ipfs";

/// Errors produced by the dataset reference grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty dataset reference")]
    Empty,
    #[error("dataset reference '{0}' contains more than one '@'")]
    MultipleAt(String),
    #[error("dataset reference alias '{0}' has too many segments, expected peername[/name]")]
    TooManySegments(String),
    #[error("invalid peername '{0}': use only letters, numbers, '-' and '_'")]
    InvalidPeername(String),
    #[error("invalid dataset name '{0}': must start with a letter or '_' and contain only letters, numbers, '-' and '_'")]
    InvalidName(String),
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),
    #[error("invalid dataset path '{0}', expected /network/hash")]
    InvalidPath(String),
    #[error("dataset reference '{0}' is not valid percent-encoded UTF-8")]
    InvalidEncoding(String),
}

/// Reference to a dataset
///
/// Canonical text form, every part optional as long as something is set:
///
/// ```text
/// peername/name@profile_id/network/hash
/// ```
///
/// `profile_id` is the owner's peer id, stable across peername changes;
/// `path` is the content address of a specific version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub peername: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "profileID", default, skip_serializing_if = "String::is_empty")]
    pub profile_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

impl DatasetRef {
    /// Parse a canonical reference string.
    ///
    /// ```
    /// use common::repo::DatasetRef;
    ///
    /// let r = DatasetRef::parse("peer/cities@QmProfile/ipfs/QmHash").unwrap();
    /// assert_eq!(r.peername, "peer");
    /// assert_eq!(r.name, "cities");
    /// assert_eq!(r.profile_id, "QmProfile");
    /// assert_eq!(r.path, "/ipfs/QmHash");
    /// ```
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        // bare content path
        if let Some(rest) = s.strip_prefix('/') {
            return Ok(DatasetRef {
                path: parse_path(rest)?,
                ..Default::default()
            });
        }

        let (alias, identifiers) = match s.split_once('@') {
            Some((alias, identifiers)) => (alias, Some(identifiers)),
            None => (s, None),
        };

        let mut dataset_ref = DatasetRef::default();

        if !alias.is_empty() {
            let (peername, name) = parse_alias(alias)?;
            dataset_ref.peername = peername.to_string();
            dataset_ref.name = name.to_string();
        }

        if let Some(identifiers) = identifiers {
            if identifiers.contains('@') {
                return Err(ParseError::MultipleAt(s.to_string()));
            }
            let (profile_id, path) = parse_identifiers(identifiers)?;
            dataset_ref.profile_id = profile_id.to_string();
            dataset_ref.path = path;
        }

        Ok(dataset_ref)
    }

    /// `peername/name`, or just the peername when no name is set
    pub fn alias(&self) -> String {
        if self.name.is_empty() {
            self.peername.clone()
        } else {
            format!("{}/{}", self.peername, self.name)
        }
    }
}

impl FromStr for DatasetRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias())?;
        if !self.profile_id.is_empty() || !self.path.is_empty() {
            write!(f, "@{}{}", self.profile_id, self.path)?;
        }
        Ok(())
    }
}

fn parse_alias(alias: &str) -> Result<(&str, &str), ParseError> {
    let mut segments = alias.split('/');
    let peername = segments.next().unwrap_or_default();
    let name = segments.next().unwrap_or_default();
    if segments.next().is_some() {
        return Err(ParseError::TooManySegments(alias.to_string()));
    }

    if !is_valid_peername(peername) {
        return Err(ParseError::InvalidPeername(peername.to_string()));
    }
    if alias.contains('/') && !is_valid_name(name) {
        return Err(ParseError::InvalidName(name.to_string()));
    }
    Ok((peername, name))
}

/// `hash` | `[profile_id]/network/hash`
fn parse_identifiers(identifiers: &str) -> Result<(&str, String), ParseError> {
    match identifiers.split_once('/') {
        None => {
            if !is_valid_identifier(identifiers) {
                return Err(ParseError::InvalidIdentifier(identifiers.to_string()));
            }
            Ok(("", format!("/{}/{}", DEFAULT_NETWORK, identifiers)))
        }
        Some((profile_id, rest)) => {
            if !profile_id.is_empty() && !is_valid_identifier(profile_id) {
                return Err(ParseError::InvalidIdentifier(profile_id.to_string()));
            }
            Ok((profile_id, parse_path(rest)?))
        }
    }
}

/// `network/hash`, without the leading slash
fn parse_path(path: &str) -> Result<String, ParseError> {
    match path.split_once('/') {
        Some((network, hash)) if is_valid_identifier(network) && is_valid_identifier(hash) => {
            Ok(format!("/{}/{}", network, hash))
        }
        _ => Err(ParseError::InvalidPath(format!("/{}", path))),
    }
}

fn is_valid_peername(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && !s
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '@' | '?' | '#'))
}

#[cfg(test)]
mod test {
    use super::*;

    fn dataset_ref(peername: &str, name: &str, profile_id: &str, path: &str) -> DatasetRef {
        DatasetRef {
            peername: peername.to_string(),
            name: name.to_string(),
            profile_id: profile_id.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_parse_valid() {
        let cases = [
            ("peer", dataset_ref("peer", "", "", "")),
            ("peer/cities", dataset_ref("peer", "cities", "", "")),
            (
                "peer@QmHash",
                dataset_ref("peer", "", "", "/ipfs/QmHash"),
            ),
            (
                "peer/cities@QmHash",
                dataset_ref("peer", "cities", "", "/ipfs/QmHash"),
            ),
            (
                "peer/cities@/ipfs/QmHash",
                dataset_ref("peer", "cities", "", "/ipfs/QmHash"),
            ),
            (
                "peer/cities@QmProfile/ipfs/QmHash",
                dataset_ref("peer", "cities", "QmProfile", "/ipfs/QmHash"),
            ),
            ("@QmHash", dataset_ref("", "", "", "/ipfs/QmHash")),
            ("/ipfs/QmHash", dataset_ref("", "", "", "/ipfs/QmHash")),
            (
                "my-peer_1/_private-ds",
                dataset_ref("my-peer_1", "_private-ds", "", ""),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(DatasetRef::parse(input), Ok(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_invalid() {
        let cases = [
            ("", ParseError::Empty),
            ("a/b/c", ParseError::TooManySegments("a/b/c".to_string())),
            ("peer name", ParseError::InvalidPeername("peer name".to_string())),
            ("/peer", ParseError::InvalidPath("/peer".to_string())),
            ("peer/", ParseError::InvalidName(String::new())),
            ("peer/1ds", ParseError::InvalidName("1ds".to_string())),
            ("peer@", ParseError::InvalidIdentifier(String::new())),
            ("@", ParseError::InvalidIdentifier(String::new())),
            ("peer@a@b", ParseError::MultipleAt("peer@a@b".to_string())),
            ("peer@QmProfile/ipfs", ParseError::InvalidPath("/ipfs".to_string())),
            (
                "peer@QmProfile/ipfs/Qm/extra",
                ParseError::InvalidPath("/ipfs/Qm/extra".to_string()),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(DatasetRef::parse(input), Err(expected), "input: {:?}", input);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for canonical in [
            "peer",
            "peer/cities",
            "peer/cities@/ipfs/QmHash",
            "peer/cities@QmProfile/ipfs/QmHash",
            "@/ipfs/QmHash",
        ] {
            let parsed: DatasetRef = canonical.parse().unwrap();
            assert_eq!(parsed.to_string(), canonical);
        }
    }

    #[test]
    fn test_bare_hash_normalizes() {
        let parsed = DatasetRef::parse("peer/cities@QmHash").unwrap();
        assert_eq!(parsed.to_string(), "peer/cities@/ipfs/QmHash");
        assert_eq!(DatasetRef::parse(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn test_json_field_names() {
        let value =
            serde_json::to_value(dataset_ref("peer", "cities", "QmProfile", "/ipfs/QmHash"))
                .unwrap();
        assert_eq!(value["profileID"], "QmProfile");
        assert_eq!(value["path"], "/ipfs/QmHash");

        let empty = serde_json::to_value(DatasetRef::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn test_alias() {
        assert_eq!(dataset_ref("peer", "", "", "").alias(), "peer");
        assert_eq!(dataset_ref("peer", "cities", "", "").alias(), "peer/cities");
    }
}
