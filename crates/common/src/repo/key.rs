use std::fmt;

use serde::{Deserialize, Serialize};

/// Hierarchical key for a key-value datastore
///
/// Keys are cleaned, `/`-rooted paths: `Key::new("a//b/../c")` is `/a/c`
/// and the empty string becomes the root key `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Key(String);

impl Key {
    pub fn new(s: &str) -> Self {
        Key(clean(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::new(&s)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.0
    }
}

/// Lexical path cleaning: collapses separators, resolves `.` and `..`
/// and roots the result at `/`
fn clean(s: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in s.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clean() {
        let cases = [
            ("", "/"),
            ("/", "/"),
            ("/config.json", "/config.json"),
            ("config.json", "/config.json"),
            ("a//b/", "/a/b"),
            ("/a/./b/../c", "/a/c"),
            ("/..", "/"),
        ];
        for (input, expected) in cases {
            assert_eq!(Key::new(input).as_str(), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_serde_cleans() {
        let key: Key = serde_json::from_str(r#""refs//ds""#).unwrap();
        assert_eq!(key.as_str(), "/refs/ds");
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""/refs/ds""#);
    }
}
