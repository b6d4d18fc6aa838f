use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::profile::Profile;

/// Peernames that would shadow CLI commands or API routes
pub const RESERVED_PEERNAMES: [&str; 13] = [
    "me",
    "status",
    "at",
    "add",
    "history",
    "remove",
    "export",
    "profile",
    "list",
    "peers",
    "connections",
    "save",
    "connect",
];

const MAX_TEXT_LENGTH: usize = 255;
const MAX_TWITTER_LENGTH: usize = 15;
const THEME_COLORS: [&str; 1] = ["default"];

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("email regex is valid")
});

/// A single failed profile constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON name of the offending field
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every constraint a profile failed, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("invalid profile: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Names of the failing fields
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    /// Append the violations found by another check
    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Profile {
    /// Check every field constraint, collecting all violations.
    ///
    /// Purely structural: nothing here consults the network, so a valid
    /// peername may still be taken by another peer.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::default();

        required(&mut errs, "id", &self.id);
        required(&mut errs, "privkey", &self.privkey);
        required(&mut errs, "peername", &self.peername);

        if RESERVED_PEERNAMES.contains(&self.peername.as_str()) {
            errs.push(
                "peername",
                format!("'{}' is a reserved name", self.peername),
            );
        }

        if !self.email.is_empty() {
            max_length(&mut errs, "email", &self.email, MAX_TEXT_LENGTH);
            if !EMAIL_REGEX.is_match(&self.email) {
                errs.push("email", "must be a valid email address");
            }
        }

        max_length(&mut errs, "name", &self.name, MAX_TEXT_LENGTH);
        max_length(&mut errs, "description", &self.description, MAX_TEXT_LENGTH);

        if !self.homeurl.is_empty() {
            max_length(&mut errs, "homeurl", &self.homeurl, MAX_TEXT_LENGTH);
            if Url::parse(&self.homeurl).is_err() {
                errs.push("homeurl", "must be a valid URI");
            }
        }

        if !self.color.is_empty() && !THEME_COLORS.contains(&self.color.as_str()) {
            errs.push(
                "color",
                format!("must be empty or one of {:?}", THEME_COLORS),
            );
        }

        max_length(&mut errs, "twitter", &self.twitter, MAX_TWITTER_LENGTH);

        errs.into_result()
    }
}

fn required(errs: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errs.push(field, "is required");
    }
}

fn max_length(errs: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errs.push(
            field,
            format!("must be at most {} characters, got {}", max, len),
        );
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;

    fn valid_profile() -> Profile {
        let mut profile = Profile::blank(Utc::now());
        profile.id = "QmZePf5LeXow3RW5U1AgEiNbW46YnRGhZ7HPvm1UmPFPwt".to_string();
        profile.privkey = "CAASpgkwggSiAgEAAoIBAQC".to_string();
        profile.peername = "crisp_gray_newfoundland".to_string();
        profile
    }

    #[test]
    fn test_valid_profile() {
        let mut profile = valid_profile();
        profile.email = "dog@example.com".to_string();
        profile.homeurl = "https://example.com/~dog".to_string();
        profile.color = "default".to_string();
        profile.twitter = "dogfacts".to_string();
        profile.name = "A Dog".to_string();
        assert_eq!(profile.validate(), Ok(()));
    }

    #[test]
    fn test_missing_id() {
        let mut profile = valid_profile();
        profile.id.clear();

        let errs = profile.validate().unwrap_err();
        assert_eq!(errs.fields(), vec!["id"]);
        assert!(errs.to_string().contains("id: is required"));
    }

    #[test]
    fn test_reserved_peername() {
        for reserved in RESERVED_PEERNAMES {
            let mut profile = valid_profile();
            profile.peername = reserved.to_string();
            let errs = profile.validate().unwrap_err();
            assert_eq!(errs.fields(), vec!["peername"]);
        }
    }

    #[test]
    fn test_reports_every_violation() {
        let mut profile = valid_profile();
        profile.id.clear();
        profile.privkey.clear();
        profile.peername = "me".to_string();
        profile.email = "not-an-email".to_string();
        profile.homeurl = "not a url".to_string();
        profile.color = "chartreuse".to_string();
        profile.twitter = "a_very_long_twitter_handle".to_string();
        profile.description = "x".repeat(256);

        let errs = profile.validate().unwrap_err();
        assert_eq!(
            errs.fields(),
            vec![
                "id",
                "privkey",
                "peername",
                "email",
                "description",
                "homeurl",
                "color",
                "twitter"
            ]
        );
    }

    #[test]
    fn test_length_limits_count_characters() {
        let mut profile = valid_profile();
        profile.name = "é".repeat(255);
        profile.twitter = "ü".repeat(15);
        assert!(profile.validate().is_ok());

        profile.name.push('é');
        assert_eq!(profile.validate().unwrap_err().fields(), vec!["name"]);
    }

    #[test]
    fn test_long_email() {
        let mut profile = valid_profile();
        profile.email = format!("{}@example.com", "a".repeat(250));
        let errs = profile.validate().unwrap_err();
        assert_eq!(errs.violations().len(), 1);
        assert_eq!(errs.fields(), vec!["email"]);
    }
}
