use common::prelude::{Config, Profile};

pub const TEST_PEER_ID: &str = "QmZePf5LeXow3RW5U1AgEiNbW46YnRGhZ7HPvm1UmPFPwt";
pub const TEST_PEERNAME: &str = "crisp_gray_newfoundland";

/// A valid profile with a placeholder key, no keygen involved
pub fn test_profile() -> Profile {
    serde_json::from_value(serde_json::json!({
        "id": TEST_PEER_ID,
        "privkey": "CAASpgkwggSiAgEAAoIBAQC",
        "peername": TEST_PEERNAME,
        "created": "2026-01-01T00:00:00Z",
        "updated": "2026-01-01T00:00:00Z",
        "type": "peer",
    }))
    .unwrap()
}

pub fn test_config() -> Config {
    Config::with_profile(test_profile())
}
