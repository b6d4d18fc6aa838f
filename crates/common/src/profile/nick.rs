use sha2::{Digest, Sha256};

const ADJECTIVES: [&str; 64] = [
    "agile", "amber", "ancient", "bold", "brave", "breezy", "bright", "brisk", "calm", "cheerful",
    "clever", "cosmic", "cozy", "crisp", "curious", "daring", "dashing", "dreamy", "eager",
    "earnest", "fancy", "fearless", "fluffy", "frosty", "gentle", "giddy", "glossy", "graceful",
    "happy", "hardy", "humble", "jolly", "keen", "kind", "lively", "loyal", "lucky", "mellow",
    "merry", "mighty", "misty", "nimble", "noble", "patient", "perky", "plucky", "polite",
    "proud", "quick", "quiet", "rapid", "rustic", "shiny", "silly", "snappy", "spry", "sturdy",
    "sunny", "swift", "tidy", "vivid", "wise", "witty", "zesty",
];

const COLORS: [&str; 16] = [
    "amber", "black", "blue", "brindle", "brown", "cream", "fawn", "golden", "gray", "merle",
    "red", "rust", "sable", "silver", "tan", "white",
];

const BREEDS: [&str; 64] = [
    "affenpinscher", "akita", "basenji", "basset", "beagle", "bichon", "bloodhound", "borzoi",
    "boxer", "briard", "brittany", "bulldog", "cairn", "chihuahua", "chow", "collie", "corgi",
    "dachshund", "dalmatian", "dingo", "doberman", "greyhound", "harrier", "havanese", "husky",
    "keeshond", "kelpie", "komondor", "kuvasz", "labrador", "leonberger", "lhasa", "malamute",
    "maltese", "mastiff", "mudi", "newfoundland", "otterhound", "papillon", "pekingese",
    "pointer", "pomeranian", "poodle", "pug", "puli", "retriever", "rottweiler", "saluki",
    "samoyed", "schipperke", "schnauzer", "setter", "sheepdog", "shiba", "spaniel", "spitz",
    "terrier", "vizsla", "weimaraner", "whippet", "wolfhound", "xolo", "yorkie", "beauceron",
];

/// Deterministic `adjective_color_breed` nickname for a peer id.
///
/// Only ever used to seed the initial peername; the result never collides
/// with a reserved peername and always satisfies the peername grammar.
pub fn nick(id: &str) -> String {
    let digest = Sha256::digest(id.as_bytes());
    let adjective = ADJECTIVES[usize::from(digest[0]) % ADJECTIVES.len()];
    let color = COLORS[usize::from(digest[1]) % COLORS.len()];
    let breed = BREEDS[usize::from(digest[2]) % BREEDS.len()];
    format!("{}_{}_{}", adjective, color, breed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::RESERVED_PEERNAMES;

    #[test]
    fn test_nick_is_deterministic() {
        let id = "QmZePf5LeXow3RW5U1AgEiNbW46YnRGhZ7HPvm1UmPFPwt";
        assert_eq!(nick(id), nick(id));
        assert_ne!(nick(id), nick("QmSomeOtherPeer"));
    }

    #[test]
    fn test_nick_shape() {
        for id in ["", "a", "QmPeer", "12D3KooW"] {
            let name = nick(id);
            assert_eq!(name.split('_').count(), 3);
            assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
            assert!(!RESERVED_PEERNAMES.contains(&name.as_str()));
        }
    }
}
