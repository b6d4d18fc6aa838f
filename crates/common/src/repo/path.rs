/// Convert an HTTP request path into a canonical reference string.
///
/// Drops the query string, rewrites the first `/at/ipfs/` and then the
/// first `/at/` to `@`, and trims one leading and one trailing `/`.
/// Nothing is validated: the output is meant for [`super::DatasetRef::parse`].
///
/// ```
/// use common::repo::http_path_to_ref_path;
///
/// assert_eq!(http_path_to_ref_path("/peername/at/ipfs/bafy123"), "peername@bafy123");
/// assert_eq!(http_path_to_ref_path("/peername/at/QmHash/"), "peername@QmHash");
/// ```
pub fn http_path_to_ref_path(path: &str) -> String {
    let without_query = path.split_once('?').map_or(path, |(before, _)| before);
    let rewritten = without_query
        .replacen("/at/ipfs/", "@", 1)
        .replacen("/at/", "@", 1);

    let trimmed = rewritten.strip_prefix('/').unwrap_or(&rewritten);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_translation() {
        let cases = [
            ("", ""),
            ("/", ""),
            ("//", ""),
            ("/peername", "peername"),
            ("/peername/", "peername"),
            ("/peername/dataset", "peername/dataset"),
            ("/peername/at/ipfs/bafy123", "peername@bafy123"),
            ("/peername/at/QmHash/", "peername@QmHash"),
            (
                "/peer/ds/at/QmProfile/ipfs/QmHash",
                "peer/ds@QmProfile/ipfs/QmHash",
            ),
            ("/peer/ds/at/ipfs/QmHash?download=true", "peer/ds@QmHash"),
            ("/peer/ds?at=/at/", "peer/ds"),
            ("?only=query", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(http_path_to_ref_path(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_only_first_occurrence_rewritten() {
        assert_eq!(http_path_to_ref_path("/a/at/b/at/c"), "a@b/at/c");
        assert_eq!(
            http_path_to_ref_path("/a/at/ipfs/b/at/ipfs/c"),
            "a@b@ipfs/c"
        );
    }

    #[test]
    fn test_trims_single_separator() {
        assert_eq!(http_path_to_ref_path("//peer//"), "/peer/");
    }

    #[test]
    fn test_query_is_dropped() {
        for path in ["/peer?x=1", "/peer/ds/at/ipfs/Qm?x=1?y=2", "?", "/peer/?"] {
            let out = http_path_to_ref_path(path);
            assert!(!out.contains('?'), "{:?} -> {:?}", path, out);
        }
    }

    #[test]
    fn test_idempotent_on_canonical_strings() {
        for path in [
            "/peername/at/ipfs/bafy123",
            "/peer/ds/at/QmProfile/ipfs/QmHash",
            "/peer/ds",
            "",
        ] {
            let once = http_path_to_ref_path(path);
            assert_eq!(http_path_to_ref_path(&once), once);
        }
    }
}
