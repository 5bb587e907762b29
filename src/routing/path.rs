//! Request path canonicality.
//!
//! Classification runs on the raw path and the same bytes are forwarded
//! upstream. A path the upstream would rewrite (`/sign-in/../dashboard`)
//! must therefore never reach the classifier.

/// Returns false for paths with dot segments, encoded separators or
/// backslashes.
///
/// Percent-encoded dots (`%2e`) count as dots; `%2f` and `%5c` are rejected
/// anywhere in the path.
pub fn is_canonical(path: &str) -> bool {
    if path.contains('\\') {
        return false;
    }

    let lowered = path.to_ascii_lowercase();
    if lowered.contains("%2f") || lowered.contains("%5c") {
        return false;
    }

    !lowered
        .split('/')
        .map(|segment| segment.replace("%2e", "."))
        .any(|segment| segment == "." || segment == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_are_canonical() {
        for path in ["/", "/dashboard", "/sign-in/factor-one", "/v1.2/docs", "/favicon.ico", "/a..b"] {
            assert!(is_canonical(path), "{path}");
        }
    }

    #[test]
    fn test_dot_segments_rejected() {
        for path in [
            "/sign-in/../dashboard",
            "/sign-in/./x",
            "/sign-in/..",
            "/..",
            "/sign-in/%2e%2e/dashboard",
            "/sign-in/%2E./dashboard",
            "/sign-in/.%2e",
            "/es/%2e/x",
        ] {
            assert!(!is_canonical(path), "{path}");
        }
    }

    #[test]
    fn test_encoded_separators_rejected() {
        for path in ["/sign-in/..%2fdashboard", "/sign-in%2F..%2Fdashboard", "/sign-in%5c..", "/sign-in\\..\\x"] {
            assert!(!is_canonical(path), "{path}");
        }
    }
}
