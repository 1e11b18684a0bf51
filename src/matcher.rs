//! Matching of certificate common names against the queried host.

use regex::{Regex, RegexBuilder};

/// Replacement for a leading `*.` label: one label, optionally followed by
/// more labels, then the dot that separated the wildcard from the rest.
const WILDCARD_LABEL: &str = r"[a-z0-9-]+(\.[a-z0-9-]+)*\.";

/// A compiled common-name pattern.
///
/// The name is matched literally and in full. A leading `*.` stands for any
/// subdomain label. Note that `*.example.com` also accepts
/// `foo.bar.example.com`, which is more lenient than RFC 6125 wildcards.
/// Comparison ignores ASCII case.
#[derive(Debug, Clone)]
pub struct CommonNamePattern {
    regex: Regex,
}

impl CommonNamePattern {
    /// Compiles the pattern for a certificate's common name.
    pub fn new(common_name: &str) -> Result<Self, regex::Error> {
        let pattern = match common_name.strip_prefix("*.") {
            Some(rest) => format!("^{}{}$", WILDCARD_LABEL, regex::escape(rest)),
            None => format!("^{}$", regex::escape(common_name)),
        };
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(CommonNamePattern { regex })
    }

    /// True when the whole of `host` is covered by the common name.
    pub fn matches(&self, host: &str) -> bool {
        self.regex.is_match(host)
    }
}
