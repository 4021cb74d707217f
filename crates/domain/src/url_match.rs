//! Request path parsing into a `(domain, id, method)` triple.
//!
//! The grammar is `/<domain>/<id>` or `/<domain>/<id>/<method>`. The query
//! string is expected to be split off by the transport; no percent-decoding
//! happens here, so unusual characters pass through literally.

use crate::domain::Domain;

/// Result of matching one request path against one domain prefix.
///
/// `id` and `method` borrow from the matched path. When `valid` is `false`
/// both are empty and the match must not be processed further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlMatch<'a> {
    /// Domain whose prefix was tried.
    pub domain: Domain,
    /// Device identifier, the first segment after the prefix.
    pub id: &'a str,
    /// Method segment; empty means "read state".
    pub method: &'a str,
    /// Whether the path followed the grammar.
    pub valid: bool,
}

impl<'a> UrlMatch<'a> {
    /// Match `path` against the prefix of `domain`.
    ///
    /// Never fails: a prefix mismatch, an empty id, an empty method segment
    /// or any segment past the method all produce an invalid match.
    #[must_use]
    pub fn parse(path: &'a str, domain: Domain) -> Self {
        let Some(rest) = path.strip_prefix(domain.prefix()) else {
            return Self::invalid(domain);
        };

        let mut segments = rest.split('/');
        let id = segments.next().unwrap_or_default();
        if id.is_empty() {
            return Self::invalid(domain);
        }

        let method = match segments.next() {
            None => "",
            Some("") => return Self::invalid(domain),
            Some(method) => method,
        };

        if segments.next().is_some() {
            return Self::invalid(domain);
        }

        Self {
            domain,
            id,
            method,
            valid: true,
        }
    }

    /// Match `path` against whichever domain prefix it starts with.
    ///
    /// Returns `None` when no domain prefix applies at all.
    #[must_use]
    pub fn parse_any(path: &'a str) -> Option<Self> {
        Domain::from_path(path).map(|domain| Self::parse(path, domain))
    }

    /// An invalid match for `domain`.
    #[must_use]
    pub const fn invalid(domain: Domain) -> Self {
        Self {
            domain,
            id: "",
            method: "",
            valid: false,
        }
    }

    /// Whether this match asks for the current state only.
    #[must_use]
    pub fn is_read(&self) -> bool {
        self.valid && self.method.is_empty()
    }
}
