//! # Origin Policy
//!
//! Decides whether a request's declared origin may receive a cross-origin
//! response. The allow-list is an explicit, closed set; a missing origin
//! header is treated as same-origin and passes with no echo.

use crate::error::{CheckoutError, CheckoutResult};

/// Closed allow-list of origins permitted for checkout
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    /// Build from configured origin strings. Each source may hold one origin
    /// or a comma-joined list; entries are trimmed and empties dropped.
    /// Duplicates are harmless.
    pub fn from_sources(primary: Option<&str>, extra: Option<&str>) -> Self {
        let allowed = [primary, extra]
            .into_iter()
            .flatten()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self { allowed }
    }

    /// Build from an explicit list (tests, embedding)
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// Resolve a declared origin against the allow-list.
    ///
    /// Returns the origin to echo in the allow-origin header, or `None` for
    /// same-origin requests. Fails `server_origin_misconfigured` when an
    /// origin is declared but the allow-list is empty, `origin_not_allowed`
    /// when the origin is not listed.
    pub fn resolve(&self, declared: Option<&str>) -> CheckoutResult<Option<String>> {
        let declared = match declared.filter(|o| !o.is_empty()) {
            None => return Ok(None),
            Some(origin) => origin,
        };

        if self.allowed.is_empty() {
            return Err(CheckoutError::ServerOriginMisconfigured);
        }

        if !self.is_allowed(declared) {
            return Err(CheckoutError::OriginNotAllowed);
        }

        Ok(Some(declared.to_string()))
    }

    /// Infallible echo for error responses: an origin can be allowed for
    /// CORS purposes even when the request itself is rejected.
    pub fn echo(&self, declared: Option<&str>) -> Option<String> {
        declared
            .filter(|origin| self.is_allowed(origin))
            .map(String::from)
    }

    fn is_allowed(&self, origin: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == origin)
    }
}
