//! Typed negotiation headers.
//!
//! Every header in this module stores the raw field value it was built from
//! and derives its structured, ranked state from it. To read a header, an
//! object implements the `Header` trait. The three content negotiation
//! headers of RFC 2616 are provided: `Accept`, `AcceptCharset` and
//! `AcceptEncoding`.
//!
//! # Why Typed?
//!
//! The rules for weighting, wildcards and implicit defaults differ per
//! header, and they are easy to get subtly wrong. Each type answers "is this
//! acceptable?" and "what does the client prefer?" for its own domain.
//!
//! # Defining Custom Headers
//!
//! Only `header_name`, `parse_header` and `value` have to be written; a
//! header with no structure of its own just keeps the raw string.
//!
//! ```
//! use negotiate::header::Header;
//!
//! #[derive(Debug, Clone)]
//! struct XRequestGuid(Option<String>);
//!
//! impl Header for XRequestGuid {
//!     fn header_name() -> &'static str {
//!         "X-Request-Guid"
//!     }
//!
//!     fn parse_header(raw: Option<&str>) -> XRequestGuid {
//!         XRequestGuid(raw.map(str::to_owned))
//!     }
//!
//!     fn value(&self) -> Option<&str> {
//!         self.0.as_deref()
//!     }
//! }
//!
//! let mut guid = XRequestGuid::parse_header(None);
//! assert_eq!(guid.value(), None);
//! guid.set_value("a proper guid");
//! assert_eq!(guid.value(), Some("a proper guid"));
//! ```
use std::borrow::Cow;

use http::{HeaderMap, HeaderValue};

use crate::error::{Error, Result};

pub use self::common::*;
pub use self::shared::*;

mod common;
pub(crate) mod parsing;
mod shared;

/// A trait for any object that will represent a header field and value.
///
/// A header is built from an optional raw value: `None` means the field was
/// not sent at all, which is different from an empty value for some
/// headers.
pub trait Header: Sized {
    /// Returns the name of the header field this belongs to.
    fn header_name() -> &'static str;

    /// Builds a header from its raw field value.
    ///
    /// This never fails; malformed input degrades to the header's default
    /// reading of it.
    fn parse_header(raw: Option<&str>) -> Self;

    /// The raw value this header was built from, `None` if unset.
    fn value(&self) -> Option<&str>;

    /// Replaces the raw value, re-deriving all structured state from it.
    fn set_value(&mut self, raw: &str) {
        *self = Self::parse_header(Some(raw));
    }

    /// Builds a header from a single `http::HeaderValue`.
    ///
    /// Fails if the value is not visible ASCII.
    fn from_header_value(value: &HeaderValue) -> Result<Self> {
        let raw = value.to_str().map_err(Error::new_header_value)?;
        Ok(Self::parse_header(Some(raw)))
    }

    /// Finds this header in a `HeaderMap`.
    ///
    /// Several field lines of the same name are combined into one list, as
    /// if they had been sent comma separated. Values that are not visible
    /// ASCII are read lossily rather than rejected.
    fn from_headers(headers: &HeaderMap) -> Self {
        let raw = combined_value(headers, Self::header_name());
        Self::parse_header(raw.as_deref())
    }
}

pub(crate) fn combined_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    let mut combined: Option<Cow<'a, str>> = None;
    for value in headers.get_all(name).iter() {
        let line = match value.to_str() {
            Ok(s) => Cow::Borrowed(s),
            Err(_) => {
                warn!("{} header is not visible ASCII, decoding lossily", name);
                String::from_utf8_lossy(value.as_bytes())
            }
        };
        combined = Some(match combined {
            None => line,
            Some(prev) => Cow::Owned(format!("{}, {}", prev, line)),
        });
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{ACCEPT, ACCEPT_ENCODING};

    #[test]
    fn test_combined_value_absent() {
        let headers = HeaderMap::new();
        assert_eq!(combined_value(&headers, "Accept"), None);
    }

    #[test]
    fn test_combined_value_joins_lines() {
        let mut headers = HeaderMap::new();
        headers.append(ACCEPT, HeaderValue::from_static("text/html"));
        headers.append(ACCEPT, HeaderValue::from_static("application/json;q=0.5"));
        assert_eq!(
            combined_value(&headers, "accept").as_deref(),
            Some("text/html, application/json;q=0.5")
        );
    }

    #[test]
    fn test_combined_value_lossy() {
        let _ = pretty_env_logger::try_init();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_bytes(b"gzip, caf\xe9").unwrap());
        let value = combined_value(&headers, "Accept-Encoding").unwrap();
        assert!(value.starts_with("gzip, caf"));
    }

    #[test]
    fn test_from_header_value_rejects_opaque_bytes() {
        let value = HeaderValue::from_bytes(b"gzip, caf\xe9").unwrap();
        let err = AcceptEncoding::from_header_value(&value).unwrap_err();
        assert!(err.is_header_value());
    }
}
