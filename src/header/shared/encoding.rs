//! Provides an Encoding enum.

use std::fmt;
use std::str;

use crate::error::Error;

pub use self::Encoding::{Brotli, Compress, Deflate, EncodingExt, Gzip, Identity, Star};

/// A value to represent a content-coding used in the `Accept-Encoding`
/// header.
///
/// Codings are case-insensitive and kept lowercase. The legacy `x-gzip` and
/// `x-compress` names read as `gzip` and `compress`, as
/// [RFC2616 Section 3.5](https://tools.ietf.org/html/rfc2616#section-3.5)
/// asks of applications.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Encoding {
    /// The `gzip` encoding.
    Gzip,
    /// The `deflate` encoding.
    Deflate,
    /// The `compress` encoding.
    Compress,
    /// The `br` encoding.
    Brotli,
    /// The `identity` encoding, i.e. no transformation.
    Identity,
    /// The `*` wildcard, any coding not listed elsewhere.
    Star,
    /// Some other encoding that is less common, can be any String.
    EncodingExt(String),
}

impl Encoding {
    /// The canonical name of this coding.
    pub fn as_str(&self) -> &str {
        match *self {
            Gzip => "gzip",
            Deflate => "deflate",
            Compress => "compress",
            Brotli => "br",
            Identity => "identity",
            Star => "*",
            EncodingExt(ref s) => s,
        }
    }

    pub(crate) fn from_token(s: &str) -> Encoding {
        let s = s.trim();
        if s.eq_ignore_ascii_case("gzip") || s.eq_ignore_ascii_case("x-gzip") {
            Gzip
        } else if s.eq_ignore_ascii_case("deflate") {
            Deflate
        } else if s.eq_ignore_ascii_case("compress") || s.eq_ignore_ascii_case("x-compress") {
            Compress
        } else if s.eq_ignore_ascii_case("br") {
            Brotli
        } else if s.eq_ignore_ascii_case("identity") {
            Identity
        } else if s == "*" {
            Star
        } else {
            EncodingExt(s.to_ascii_lowercase())
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Encoding, Error> {
        Ok(Encoding::from_token(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codings() {
        assert_eq!("gzip".parse::<Encoding>().unwrap(), Gzip);
        assert_eq!("GZIP".parse::<Encoding>().unwrap(), Gzip);
        assert_eq!("deflate".parse::<Encoding>().unwrap(), Deflate);
        assert_eq!("br".parse::<Encoding>().unwrap(), Brotli);
        assert_eq!(" identity ".parse::<Encoding>().unwrap(), Identity);
        assert_eq!("*".parse::<Encoding>().unwrap(), Star);
    }

    #[test]
    fn legacy_aliases() {
        assert_eq!("x-gzip".parse::<Encoding>().unwrap(), Gzip);
        assert_eq!("X-Compress".parse::<Encoding>().unwrap(), Compress);
        assert_eq!(Gzip.to_string(), "gzip");
    }

    #[test]
    fn extension_is_lowercased() {
        let enc = "ZSTD".parse::<Encoding>().unwrap();
        assert_eq!(enc, EncodingExt("zstd".to_owned()));
        assert_eq!(enc.as_str(), "zstd");
    }
}
