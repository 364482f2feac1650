use std::fmt;
use std::str;

use crate::error::Error;

/// A character set name as used in the `Accept-Charset` header.
///
/// Charset names are case-insensitive; they are stored lowercase so that
/// `UTF-8` and `utf-8` compare equal. The special value `*` is kept as is.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Charset(String);

pub(crate) const ISO_8859_1: &str = "iso-8859-1";

impl Charset {
    /// `ISO-8859-1`, the implicit default of RFC 2616.
    pub fn iso_8859_1() -> Charset {
        Charset(ISO_8859_1.to_owned())
    }

    /// Whether this is the `*` wildcard.
    pub fn is_star(&self) -> bool {
        self.0 == "*"
    }

    /// The lowercase name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_token(s: &str) -> Charset {
        Charset(s.trim().to_ascii_lowercase())
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl str::FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Charset, Error> {
        Ok(Charset::from_token(s))
    }
}

impl PartialEq<str> for Charset {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}
