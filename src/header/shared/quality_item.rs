//! Provides a struct for quality values.
//!
//! [RFC2616 Section 3.9](https://tools.ietf.org/html/rfc2616#section-3.9)
//! gives more information on quality values in HTTP header fields.

use std::fmt;
use std::str;

use crate::error::Error;

/// Represents a quality used in quality values.
///
/// Can be created with the `q` function.
///
/// # Implementation notes
///
/// The quality value is defined as a number between 0 and 1 with three
/// decimal places. This means there are 1001 possible values. Since floating
/// point numbers are not exact and the smallest floating point data type
/// (`f32`) consumes four bytes, an `u16` value stores the quality
/// internally, so equal weights always compare equal. `q(532)` matches the
/// quality `q=0.532`.
///
/// [RFC2616 Section 3.9](https://tools.ietf.org/html/rfc2616#section-3.9)
/// gives more information on quality values in HTTP header fields.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Quality(u16);

impl Quality {
    /// `q=0`, "not acceptable".
    pub const ZERO: Quality = Quality(0);
    /// `q=1`, the default weight.
    pub const ONE: Quality = Quality(1000);

    /// The weight in thousandths, between 0 and 1000.
    pub fn thousandths(self) -> u16 {
        self.0
    }

    /// Whether this weight marks a value as acceptable at all.
    pub fn is_acceptable(self) -> bool {
        self.0 > 0
    }

    /// Reads a weight with the lenient grammar used for incoming headers:
    /// `DIGITS [ "." DIGITS ]`, at most 1, extra decimals truncated.
    ///
    /// Returns `None` for anything else; callers fall back to `q=1`.
    pub(crate) fn parse_lenient(s: &str) -> Option<Quality> {
        parse_thousandths(s.trim(), usize::max_value()).map(Quality)
    }
}

impl Default for Quality {
    fn default() -> Quality {
        Quality::ONE
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            x => {
                let digits = format!("{:03}", x);
                write!(f, "0.{}", digits.trim_end_matches('0'))
            }
        }
    }
}

/// Parses the strict RFC grammar:
/// `( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )`.
impl str::FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Quality, Error> {
        let mut parts = s.splitn(2, '.');
        match parts.next() {
            Some("0") | Some("1") => (),
            _ => return Err(Error::new_quality()),
        }
        parse_thousandths(s, 3)
            .map(Quality)
            .ok_or_else(Error::new_quality)
    }
}

fn parse_thousandths(s: &str, max_decimals: usize) -> Option<u16> {
    let mut parts = s.splitn(2, '.');
    let int = parts.next().unwrap_or("");
    let frac = parts.next();

    if int.is_empty() || !int.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let int = int.trim_start_matches('0');
    let whole: u16 = match int {
        "" => 0,
        "1" => 1,
        _ => return None,
    };

    let mut thousandths = 0u16;
    if let Some(frac) = frac {
        if frac.len() > max_decimals || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut scale = 100;
        for b in frac.bytes().take(3) {
            thousandths += u16::from(b - b'0') * scale;
            scale /= 10;
        }
    }

    if whole == 1 && thousandths > 0 {
        return None;
    }
    Some(whole * 1000 + thousandths)
}

/// Convenience function to create a `Quality` from a value between 0 and 1000.
///
/// # Panics
///
/// Panics if `val` is greater than 1000.
pub fn q(val: u16) -> Quality {
    assert!(val <= 1000, "quality must be between 0 and 1000, got {}", val);
    Quality(val)
}

/// Represents an item with a quality value as defined in
/// [RFC2616](https://tools.ietf.org/html/rfc2616#section-3.9).
#[derive(Clone, Debug, PartialEq)]
pub struct QualityItem<T> {
    /// The actual contents of the field.
    pub item: T,
    /// The quality (client or server preference) for the value.
    pub quality: Quality,
}

impl<T> QualityItem<T> {
    /// Creates a new `QualityItem` from an item and a quality.
    /// The item can be of any type.
    pub fn new(item: T, quality: Quality) -> QualityItem<T> {
        QualityItem { item, quality }
    }
}

impl<T: fmt::Display> fmt::Display for QualityItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.item, f)?;
        if self.quality == Quality::ONE {
            Ok(())
        } else {
            write!(f, ";q={}", self.quality)
        }
    }
}

/// Convenience function to wrap a value in a `QualityItem`.
/// Sets `q` to the default 1.0
pub fn qitem<T>(item: T) -> QualityItem<T> {
    QualityItem::new(item, Quality::ONE)
}
