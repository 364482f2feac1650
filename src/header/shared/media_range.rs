use std::fmt;
use std::str;

use crate::error::Error;
use crate::header::parsing::{self, Param};

/// A `media-range` of the `Accept` header, e.g. `text/html;level=1`,
/// `text/*` or `*/*`.
///
/// Type and subtype compare case-insensitively but keep the spelling they
/// were given. Parameters other than `q` are kept in order, values verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaRange {
    type_: String,
    subtype: String,
    params: Vec<Param>,
}

impl MediaRange {
    /// The top-level type, `*` for any.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The subtype, `*` for any.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Looks up a parameter by name, returning its unquoted value.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_deref().map(parsing::unquote).unwrap_or_default())
    }

    /// The number of parameters, not counting `q`.
    pub fn params_len(&self) -> usize {
        self.params.len()
    }

    /// Whether this range is `*/*`.
    pub fn is_star(&self) -> bool {
        self.type_ == "*" && self.subtype == "*"
    }

    /// How narrowly this range selects media types:
    /// `type/subtype;params` > `type/subtype` > `type/*` > `*/*`.
    pub(crate) fn specificity(&self) -> u8 {
        match (self.type_ == "*", self.subtype == "*") {
            (true, true) => 0,
            (false, false) if !self.params.is_empty() => 3,
            (false, false) => 2,
            _ => 1,
        }
    }

    pub(crate) fn same_type(&self, other: &MediaRange) -> bool {
        self.type_.eq_ignore_ascii_case(&other.type_)
            && self.subtype.eq_ignore_ascii_case(&other.subtype)
    }

    /// Whether the media type `candidate` falls within this range.
    ///
    /// Every parameter of the range must be present on the candidate with
    /// the same value. Extra candidate parameters do not matter.
    pub fn matches(&self, candidate: &MediaRange) -> bool {
        fn part_matches(range: &str, candidate: &str) -> bool {
            range == "*" || range.eq_ignore_ascii_case(candidate)
        }

        part_matches(&self.type_, &candidate.type_)
            && part_matches(&self.subtype, &candidate.subtype)
            && self.params.iter().all(|p| {
                let expected = p.value.as_deref().map(parsing::unquote).unwrap_or_default();
                candidate.param(&p.name).map_or(false, |v| v == expected)
            })
    }

    pub(crate) fn from_parts(token: &str, params: Vec<Param>) -> Option<MediaRange> {
        let (type_, subtype) = if token == "*" {
            ("*", "*")
        } else {
            let mut parts = token.splitn(2, '/');
            let type_ = parts.next()?.trim();
            let subtype = parts.next()?.trim();
            (type_, subtype)
        };
        if type_.is_empty() || subtype.is_empty() || subtype.contains('/') {
            return None;
        }
        Some(MediaRange {
            type_: type_.to_owned(),
            subtype: subtype.to_owned(),
            params,
        })
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for param in &self.params {
            match param.value {
                Some(ref value) => write!(f, ";{}={}", param.name, value)?,
                None => write!(f, ";{}", param.name)?,
            }
        }
        Ok(())
    }
}

/// Parses a single media type or range. A `q` parameter is ignored.
impl str::FromStr for MediaRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<MediaRange, Error> {
        parsing::parse_element(s, 0)
            .and_then(|entry| MediaRange::from_parts(&entry.token, entry.params))
            .ok_or_else(Error::new_media_type)
    }
}
