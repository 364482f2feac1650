use std::str;

use crate::builder::Builder;
use crate::error::Error;
use crate::header::parsing;
use crate::header::{Encoding, Header, Quality, QualityItem};

/// `Accept-Encoding` header, defined in
/// [RFC2616](https://tools.ietf.org/html/rfc2616#section-14.3)
///
/// The `Accept-Encoding` header field can be used by user agents to
/// indicate what response content-codings are acceptable in the response.
/// An `identity` token is used as a synonym for "no encoding" in order to
/// communicate when no encoding is preferred.
///
/// The `identity` coding is always acceptable, unless specifically refused
/// with `identity;q=0`, or because the field includes `*;q=0` and does not
/// list `identity` explicitly. If the field is empty or absent, only
/// `identity` is acceptable.
///
/// # ABNF
///
/// ```text
/// Accept-Encoding  = #( codings [ weight ] )
/// codings          = content-coding / "identity" / "*"
/// ```
///
/// # Example values
/// * `compress, gzip`
/// * ``
/// * `*`
/// * `compress;q=0.5, gzip;q=1.0`
/// * `gzip;q=1.0, identity; q=0.5, *;q=0`
///
/// # Examples
///
/// ```
/// use negotiate::header::{AcceptEncoding, Header};
///
/// let encoding = AcceptEncoding::parse_header(Some("gzip;q=1.0, *;q=0"));
///
/// assert_eq!(encoding.preferred_encoding(), Some("gzip"));
/// assert!(!encoding.is_accepted("identity"));
/// assert!(!encoding.is_accepted("deflate"));
/// ```
#[derive(Clone, Debug)]
pub struct AcceptEncoding {
    raw: Option<String>,
    encodings: Vec<QualityItem<Encoding>>,
    config: Builder,
}

impl AcceptEncoding {
    pub(crate) fn parse_with(raw: Option<&str>, config: &Builder) -> AcceptEncoding {
        let mut items: Vec<(usize, QualityItem<Encoding>)> = config
            .entries(raw)
            .into_iter()
            .map(|entry| {
                let encoding = Encoding::from_token(&entry.token);
                (entry.order, QualityItem::new(encoding, entry.quality))
            })
            .collect();

        let has_identity = items.iter().any(|(_, item)| item.item == Encoding::Identity);
        let star_refuses = items
            .iter()
            .any(|(_, item)| item.item == Encoding::Star && !item.quality.is_acceptable());
        if !has_identity && !star_refuses {
            debug!("Accept-Encoding does not refuse identity, adding it");
            items.push((items.len(), QualityItem::new(Encoding::Identity, Quality::ONE)));
        }

        let encodings = parsing::rank_by(items, |encoding| *encoding != Encoding::Star);
        trace!("Accept-Encoding ranked: {:?}", encodings);

        AcceptEncoding {
            raw: raw.map(str::to_owned),
            encodings,
            config: config.clone(),
        }
    }

    /// The acceptable codings, most preferred first, `identity` included
    /// when it is acceptable by default.
    pub fn encodings(&self) -> impl Iterator<Item = &Encoding> + '_ {
        self.encodings
            .iter()
            .filter(|item| item.quality.is_acceptable())
            .map(|item| &item.item)
    }

    /// The coding the client prefers most.
    ///
    /// `None` only when nothing at all is acceptable, as with `*;q=0`.
    pub fn preferred_encoding(&self) -> Option<&str> {
        self.encodings().next().map(Encoding::as_str)
    }

    /// The weight the client gives to `encoding`.
    ///
    /// A coding listed by name takes its own weight, refusals included.
    /// Otherwise a `*` decides, and without one only `identity` is
    /// acceptable.
    pub fn quality(&self, encoding: &str) -> Quality {
        let encoding = Encoding::from_token(encoding);
        if encoding == Encoding::Star {
            return parsing::weight_of(&self.encodings, |item| *item == Encoding::Star)
                .unwrap_or(Quality::ZERO);
        }
        parsing::weight_of(&self.encodings, |item| *item == encoding)
            .or_else(|| parsing::weight_of(&self.encodings, |item| *item == Encoding::Star))
            .unwrap_or(Quality::ZERO)
    }

    /// Whether `encoding` is acceptable to the client.
    pub fn is_accepted(&self, encoding: &str) -> bool {
        self.quality(encoding).is_acceptable()
    }

    /// Of the codings a server can apply, the one the client prefers.
    ///
    /// Ties go to the coding listed first in `available`.
    pub fn best_match<'a>(&self, available: &[&'a str]) -> Option<&'a str> {
        parsing::best_match(available, |encoding| self.quality(encoding))
    }
}

impl Header for AcceptEncoding {
    fn header_name() -> &'static str {
        "Accept-Encoding"
    }

    fn parse_header(raw: Option<&str>) -> AcceptEncoding {
        AcceptEncoding::parse_with(raw, &Builder::default())
    }

    fn value(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    fn set_value(&mut self, raw: &str) {
        *self = AcceptEncoding::parse_with(Some(raw), &self.config);
    }
}

impl Default for AcceptEncoding {
    fn default() -> AcceptEncoding {
        AcceptEncoding::parse_header(None)
    }
}

impl str::FromStr for AcceptEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<AcceptEncoding, Error> {
        Ok(AcceptEncoding::parse_header(Some(s)))
    }
}
