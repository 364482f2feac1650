use std::str;

use crate::builder::Builder;
use crate::error::Error;
use crate::header::parsing;
use crate::header::{Charset, Header, Quality, QualityItem, ISO_8859_1};

/// `Accept-Charset` header, defined in
/// [RFC2616](https://tools.ietf.org/html/rfc2616#section-14.2)
///
/// The `Accept-Charset` header field can be sent by a user agent to
/// indicate what charsets are acceptable in textual response content.
/// This field allows user agents capable of understanding more
/// comprehensive or special-purpose charsets to signal that capability
/// to an origin server that is capable of representing information in
/// those charsets.
///
/// The special value `*` matches every charset (including ISO-8859-1)
/// not mentioned elsewhere in the field. If no `*` is present, every
/// charset not mentioned gets `q=0`, except ISO-8859-1, which gets `q=1`.
///
/// # ABNF
///
/// ```text
/// Accept-Charset = 1#( ( charset / "*" ) [ weight ] )
/// ```
///
/// # Example values
/// * `iso-8859-5, unicode-1-1;q=0.8`
///
/// # Examples
///
/// ```
/// use negotiate::header::{AcceptCharset, Header};
///
/// let charset = AcceptCharset::parse_header(Some("iso-8859-5, unicode-1-1;q=0.8"));
///
/// assert_eq!(charset.charsets(), ["iso-8859-5", "iso-8859-1", "unicode-1-1"]);
/// assert_eq!(charset.preferred_charset(), Some("iso-8859-5"));
/// assert!(charset.is_accepted("ISO-8859-1"));
/// assert!(!charset.is_accepted("utf-8"));
/// ```
#[derive(Clone, Debug)]
pub struct AcceptCharset {
    raw: Option<String>,
    charsets: Vec<QualityItem<Charset>>,
    config: Builder,
}

impl AcceptCharset {
    pub(crate) fn parse_with(raw: Option<&str>, config: &Builder) -> AcceptCharset {
        let mut items: Vec<(usize, QualityItem<Charset>)> = config
            .entries(raw)
            .into_iter()
            .map(|entry| {
                let charset = Charset::from_token(&entry.token);
                (entry.order, QualityItem::new(charset, entry.quality))
            })
            .collect();

        let has_star = items.iter().any(|(_, item)| item.item.is_star());
        let has_iso = items.iter().any(|(_, item)| item.item == *ISO_8859_1);
        if config.has_implicit_iso_8859_1() && !has_star && !has_iso {
            debug!("Accept-Charset has no '*', adding implicit iso-8859-1");
            items.push((items.len(), QualityItem::new(Charset::iso_8859_1(), Quality::ONE)));
        }

        let charsets = parsing::rank_by(items, |charset| !charset.is_star());
        trace!("Accept-Charset ranked: {:?}", charsets);

        AcceptCharset {
            raw: raw.map(str::to_owned),
            charsets,
            config: config.clone(),
        }
    }

    /// The acceptable charsets, lowercase, most preferred first.
    ///
    /// Includes the implicit ISO-8859-1 when it applies. Charsets refused
    /// with `q=0` are not listed; see `charset_items` for the full sequence.
    pub fn charsets(&self) -> Vec<&str> {
        self.charsets
            .iter()
            .filter(|item| item.quality.is_acceptable())
            .map(|item| item.item.as_str())
            .collect()
    }

    /// All charsets with their weights, most preferred first, refusals and
    /// the implicit ISO-8859-1 included.
    pub fn charset_items(&self) -> &[QualityItem<Charset>] {
        &self.charsets
    }

    /// The charset the client prefers most.
    pub fn preferred_charset(&self) -> Option<&str> {
        self.charsets
            .iter()
            .find(|item| item.quality.is_acceptable())
            .map(|item| item.item.as_str())
    }

    /// The weight the client gives to `charset`, compared case-insensitively.
    ///
    /// A charset listed by name takes its own weight, refusals included.
    /// Otherwise a `*` decides.
    pub fn quality(&self, charset: &str) -> Quality {
        let charset = charset.trim();
        parsing::weight_of(&self.charsets, |item| !item.is_star() && *item == *charset)
            .or_else(|| parsing::weight_of(&self.charsets, Charset::is_star))
            .unwrap_or(Quality::ZERO)
    }

    /// Whether `charset` is acceptable to the client.
    pub fn is_accepted(&self, charset: &str) -> bool {
        self.quality(charset).is_acceptable()
    }

    /// Of the charsets a server can produce, the one the client prefers.
    ///
    /// Ties go to the charset listed first in `available`.
    pub fn best_match<'a>(&self, available: &[&'a str]) -> Option<&'a str> {
        parsing::best_match(available, |charset| self.quality(charset))
    }
}

impl Header for AcceptCharset {
    fn header_name() -> &'static str {
        "Accept-Charset"
    }

    fn parse_header(raw: Option<&str>) -> AcceptCharset {
        AcceptCharset::parse_with(raw, &Builder::default())
    }

    fn value(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    fn set_value(&mut self, raw: &str) {
        *self = AcceptCharset::parse_with(Some(raw), &self.config);
    }
}

impl Default for AcceptCharset {
    fn default() -> AcceptCharset {
        AcceptCharset::parse_header(None)
    }
}

impl str::FromStr for AcceptCharset {
    type Err = Error;

    fn from_str(s: &str) -> Result<AcceptCharset, Error> {
        Ok(AcceptCharset::parse_header(Some(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::q;

    fn parse(raw: &str) -> AcceptCharset {
        AcceptCharset::parse_header(Some(raw))
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(parse("ISO-8859-1").charsets(), ["iso-8859-1"]);
        assert_eq!(parse("ISO-8859-1; q=0.2").charsets(), ["iso-8859-1"]);
        assert_eq!(parse("UTF-8").charsets(), ["utf-8", "iso-8859-1"]);
    }

    #[test]
    fn test_parse_multiple() {
        // rfc 2616 example
        assert_eq!(
            parse("iso-8859-5, unicode-1-1;q=0.8").charsets(),
            ["iso-8859-5", "iso-8859-1", "unicode-1-1"]
        );
        assert_eq!(parse("UTF-8,*").charsets(), ["utf-8", "*"]);
    }

    #[test]
    fn test_star_ranks_below_names() {
        assert_eq!(parse("*, utf-8").charsets(), ["utf-8", "*"]);
    }

    #[test]
    fn test_preferred() {
        assert_eq!(parse("iso-8859-5, unicode-1-1;q=0.8").preferred_charset(), Some("iso-8859-5"));
        assert_eq!(parse("unicode-1-1;q=0.8").preferred_charset(), Some("iso-8859-1"));
        assert_eq!(parse("*;q=0").preferred_charset(), None);
    }

    #[test]
    fn test_is_accepted() {
        assert!(parse("*").is_accepted("utf-8"));

        let charset = parse("iso-8859-5, unicode-1-1;q=0.8");
        assert!(charset.is_accepted("unicode-1-1"));
        assert!(charset.is_accepted("ISO-8859-5"));
        assert!(charset.is_accepted("iso-8859-1"));
        assert!(!charset.is_accepted("utf-8"));
    }

    #[test]
    fn test_explicit_refusal() {
        let charset = parse("*, utf-16;q=0");
        assert!(!charset.is_accepted("utf-16"));
        assert!(charset.is_accepted("utf-8"));
        assert_eq!(charset.charsets(), ["*"]);

        let charset = parse("utf-8, iso-8859-1;q=0");
        assert!(!charset.is_accepted("iso-8859-1"));
        assert_eq!(charset.charsets(), ["utf-8"]);
    }

    #[test]
    fn test_charset_items_keep_refusals() {
        let charset = parse("utf-16;q=0, utf-8;q=0.5");
        let items: Vec<(&str, Quality)> = charset
            .charset_items()
            .iter()
            .map(|item| (item.item.as_str(), item.quality))
            .collect();
        assert_eq!(
            items,
            [("iso-8859-1", Quality::ONE), ("utf-8", q(500)), ("utf-16", Quality::ZERO)]
        );
    }

    #[test]
    fn test_star_zero_refuses_iso() {
        let charset = parse("utf-8, *;q=0");
        assert!(!charset.is_accepted("iso-8859-1"));
        assert!(!charset.is_accepted("koi8-r"));
        assert!(charset.is_accepted("utf-8"));
    }

    #[test]
    fn test_quality() {
        let charset = parse("utf-8;q=0.7, *;q=0.3");
        assert_eq!(charset.quality("UTF-8"), q(700));
        assert_eq!(charset.quality("latin2"), q(300));
    }

    #[test]
    fn test_unset_and_empty() {
        let charset = AcceptCharset::default();
        assert_eq!(charset.value(), None);
        assert_eq!(charset.charsets(), ["iso-8859-1"]);

        let charset = parse("");
        assert_eq!(charset.value(), Some(""));
        assert_eq!(charset.preferred_charset(), Some("iso-8859-1"));
    }

    #[test]
    fn test_without_implicit_default() {
        let mut builder = Builder::new();
        builder.implicit_iso_8859_1(false);
        let charset = builder.accept_charset("utf-8");
        assert_eq!(charset.charsets(), ["utf-8"]);
        assert!(!charset.is_accepted("iso-8859-1"));
    }

    #[test]
    fn test_best_match() {
        let charset = parse("utf-8;q=0.9, iso-8859-5");
        assert_eq!(charset.best_match(&["utf-8", "iso-8859-5"]), Some("iso-8859-5"));
        assert_eq!(charset.best_match(&["utf-16", "ISO-8859-1"]), Some("ISO-8859-1"));
        assert_eq!(charset.best_match(&["utf-16"]), None);
    }

    #[test]
    fn test_idempotent() {
        let raw = "iso-8859-5, unicode-1-1;q=0.8, *;q=0.1";
        assert_eq!(parse(raw).charsets(), parse(raw).charsets());
    }
}
