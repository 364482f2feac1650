use std::cmp::Reverse;
use std::str;

use crate::builder::Builder;
use crate::error::Error;
use crate::header::parsing::{self, Rank};
use crate::header::{Header, MediaRange, Quality, QualityItem};

/// `Accept` header, defined in
/// [RFC2616](https://tools.ietf.org/html/rfc2616#section-14.1)
///
/// The `Accept` header field can be used by user agents to specify
/// response media types that are acceptable. Accept header fields can
/// be used to indicate that the request is specifically limited to a
/// small set of desired types, as in the case of a request for an
/// in-line image.
///
/// # ABNF
///
/// ```text
/// Accept = #( media-range [ accept-params ] )
///
/// media-range    = ( "*/*"
///                  / ( type "/" "*" )
///                  / ( type "/" subtype )
///                  ) *( OWS ";" OWS parameter )
/// accept-params  = weight *( accept-ext )
/// accept-ext = OWS ";" OWS token [ "=" ( token / quoted-string ) ]
/// ```
///
/// # Example values
/// * `audio/*; q=0.2, audio/basic`
/// * `text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c`
///
/// # Examples
///
/// ```
/// use negotiate::header::{Accept, Header};
///
/// let accept = Accept::parse_header(Some("audio/*; q=0.2, audio/basic"));
///
/// assert_eq!(accept.types().collect::<Vec<_>>(), ["audio/basic", "audio/*"]);
/// assert_eq!(accept.preferred_type().as_deref(), Some("audio/basic"));
/// assert!(accept.is_accepted("audio/mpeg"));
/// assert!(!accept.is_accepted("video/mpeg"));
/// ```
///
/// Unlike `Accept-Charset` and `Accept-Encoding`, there is no implicit
/// default: a media type no range matches is not acceptable.
#[derive(Clone, Debug)]
pub struct Accept {
    raw: Option<String>,
    ranges: Vec<QualityItem<MediaRange>>,
    config: Builder,
}

impl Accept {
    pub(crate) fn parse_with(raw: Option<&str>, config: &Builder) -> Accept {
        let items: Vec<(usize, QualityItem<MediaRange>)> = config
            .entries(raw)
            .into_iter()
            .filter_map(|entry| {
                let quality = entry.quality;
                match MediaRange::from_parts(&entry.token, entry.params) {
                    Some(range) => Some((entry.order, QualityItem::new(range, quality))),
                    None => {
                        trace!("ignoring invalid media range {:?}", entry.token);
                        None
                    }
                }
            })
            .collect();
        let ranks: Vec<_> = items
            .iter()
            .map(|&(order, ref item)| rank_key(&items, order, item))
            .collect();
        let ranges = parsing::rank(ranks.into_iter().zip(items.into_iter().map(|(_, item)| item)).collect());
        trace!("Accept ranked: {:?}", ranges);

        Accept {
            raw: raw.map(str::to_owned),
            ranges,
            config: config.clone(),
        }
    }

    /// The media ranges formatted as `type/subtype[;params]`, most
    /// preferred first.
    ///
    /// Ranges with `q=0` are refusals and are not listed. Each call starts a
    /// new iteration.
    pub fn types(&self) -> impl Iterator<Item = String> + '_ {
        self.ranges
            .iter()
            .filter(|range| range.quality.is_acceptable())
            .map(|range| range.item.to_string())
    }

    /// All parsed media ranges with their weights, most preferred first,
    /// refusals included.
    pub fn media_ranges(&self) -> &[QualityItem<MediaRange>] {
        &self.ranges
    }

    /// The media range the client prefers most, formatted.
    pub fn preferred_type(&self) -> Option<String> {
        self.types().next()
    }

    /// The weight the client gives to the media type `mime`.
    ///
    /// The most specific matching range decides. A `q=0` range wins over an
    /// equally specific positive one. A media type that cannot be parsed
    /// gets no weight.
    pub fn quality(&self, mime: &str) -> Quality {
        let candidate = match mime.parse::<MediaRange>() {
            Ok(candidate) => candidate,
            Err(_) => {
                trace!("cannot negotiate invalid media type {:?}", mime);
                return Quality::ZERO;
            }
        };

        let specificity = self
            .ranges
            .iter()
            .filter(|range| range.item.matches(&candidate))
            .map(|range| range.item.specificity())
            .max();

        specificity
            .and_then(|specificity| {
                parsing::weight_of(&self.ranges, |range| {
                    range.specificity() == specificity && range.matches(&candidate)
                })
            })
            .unwrap_or(Quality::ZERO)
    }

    /// Whether the media type `mime` is acceptable to the client.
    pub fn is_accepted(&self, mime: &str) -> bool {
        self.quality(mime).is_acceptable()
    }

    /// Of the media types a server can produce, the one the client prefers.
    ///
    /// Ties go to the type listed first in `available`.
    pub fn best_match<'a>(&self, available: &[&'a str]) -> Option<&'a str> {
        parsing::best_match(available, |mime| self.quality(mime))
    }
}

type Specificity = (u8, Reverse<usize>, usize);

// Parameters only make a range more specific than the same type/subtype
// without them. Exact ranges of one type/subtype and weight are ranked
// together, at the position of the first of them.
fn rank_key(
    items: &[(usize, QualityItem<MediaRange>)],
    order: usize,
    item: &QualityItem<MediaRange>,
) -> Rank<Specificity> {
    let range = &item.item;
    let level = range.specificity().min(2);
    let group = if level == 2 {
        items
            .iter()
            .filter(|(_, other)| other.quality == item.quality && other.item.same_type(range))
            .map(|&(other_order, _)| other_order)
            .min()
            .unwrap_or(order)
    } else {
        order
    };
    Rank {
        quality: item.quality,
        specificity: (level, Reverse(group), range.params_len()),
        order,
    }
}

impl Header for Accept {
    fn header_name() -> &'static str {
        "Accept"
    }

    fn parse_header(raw: Option<&str>) -> Accept {
        Accept::parse_with(raw, &Builder::default())
    }

    fn value(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    fn set_value(&mut self, raw: &str) {
        *self = Accept::parse_with(Some(raw), &self.config);
    }
}

impl Default for Accept {
    fn default() -> Accept {
        Accept::parse_header(None)
    }
}

impl str::FromStr for Accept {
    type Err = Error;

    fn from_str(s: &str) -> Result<Accept, Error> {
        Ok(Accept::parse_header(Some(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::q;

    fn types(raw: &str) -> Vec<String> {
        Accept::parse_header(Some(raw)).types().collect()
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(types("text/html"), ["text/html"]);
        assert_eq!(types("text/html; q=0.2"), ["text/html"]);
        assert_eq!(types("text/html;level=1"), ["text/html;level=1"]);
    }

    #[test]
    fn test_parse_extension_and_quality() {
        assert_eq!(types(r#"text/html;josh="hello";q=0.1"#), [r#"text/html;josh="hello""#]);
        assert_eq!(types(r#"text/html;josh="hello"; q=0.1"#), [r#"text/html;josh="hello""#]);
    }

    #[test]
    fn test_parse_multiple() {
        assert_eq!(
            types("text/html, text/xml;level=1, text/*"),
            ["text/html", "text/xml;level=1", "text/*"]
        );
        assert_eq!(
            types("text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c"),
            ["text/html", "text/x-c", "text/x-dvi", "text/plain"]
        );
    }

    #[test]
    fn test_specificity_breaks_ties() {
        assert_eq!(
            types("text/*, text/html, text/html;level=1, */*"),
            ["text/html;level=1", "text/html", "text/*", "*/*"]
        );
    }

    #[test]
    fn test_params_rank_within_same_type() {
        assert_eq!(
            types("text/html;q=0.5, text/xml, text/html;level=1"),
            ["text/xml", "text/html;level=1", "text/html"]
        );
        assert_eq!(
            types("text/html, application/json, text/html;a=1;b=2, text/html;a=1"),
            ["text/html;a=1;b=2", "text/html;a=1", "text/html", "application/json"]
        );
    }

    #[test]
    fn test_browser_header() {
        let raw = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8,application/json";
        assert_eq!(
            types(raw),
            ["text/html", "application/xhtml+xml", "application/json", "application/xml", "*/*"]
        );
    }

    #[test]
    fn test_refusal_not_listed_but_applied() {
        let accept = Accept::parse_header(Some("text/*, text/plain;q=0"));
        assert_eq!(accept.types().collect::<Vec<_>>(), ["text/*"]);
        assert_eq!(accept.media_ranges().len(), 2);
        assert!(accept.is_accepted("text/html"));
        assert!(!accept.is_accepted("text/plain"));
    }

    #[test]
    fn test_zero_wins_equal_specificity() {
        let accept = Accept::parse_header(Some("text/html, text/html;q=0"));
        assert!(!accept.is_accepted("text/html"));
    }

    #[test]
    fn test_rfc_quality_example() {
        // RFC 2616 section 14.1
        let accept = Accept::parse_header(Some(
            "text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5",
        ));
        assert_eq!(accept.quality("text/html;level=1"), Quality::ONE);
        assert_eq!(accept.quality("text/html"), q(700));
        assert_eq!(accept.quality("text/plain"), q(300));
        assert_eq!(accept.quality("image/jpeg"), q(500));
        assert_eq!(accept.quality("text/html;level=2"), q(400));
        assert_eq!(accept.quality("text/html;level=3"), q(700));
    }

    #[test]
    fn test_no_implicit_default() {
        let accept = Accept::parse_header(Some("application/json"));
        assert!(!accept.is_accepted("text/html"));

        let accept = Accept::default();
        assert_eq!(accept.value(), None);
        assert_eq!(accept.preferred_type(), None);
        assert!(!accept.is_accepted("text/html"));
    }

    #[test]
    fn test_invalid_candidate_and_ranges() {
        let accept = Accept::parse_header(Some("html, */*"));
        assert_eq!(accept.types().collect::<Vec<_>>(), ["*/*"]);
        assert!(!accept.is_accepted("html"));
        assert!(accept.is_accepted("text/html"));
    }

    #[test]
    fn test_bare_star() {
        let accept = Accept::parse_header(Some("*"));
        assert_eq!(accept.preferred_type().as_deref(), Some("*/*"));
    }

    #[test]
    fn test_preferred_none_when_all_refused() {
        let accept = Accept::parse_header(Some("text/html;q=0, */*;q=0"));
        assert_eq!(accept.preferred_type(), None);
        assert!(!accept.is_accepted("image/png"));
    }

    #[test]
    fn test_best_match() {
        let accept = Accept::parse_header(Some("application/json, text/html;q=0.9, */*;q=0.1"));
        assert_eq!(accept.best_match(&["text/html", "application/json"]), Some("application/json"));
        assert_eq!(accept.best_match(&["image/png", "text/html"]), Some("text/html"));
        assert_eq!(accept.best_match(&["image/png", "image/gif"]), Some("image/png"));

        let accept = Accept::parse_header(Some("application/json"));
        assert_eq!(accept.best_match(&["text/html"]), None);
    }

    #[test]
    fn test_types_restartable() {
        let accept = Accept::parse_header(Some("audio/*; q=0.2, audio/basic"));
        let first: Vec<String> = accept.types().collect();
        let second: Vec<String> = accept.types().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_value_replaces() {
        let mut accept = Accept::parse_header(Some("text/html"));
        accept.set_value("application/json");
        assert_eq!(accept.value(), Some("application/json"));
        assert_eq!(accept.types().collect::<Vec<_>>(), ["application/json"]);
        assert!(!accept.is_accepted("text/html"));
    }

    #[test]
    fn test_from_str() {
        let accept: Accept = "text/plain".parse().unwrap();
        assert!(accept.is_accepted("text/plain"));
    }
}
