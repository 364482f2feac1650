//! Utility functions for Header implementations.
//!
//! Every negotiated header is a comma separated list of weighted elements:
//!
//! ```plain
//! #( token *( OWS ";" OWS parameter ) )
//! parameter = token [ "=" ( token / quoted-string ) ]
//! ```
//!
//! Commas and semicolons inside a quoted-string do not split anything.

use std::cmp::Ordering;

use crate::header::{Quality, QualityItem};

/// One `name=value` parameter of a list element, other than `q`.
///
/// The value is kept verbatim, including surrounding quotes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Param {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
}

/// One parsed list element.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Entry {
    pub(crate) token: String,
    pub(crate) params: Vec<Param>,
    pub(crate) quality: Quality,
    /// Index among the elements kept from the header value.
    pub(crate) order: usize,
}

/// Splits a raw header value into its weighted elements, in the order they
/// appear.
///
/// Parsing is lenient: empty elements are skipped, a malformed `q` counts
/// as `q=1`, and no more than `max_entries` acceptable elements are read.
///
/// Refusals (`q=0`) past the cap are still kept, so a long header can never
/// widen what is acceptable.
pub(crate) fn parse_entries(raw: &str, max_entries: usize) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut accepted = 0;
    let mut capped = false;
    for element in split_unquoted(raw, b',') {
        if let Some(entry) = parse_element(element, entries.len()) {
            if entry.quality.is_acceptable() {
                if accepted == max_entries {
                    if !capped {
                        warn!(
                            "header value has more than {} elements, ignoring the rest but refusals",
                            max_entries
                        );
                        capped = true;
                    }
                    continue;
                }
                accepted += 1;
            }
            entries.push(entry);
        }
    }
    trace!("parsed {} header elements", entries.len());
    entries
}

/// Parses a single list element, such as `text/html;level=1;q=0.5`.
pub(crate) fn parse_element(element: &str, order: usize) -> Option<Entry> {
    let mut parts = split_unquoted(element, b';');
    let token = parts.next().map(str::trim).unwrap_or("");
    if token.is_empty() {
        return None;
    }

    let mut quality = None;
    let mut params = Vec::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, value) = match part.find('=') {
            Some(idx) => (part[..idx].trim(), Some(part[idx + 1..].trim())),
            None => (part, None),
        };
        if name.eq_ignore_ascii_case("q") {
            // the first weight wins, any later `q` is dropped
            if quality.is_none() {
                quality = Some(weight(value.unwrap_or("")));
            }
            continue;
        }
        params.push(Param {
            name: name.to_owned(),
            value: value.map(str::to_owned),
        });
    }

    Some(Entry {
        token: token.to_owned(),
        params,
        quality: quality.unwrap_or_default(),
        order,
    })
}

fn weight(value: &str) -> Quality {
    match Quality::parse_lenient(value) {
        Some(quality) => quality,
        None => {
            debug!("malformed quality value {:?}, using q=1", value);
            Quality::ONE
        }
    }
}

/// Removes the quotes and escapes of a quoted-string. Tokens are returned
/// unchanged.
pub(crate) fn unquote(value: &str) -> String {
    let value = value.trim();
    if !value.starts_with('"') {
        return value.to_owned();
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value[1..].chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '"' => break,
            c => out.push(c),
        }
    }
    out
}

/// Splits `s` on `delim`, except where `delim` is inside a quoted-string.
///
/// An unterminated quoted-string runs to the end of the input.
fn split_unquoted(s: &str, delim: u8) -> SplitUnquoted<'_> {
    SplitUnquoted {
        rest: Some(s),
        delim,
    }
}

struct SplitUnquoted<'a> {
    rest: Option<&'a str>,
    delim: u8,
}

impl<'a> Iterator for SplitUnquoted<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let s = self.rest?;
        let bytes = s.as_bytes();
        let mut quoted = false;
        let mut escaped = false;
        for (i, &b) in bytes.iter().enumerate() {
            if escaped {
                escaped = false;
            } else if quoted && b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                quoted = !quoted;
            } else if !quoted && b == self.delim {
                self.rest = Some(&s[i + 1..]);
                return Some(&s[..i]);
            }
        }
        self.rest = None;
        Some(s)
    }
}

/// The sort key of a ranked element: quality descending, then specificity
/// descending, then position in the header ascending.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Rank<S> {
    pub(crate) quality: Quality,
    pub(crate) specificity: S,
    pub(crate) order: usize,
}

impl<S: Ord> Ord for Rank<S> {
    fn cmp(&self, other: &Rank<S>) -> Ordering {
        other
            .quality
            .cmp(&self.quality)
            .then_with(|| other.specificity.cmp(&self.specificity))
            .then(self.order.cmp(&other.order))
    }
}

impl<S: Ord> PartialOrd for Rank<S> {
    fn partial_cmp(&self, other: &Rank<S>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders items from most to least preferred by their `Rank`.
pub(crate) fn rank<T, S: Ord>(mut keyed: Vec<(Rank<S>, QualityItem<T>)>) -> Vec<QualityItem<T>> {
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Ranks `(order, item)` pairs whose specificity depends on the item alone.
pub(crate) fn rank_by<T, S, F>(items: Vec<(usize, QualityItem<T>)>, specificity: F) -> Vec<QualityItem<T>>
where
    S: Ord,
    F: Fn(&T) -> S,
{
    rank(
        items
            .into_iter()
            .map(|(order, item)| {
                let rank = Rank {
                    quality: item.quality,
                    specificity: specificity(&item.item),
                    order,
                };
                (rank, item)
            })
            .collect(),
    )
}

/// The weight a list gives to whatever `matches` selects.
///
/// A zero weight among the matches refuses outright; otherwise the highest
/// weight applies. `None` means nothing matched.
pub(crate) fn weight_of<T, F>(items: &[QualityItem<T>], matches: F) -> Option<Quality>
where
    F: Fn(&T) -> bool,
{
    let mut found: Option<Quality> = None;
    for item in items.iter().filter(|item| matches(&item.item)) {
        if !item.quality.is_acceptable() {
            return Some(Quality::ZERO);
        }
        found = Some(found.map_or(item.quality, |q| q.max(item.quality)));
    }
    found
}

/// Picks the server candidate the client weighs highest. Ties go to the
/// candidate listed first in `available`.
pub(crate) fn best_match<'a, F>(available: &[&'a str], quality: F) -> Option<&'a str>
where
    F: Fn(&str) -> Quality,
{
    let mut best: Option<(&'a str, Quality)> = None;
    for &candidate in available {
        let q = quality(candidate);
        if !q.is_acceptable() {
            continue;
        }
        match best {
            Some((_, best_q)) if best_q >= q => (),
            _ => best = Some((candidate, q)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
