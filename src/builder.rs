use crate::header::parsing::{self, Entry};
use crate::header::{Accept, AcceptCharset, AcceptEncoding};

/// The default cap on elements read from one header value.
const DEFAULT_MAX_ENTRIES: usize = 100;

/// A builder to configure how header values are parsed.
///
/// `Header::parse_header` uses `Builder::default()`.
///
/// # Example
///
/// ```
/// let mut builder = negotiate::Builder::new();
/// builder.max_entries(16).implicit_iso_8859_1(false);
///
/// let charset = builder.accept_charset("utf-8");
/// assert_eq!(charset.charsets(), ["utf-8"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Builder {
    max_entries: usize,
    implicit_iso_8859_1: bool,
}

impl Builder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Builder {
        Builder {
            max_entries: DEFAULT_MAX_ENTRIES,
            implicit_iso_8859_1: true,
        }
    }

    /// Sets the maximum number of elements read from one header value.
    ///
    /// Further elements are ignored, except refusals (`q=0`), which are
    /// always kept. Default is 100.
    pub fn max_entries(&mut self, max: usize) -> &mut Self {
        self.max_entries = max;
        self
    }

    /// Sets whether `Accept-Charset` treats ISO-8859-1 as acceptable when it
    /// is not mentioned and no `*` is present.
    ///
    /// RFC 2616 requires this; RFC 7231 dropped the rule. Default is `true`.
    pub fn implicit_iso_8859_1(&mut self, enabled: bool) -> &mut Self {
        self.implicit_iso_8859_1 = enabled;
        self
    }

    /// Parses an `Accept` value with this configuration.
    pub fn accept(&self, raw: &str) -> Accept {
        Accept::parse_with(Some(raw), self)
    }

    /// Parses an `Accept-Charset` value with this configuration.
    pub fn accept_charset(&self, raw: &str) -> AcceptCharset {
        AcceptCharset::parse_with(Some(raw), self)
    }

    /// Parses an `Accept-Encoding` value with this configuration.
    pub fn accept_encoding(&self, raw: &str) -> AcceptEncoding {
        AcceptEncoding::parse_with(Some(raw), self)
    }

    pub(crate) fn entries(&self, raw: Option<&str>) -> Vec<Entry> {
        match raw {
            Some(raw) => parsing::parse_entries(raw, self.max_entries),
            None => Vec::new(),
        }
    }

    pub(crate) fn has_implicit_iso_8859_1(&self) -> bool {
        self.implicit_iso_8859_1
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let builder = Builder::default();
        assert_eq!(builder, Builder::new());
        assert!(builder.has_implicit_iso_8859_1());
        assert!(builder.entries(None).is_empty());
    }

    #[test]
    fn max_entries_caps_parsing() {
        let mut builder = Builder::new();
        builder.max_entries(2);
        assert_eq!(builder.entries(Some("a, b, c")).len(), 2);

        let accept = builder.accept("text/html, text/plain, application/json");
        assert!(accept.is_accepted("text/plain"));
        assert!(!accept.is_accepted("application/json"));
    }

    #[test]
    fn builder_config_survives_set_value() {
        use crate::header::Header;

        let mut builder = Builder::new();
        builder.implicit_iso_8859_1(false);
        let mut charset = builder.accept_charset("utf-8");
        charset.set_value("unicode-1-1");
        assert_eq!(charset.charsets(), ["unicode-1-1"]);
    }
}
