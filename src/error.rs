//! Error and Result module.
use std::error::Error as StdError;
use std::fmt;

/// Result type returned from the strict parsing methods of this crate.
pub type Result<T> = std::result::Result<T, Error>;

type Cause = Box<dyn StdError + Send + Sync>;

/// Represents errors that can occur when strictly parsing header values.
///
/// The negotiation queries themselves never return an `Error`: malformed
/// input degrades to the documented defaults instead.
pub struct Error {
    inner: Box<ErrorImpl>,
}

struct ErrorImpl {
    kind: Kind,
    cause: Option<Cause>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Kind {
    Parse(Parse),
}

#[derive(Debug, PartialEq)]
pub(crate) enum Parse {
    /// A `q` value outside the RFC qvalue grammar.
    Quality,
    /// A media range without a `type/subtype` pair.
    MediaType,
    /// A header value that is not visible ASCII.
    HeaderValue,
}

impl Error {
    /// Returns true if this was an invalid quality value.
    pub fn is_quality(&self) -> bool {
        self.inner.kind == Kind::Parse(Parse::Quality)
    }

    /// Returns true if this was an invalid media type.
    pub fn is_media_type(&self) -> bool {
        self.inner.kind == Kind::Parse(Parse::MediaType)
    }

    /// Returns true if a raw header value could not be read as a string.
    pub fn is_header_value(&self) -> bool {
        self.inner.kind == Kind::Parse(Parse::HeaderValue)
    }

    /// Consumes the error, returning its cause.
    pub fn into_cause(self) -> Option<Box<dyn StdError + Send + Sync>> {
        self.inner.cause
    }

    pub(crate) fn new(kind: Kind, cause: Option<Cause>) -> Error {
        Error {
            inner: Box::new(ErrorImpl { kind, cause }),
        }
    }

    pub(crate) fn new_quality() -> Error {
        Error::new(Kind::Parse(Parse::Quality), None)
    }

    pub(crate) fn new_media_type() -> Error {
        Error::new(Kind::Parse(Parse::MediaType), None)
    }

    pub(crate) fn new_header_value<E: Into<Cause>>(cause: E) -> Error {
        Error::new(Kind::Parse(Parse::HeaderValue), Some(cause.into()))
    }

    fn description(&self) -> &str {
        match self.inner.kind {
            Kind::Parse(Parse::Quality) => "invalid quality value",
            Kind::Parse(Parse::MediaType) => "invalid media type",
            Kind::Parse(Parse::HeaderValue) => "header value is not visible ASCII",
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("Error");
        f.field("kind", &self.inner.kind);
        if let Some(ref cause) = self.inner.cause {
            f.field("cause", cause);
        }
        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref cause) = self.inner.cause {
            write!(f, "{}: {}", self.description(), cause)
        } else {
            f.write_str(self.description())
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .cause
            .as_ref()
            .map(|cause| &**cause as &(dyn StdError + 'static))
    }
}

#[doc(hidden)]
trait AssertSendSync: Send + Sync + 'static {}
#[doc(hidden)]
impl AssertSendSync for Error {}
