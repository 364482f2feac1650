//! Negotiation headers.
//!
//! Each header keeps the raw value it was parsed from alongside its
//! elements, ranked most preferred first.

pub use self::accept::Accept;
pub use self::accept_charset::AcceptCharset;
pub use self::accept_encoding::AcceptEncoding;

mod accept;
mod accept_charset;
mod accept_encoding;
