#![doc(html_root_url = "https://docs.rs/negotiate/0.1.0")]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

//! # negotiate
//!
//! negotiate reads the HTTP content negotiation request headers of
//! [RFC 2616 §14](https://tools.ietf.org/html/rfc2616#section-14):
//! `Accept`, `Accept-Charset` and `Accept-Encoding`.
//!
//! Each header is parsed leniently into weighted elements, ranked by
//! quality, then by how specific each element is, then by the order the
//! client wrote them. A server can then ask whether a representation is
//! acceptable, or which of the ones it has the client prefers.
//!
//! ```
//! use negotiate::header::{Accept, AcceptEncoding, Header};
//!
//! let accept = Accept::parse_header(Some("text/*;q=0.3, text/html;q=0.7, */*;q=0.5"));
//! assert_eq!(accept.preferred_type().as_deref(), Some("text/html"));
//! assert_eq!(accept.best_match(&["text/plain", "image/png"]), Some("image/png"));
//!
//! let encoding = AcceptEncoding::parse_header(Some("gzip, *;q=0"));
//! assert!(!encoding.is_accepted("identity"));
//! ```
//!
//! The implicit rules of RFC 2616 are applied: ISO-8859-1 is acceptable
//! unless refused, and so is the `identity` coding. A [`Builder`] tunes the
//! parsing.
//!
//! # Optional Features
//!
//! - `tracing`: emit `tracing` events while parsing and ranking.

#[macro_use]
mod trace;

mod builder;
pub mod error;
pub mod header;

pub use crate::builder::Builder;
pub use crate::error::{Error, Result};
pub use crate::header::{Accept, AcceptCharset, AcceptEncoding, Header};
