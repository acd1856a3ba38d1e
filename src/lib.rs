//! Rendering of [RFC6265][rfc6265] `Set-Cookie` header values and the HTTP dates
//! they carry.
//!
//! The crate only produces header values. Attaching them to a response under
//! the `Set-Cookie` key is left to the caller.
//!
//! ```
//! use cookie_header::cookie::{Builder, CookieEncoder};
//! use cookie_header::clock::FixedClock;
//!
//! let cookie = Builder::new("id")
//!     .value("abc")
//!     .max_age(60)
//!     .build()
//!     .unwrap();
//!
//! let encoder = CookieEncoder::with_clock(FixedClock::from_secs(0));
//! assert_eq!(
//!     encoder.encode(&cookie),
//!     "id=abc; Expires=Thu, 01-Jan-1970 00:01:00 GMT; Max-Age=60; HttpOnly; Path=/"
//! );
//! ```
//!
//! [rfc6265]: https://tools.ietf.org/html/rfc6265

#![deny(missing_docs)]

#[macro_use]
extern crate error_chain;
extern crate idna;
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
extern crate time;
extern crate url;

pub mod clock;
pub mod cookie;
pub mod date;
pub mod error;

pub use cookie::build_set_cookie_header;
pub use date::format_http_date;
