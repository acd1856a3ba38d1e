//! Collections of `Set-Cookie` headers for a response.

use std::slice;

use clock::{Clock, ClockFn};
use cookie::{CookieEncoder, SetCookie};

/// Name of the header that carries each cookie.
pub const SET_COOKIE: &'static str = "Set-Cookie";

/// The cookies to be sent with a single response, in the order they were set.
///
/// Each cookie needs a header of its own. Setting a cookie with the same name
/// twice produces two headers.
#[derive(Debug, Clone)]
pub struct Cookies<C: Clock = ClockFn> {
    /// Encoder for each cookie as it is set.
    encoder: CookieEncoder<C>,
    /// Encoded header values.
    headers: Vec<String>,
}

impl Default for Cookies<ClockFn> {
    fn default() -> Cookies<ClockFn> {
        Cookies::with_encoder(CookieEncoder::new())
    }
}

impl Cookies<ClockFn> {
    /// Create an empty collection that reads the system clock.
    pub fn new() -> Cookies<ClockFn> {
        Default::default()
    }
}

impl<C: Clock> Cookies<C> {
    /// Create an empty collection with a specific encoder.
    pub fn with_encoder(encoder: CookieEncoder<C>) -> Cookies<C> {
        Cookies {
            encoder: encoder,
            headers: Vec::new(),
        }
    }

    /// Encode a cookie and add it to the collection.
    ///
    /// Returns the encoded header value.
    pub fn set(&mut self, cookie: &SetCookie) -> &str {
        let header = self.encoder.encode(cookie);
        debug!("{}: {}", SET_COOKIE, header);
        self.headers.push(header);
        &self.headers[self.headers.len() - 1]
    }

    /// The number of cookies set.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Check if no cookies have been set.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over the `(name, value)` pairs of the headers.
    pub fn iter(&self) -> Headers {
        Headers {
            values: self.headers.iter(),
        }
    }
}

impl<'c, C: Clock> IntoIterator for &'c Cookies<C> {
    type Item = (&'static str, &'c str);
    type IntoIter = Headers<'c>;

    fn into_iter(self) -> Headers<'c> {
        self.iter()
    }
}

/// An iterator over the `Set-Cookie` headers of a response.
#[derive(Debug, Clone)]
pub struct Headers<'c> {
    values: slice::Iter<'c, String>,
}

impl<'c> Iterator for Headers<'c> {
    type Item = (&'static str, &'c str);

    fn next(&mut self) -> Option<(&'static str, &'c str)> {
        self.values.next().map(|value| (SET_COOKIE, value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'c> ExactSizeIterator for Headers<'c> {}
