//! Rendering of a cookie as a `Set-Cookie` header value.
//!
//! ```text
//! set-cookie-value = cookie-pair *( ";" SP cookie-av )
//! cookie-pair      = cookie-name "=" cookie-value
//! cookie-av        = domain-av / expires-av / max-age-av
//!                  / secure-av / httponly-av / path-av
//! ```
//!
//! Attributes are always written in the order above. Values are only quoted
//! where noted in [`quote`](fn.quote.html).

mod iter;
mod quote;

use std::borrow::Cow;
use std::fmt;
use std::time::{Duration as StdDuration, SystemTime};

pub use self::iter::{Cookies, Headers, SET_COOKIE};
pub use self::quote::quote;
use clock::{Clock, ClockFn};
use date::{saturating_secs, DateFormatter, HttpTime, DEFAULT_DELIMITER};
use error::*;
use idna::domain_to_ascii;
use time::{Duration, Timespec, Tm};
use url::Url;

/// A builder for a cookie.
#[derive(Debug)]
pub enum Builder {
    /// A partially constructed cookie.
    Cookie(SetCookie),

    /// An error.
    Err(Error),
}

impl From<Error> for Builder {
    fn from(e: Error) -> Builder {
        Builder::Err(e)
    }
}

impl Builder {
    /// Create a new cookie builder.
    ///
    /// The default cookie has an empty value, is `HttpOnly` and applies to all
    /// paths beneath the root.
    pub fn new(name: &str) -> Builder {
        Builder::Cookie(SetCookie {
            name: name.to_owned(),
            ..
            Default::default()
        })
    }

    /// Set the value stored in the cookie.
    pub fn value(self, value: &str) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                value: value.to_owned(),
                ..
                set_cookie
            })
        })
    }

    /// Set whether or not the cookie requires a secure connection.
    pub fn secure(self, secure: bool) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                secure: secure,
                ..
                set_cookie
            })
        })
    }

    /// Set whether a cookie should only be sent of HTTP/HTTPS connections.
    pub fn http_only(self, http_only: bool) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                http_only: http_only,
                ..
                set_cookie
            })
        })
    }

    /// Set the domain for a cookie to match a given domain and all subdomains.
    ///
    /// The domain is used as given.
    pub fn domain(self, domain: &str) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                domain: Some(domain.to_owned()),
                ..
                set_cookie
            })
        })
    }

    /// Set the domain for a cookie, converting an internationalized domain name
    /// to its ASCII form first.
    pub fn ascii_domain(self, domain: &str) -> Builder {
        self.map(|set_cookie| {
            let ascii = domain_to_ascii(domain)
                .map_err(|err| ErrorKind::InvalidDomain(domain.to_owned(), err))?;
            Ok(SetCookie {
                domain: Some(ascii),
                ..
                set_cookie
            })
        })
    }

    /// Set the path for a cookie to be matched in.
    pub fn path(self, path: &str) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                path: Some(path.to_owned()),
                ..
                set_cookie
            })
        })
    }

    /// Omit the path from the cookie.
    pub fn no_path(self) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                path: None,
                ..
                set_cookie
            })
        })
    }

    /// Scope the path of the cookie to the request it is sent in response to.
    ///
    /// The domain is left unset so the cookie remains host-only.
    pub fn origin(self, origin: &Url) -> Builder {
        self.map(|set_cookie| {
            ensure!(
                origin.host().is_some(),
                ErrorKind::InvalidOrigin(origin.clone())
            );
            Ok(SetCookie {
                path: Some(default_path(origin).to_owned()),
                ..
                set_cookie
            })
        })
    }

    /// Set the expiry time of a cookie.
    ///
    /// This takes precedence over any date derived from the `Max-Age`.
    pub fn expires<E: Into<Expires>>(self, expires: E) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                expires: Some(expires.into()),
                ..
                set_cookie
            })
        })
    }

    /// Set the number of seconds until the cookie expires.
    pub fn max_age<A: Into<MaxAge>>(self, max_age: A) -> Builder {
        self.map(|set_cookie| {
            Ok(SetCookie {
                max_age: Some(max_age.into()),
                ..
                set_cookie
            })
        })
    }

    /// Build the SetCookie.
    pub fn build(self) -> Result<SetCookie> {
        match self {
            Builder::Cookie(set_cookie) => Ok(set_cookie),
            Builder::Err(error) => Err(error),
        }
    }

    fn map<F>(self, f: F) -> Builder
    where
        F: FnOnce(SetCookie) -> Result<SetCookie>,
    {
        match self {
            Builder::Cookie(set_cookie) => match f(set_cookie) {
                Ok(set_cookie) => Builder::Cookie(set_cookie),
                Err(error) => Builder::Err(error),
            },
            _ => self,
        }
    }
}

/// The attributes of a cookie to be sent from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCookie {
    /// Name of the cookie.
    name: String,

    /// Unquoted value of the cookie.
    value: String,

    /// The cookie can only be sent over a TLS connection.
    secure: bool,

    /// The cookie can only be sent via a HTTP (or HTTPS) connection.
    http_only: bool,

    /// Domain restriction of the cookie.
    domain: Option<String>,

    /// Path restriction of the cookie.
    path: Option<String>,

    /// Expiry time of the cookie.
    expires: Option<Expires>,

    /// Lifetime of the cookie in seconds.
    max_age: Option<MaxAge>,
}

impl Default for SetCookie {
    fn default() -> SetCookie {
        SetCookie {
            name: String::new(),
            value: String::new(),
            secure: false,
            http_only: true,
            domain: None,
            path: Some("/".to_owned()),
            expires: None,
            max_age: None,
        }
    }
}

impl SetCookie {
    /// Get the name of the cookie.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value of the cookie before any quoting.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if the cookie requires a secure connection.
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Check if the cookie should only be sent over http requests.
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Get the domain the cookie applies to.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_ref().map(String::as_str)
    }

    /// Get the path the cookie applies to.
    pub fn path(&self) -> Option<&str> {
        self.path.as_ref().map(String::as_str)
    }

    /// Get the expiry of the cookie.
    pub fn expires(&self) -> Option<&Expires> {
        self.expires.as_ref()
    }

    /// Get the lifetime of the cookie.
    pub fn max_age(&self) -> Option<MaxAge> {
        self.max_age
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&build_set_cookie_header(self))
    }
}

/// Expiry time of a cookie.
#[derive(Debug, Clone, PartialEq)]
pub enum Expires {
    /// A date that is written exactly as given.
    Raw(String),
    /// A time that is formatted as a date.
    At(HttpTime),
}

impl<'s> From<&'s str> for Expires {
    fn from(date: &'s str) -> Expires {
        Expires::Raw(date.to_owned())
    }
}

impl From<String> for Expires {
    fn from(date: String) -> Expires {
        Expires::Raw(date)
    }
}

impl From<HttpTime> for Expires {
    fn from(time: HttpTime) -> Expires {
        Expires::At(time)
    }
}

impl From<Tm> for Expires {
    fn from(time: Tm) -> Expires {
        Expires::At(time.into())
    }
}

impl From<Timespec> for Expires {
    fn from(time: Timespec) -> Expires {
        Expires::At(time.into())
    }
}

impl From<SystemTime> for Expires {
    fn from(time: SystemTime) -> Expires {
        Expires::At(time.into())
    }
}

impl From<i64> for Expires {
    fn from(secs: i64) -> Expires {
        Expires::At(secs.into())
    }
}

impl From<i32> for Expires {
    fn from(secs: i32) -> Expires {
        Expires::At(secs.into())
    }
}

impl From<f64> for Expires {
    fn from(secs: f64) -> Expires {
        Expires::At(secs.into())
    }
}

/// Lifetime of a cookie in whole seconds.
///
/// Zero and negative lifetimes are kept as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxAge(pub i64);

impl From<i64> for MaxAge {
    fn from(secs: i64) -> MaxAge {
        MaxAge(secs)
    }
}

impl From<i32> for MaxAge {
    fn from(secs: i32) -> MaxAge {
        MaxAge(secs.into())
    }
}

impl From<u32> for MaxAge {
    fn from(secs: u32) -> MaxAge {
        MaxAge(secs.into())
    }
}

impl From<Duration> for MaxAge {
    /// Whole days and seconds of the duration, dropping any fraction of a
    /// second towards the earlier second.
    fn from(duration: Duration) -> MaxAge {
        let secs = duration.num_seconds();
        if duration < Duration::seconds(secs) {
            MaxAge(secs - 1)
        } else {
            MaxAge(secs)
        }
    }
}

impl From<StdDuration> for MaxAge {
    fn from(duration: StdDuration) -> MaxAge {
        MaxAge(saturating_secs(duration))
    }
}

impl fmt::Display for MaxAge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an attribute appears in the header.
enum Attribute<'c> {
    /// A bare key, present only when set.
    Flag(bool),
    /// A `key=value` pair, present only when there is a value.
    Value(Option<Cow<'c, str>>),
}

/// Renders cookies as `Set-Cookie` header values.
#[derive(Debug, Clone)]
pub struct CookieEncoder<C: Clock = ClockFn> {
    dates: DateFormatter<C>,
    delimiter: String,
}

impl Default for CookieEncoder<ClockFn> {
    fn default() -> CookieEncoder<ClockFn> {
        CookieEncoder {
            dates: DateFormatter::new(),
            delimiter: DEFAULT_DELIMITER.to_owned(),
        }
    }
}

impl CookieEncoder<ClockFn> {
    /// Create an encoder that reads the system clock.
    pub fn new() -> CookieEncoder<ClockFn> {
        Default::default()
    }
}

impl<C: Clock> CookieEncoder<C> {
    /// Create an encoder with a specific time source.
    pub fn with_clock(clock: C) -> CookieEncoder<C> {
        CookieEncoder {
            dates: DateFormatter::with_clock(clock),
            delimiter: DEFAULT_DELIMITER.to_owned(),
        }
    }

    /// Set the delimiter used within `Expires` dates.
    pub fn delimiter(self, delimiter: &str) -> CookieEncoder<C> {
        CookieEncoder {
            delimiter: delimiter.to_owned(),
            ..
            self
        }
    }

    /// The formatter used for `Expires` dates.
    pub fn formatter(&self) -> &DateFormatter<C> {
        &self.dates
    }

    /// Resolve the `Expires` date of a cookie.
    fn expires<'c>(&self, cookie: &'c SetCookie) -> Option<Cow<'c, str>> {
        match cookie.expires {
            Some(Expires::Raw(ref date)) if !date.is_empty() => Some(Cow::Borrowed(date.as_str())),
            Some(Expires::At(time)) => Some(Cow::Owned(self.dates.format_with(time, &self.delimiter))),
            _ => cookie.max_age.map(|MaxAge(age)| {
                let expiry = self.dates.clock().now_secs().saturating_add(age);
                trace!("cookie {} expires {}s from now", cookie.name, age);
                Cow::Owned(self.dates.format_with(expiry, &self.delimiter))
            }),
        }
    }

    /// Render a cookie as a `Set-Cookie` header value.
    pub fn encode(&self, cookie: &SetCookie) -> String {
        let attributes = [
            ("Domain", Attribute::Value(non_empty(&cookie.domain).map(quote))),
            ("Expires", Attribute::Value(self.expires(cookie))),
            (
                "Max-Age",
                Attribute::Value(cookie.max_age.map(|age| Cow::Owned(age.to_string()))),
            ),
            ("Secure", Attribute::Flag(cookie.secure)),
            ("HttpOnly", Attribute::Flag(cookie.http_only)),
            ("Path", Attribute::Value(non_empty(&cookie.path).map(Cow::Borrowed))),
        ];

        let mut buffer = vec![format!("{}={}", cookie.name, quote(&cookie.value))];
        for &(key, ref attribute) in attributes.iter() {
            match *attribute {
                Attribute::Flag(true) => buffer.push(key.to_owned()),
                Attribute::Value(Some(ref value)) => buffer.push(format!("{}={}", key, value)),
                _ => {}
            }
        }

        buffer.join("; ")
    }
}

/// Render a cookie as a `Set-Cookie` header value using the system clock.
pub fn build_set_cookie_header(cookie: &SetCookie) -> String {
    CookieEncoder::new().encode(cookie)
}

/// A value that is neither absent nor empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_ref()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// The default path of a cookie set in response to a request for a Url.
///
/// This is the directory of the request path without the trailing `/`.
fn default_path(url: &Url) -> &str {
    let path = url.path();
    if !path.starts_with('/') {
        return "/";
    }

    match path.rfind('/') {
        Some(0) | None => "/",
        Some(end) => &path[..end],
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clock::FixedClock;

    /// Sun, 06 Nov 1994 08:49:37 GMT
    const NOW: i64 = 784_111_777;

    fn encoder() -> CookieEncoder<FixedClock> {
        CookieEncoder::with_clock(FixedClock::from_secs(NOW))
    }

    fn render(builder: Builder) -> String {
        encoder().encode(&builder.build().unwrap())
    }

    #[test]
    fn max_age_derives_expires() {
        assert_eq!(
            render(Builder::new("id").value("abc").max_age(60)),
            "id=abc; Expires=Sun, 06-Nov-1994 08:50:37 GMT; Max-Age=60; HttpOnly; Path=/"
        );
    }

    #[test]
    fn flags_and_domain() {
        assert_eq!(
            render(
                Builder::new("x")
                    .value("v")
                    .secure(true)
                    .http_only(false)
                    .domain("example.com")
            ),
            "x=v; Domain=example.com; Secure; Path=/"
        );
    }

    #[test]
    fn defaults() {
        assert_eq!(render(Builder::new("n")), "n=; HttpOnly; Path=/");
        assert_eq!(
            render(Builder::new("n").http_only(false).no_path()),
            "n="
        );
    }

    #[test]
    fn attribute_order() {
        assert_eq!(
            render(
                Builder::new("SID")
                    .value("31d4d96e407aad42")
                    .path("/docs")
                    .secure(true)
                    .max_age(3600)
                    .expires("Wed, 21 Oct 2015 07:28:00 GMT")
                    .domain("example.com")
            ),
            "SID=31d4d96e407aad42; \
             Domain=example.com; \
             Expires=Wed, 21 Oct 2015 07:28:00 GMT; \
             Max-Age=3600; \
             Secure; \
             HttpOnly; \
             Path=/docs"
        );
    }

    #[test]
    fn explicit_expires_takes_precedence() {
        assert_eq!(
            render(Builder::new("a").expires(0).max_age(60)),
            "a=; Expires=Thu, 01-Jan-1970 00:00:00 GMT; Max-Age=60; HttpOnly; Path=/"
        );
        assert_eq!(
            render(Builder::new("a").expires(HttpTime::Now).http_only(false)),
            "a=; Expires=Sun, 06-Nov-1994 08:49:37 GMT; Path=/"
        );
    }

    #[test]
    fn empty_expires_is_absent() {
        assert_eq!(
            render(Builder::new("a").expires("").max_age(1)),
            "a=; Expires=Sun, 06-Nov-1994 08:49:38 GMT; Max-Age=1; HttpOnly; Path=/"
        );
        assert_eq!(render(Builder::new("a").expires("")), "a=; HttpOnly; Path=/");
    }

    #[test]
    fn zero_and_negative_max_age() {
        assert_eq!(
            render(Builder::new("gone").max_age(0)),
            "gone=; Expires=Sun, 06-Nov-1994 08:49:37 GMT; Max-Age=0; HttpOnly; Path=/"
        );
        assert_eq!(
            render(Builder::new("gone").max_age(-10)),
            "gone=; Expires=Sun, 06-Nov-1994 08:49:27 GMT; Max-Age=-10; HttpOnly; Path=/"
        );
    }

    #[test]
    fn durations_as_max_age() {
        let examples = [
            (MaxAge::from(Duration::days(1) + Duration::seconds(30)), 86_430),
            (MaxAge::from(Duration::milliseconds(1_500)), 1),
            (MaxAge::from(Duration::milliseconds(-1_500)), -2),
            (MaxAge::from(Duration::seconds(-86_400)), -86_400),
            (MaxAge::from(StdDuration::from_millis(2_500)), 2),
            (MaxAge::from(StdDuration::from_secs(0)), 0),
            (MaxAge::from(StdDuration::from_secs(u64::max_value())), i64::max_value()),
            (MaxAge::from(StdDuration::from_secs(1 << 63)), i64::max_value()),
        ];

        for &(max_age, expected) in examples.iter() {
            assert_eq!(max_age, MaxAge(expected));
        }

        assert_eq!(
            render(Builder::new("d").max_age(Duration::weeks(1))),
            "d=; Expires=Sun, 13-Nov-1994 08:49:37 GMT; Max-Age=604800; HttpOnly; Path=/"
        );
    }

    #[test]
    fn values_and_domains_are_quoted() {
        assert_eq!(
            render(Builder::new("my name").value("is this value")),
            "my name=\"is this value\"; HttpOnly; Path=/"
        );
        assert_eq!(
            render(Builder::new("a").value("x;y").domain("a b.com").path("/a b")),
            "a=\"x\\073y\"; Domain=\"a b.com\"; HttpOnly; Path=/a b"
        );
    }

    #[test]
    fn empty_domain_and_path_are_omitted() {
        assert_eq!(
            render(Builder::new("a").value("b").domain("").path("")),
            "a=b; HttpOnly"
        );
    }

    #[test]
    fn encoding_is_repeatable() {
        let cookie = Builder::new("id")
            .value("a,b")
            .max_age(120)
            .domain("example.com")
            .build()
            .unwrap();
        let encoder = encoder();
        assert_eq!(encoder.encode(&cookie), encoder.encode(&cookie));
    }

    #[test]
    fn rfc1123_delimiter() {
        let encoder = encoder().delimiter(" ");
        let cookie = Builder::new("id").max_age(60).build().unwrap();
        assert_eq!(
            encoder.encode(&cookie),
            "id=; Expires=Sun, 06 Nov 1994 08:50:37 GMT; Max-Age=60; HttpOnly; Path=/"
        );
        assert_eq!(encoder.formatter().clock().now_secs(), NOW);
    }

    #[test]
    fn huge_max_age_renders_latest_date() {
        let latest = encoder().formatter().format(::date::MAX_SECS);
        let examples = [
            (MaxAge(i64::max_value()), "9223372036854775807"),
            (MaxAge::from(StdDuration::from_secs(u64::max_value())), "9223372036854775807"),
        ];

        for &(max_age, rendered) in examples.iter() {
            let cookie = Builder::new("id").max_age(max_age).build().unwrap();
            assert_eq!(
                encoder().encode(&cookie),
                format!("id=; Expires={}; Max-Age={}; HttpOnly; Path=/", latest, rendered)
            );
        }
    }

    #[test]
    fn display_matches_header() {
        let cookie = Builder::new("lang")
            .value("en-US")
            .domain("example.com")
            .build()
            .unwrap();
        assert_eq!(cookie.to_string(), "lang=en-US; Domain=example.com; HttpOnly; Path=/");
        assert_eq!(cookie.to_string(), build_set_cookie_header(&cookie));
    }

    #[test]
    fn system_clock_expiry() {
        let cookie = Builder::new("id").max_age(60).build().unwrap();
        let header = build_set_cookie_header(&cookie);
        assert!(header.starts_with("id=; Expires="));
        assert!(header.ends_with(" GMT; Max-Age=60; HttpOnly; Path=/"));
    }

    #[test]
    fn origin_sets_default_path() {
        let examples = [
            ("http://www.example.com/path/to/page.html", "/path/to"),
            ("http://www.example.com/path/to/", "/path/to"),
            ("http://www.example.com/page.html", "/"),
            ("http://www.example.com", "/"),
            ("https://127.0.0.1:8080/a/b?query=1", "/a"),
        ];

        for &(url, expected) in examples.iter() {
            let cookie = Builder::new("SID")
                .origin(&url.parse().unwrap())
                .build()
                .unwrap();
            assert_eq!(cookie.path(), Some(expected));
            assert_eq!(cookie.domain(), None);
        }
    }

    #[test]
    fn origin_without_host() {
        let url: Url = "data:text/plain,cookie".parse().unwrap();
        let error = Builder::new("SID")
            .origin(&url)
            .value("ignored")
            .build()
            .unwrap_err();

        match *error.kind() {
            ErrorKind::InvalidOrigin(ref origin) => assert_eq!(origin, &url),
            ref kind => panic!("unexpected error: {:?}", kind),
        }
    }

    #[test]
    fn ascii_domains() {
        let examples = [
            ("example.com", "example.com"),
            ("EXAMPLE.com", "example.com"),
            ("b\u{fc}cher.example", "xn--bcher-kva.example"),
        ];

        for &(domain, expected) in examples.iter() {
            let cookie = Builder::new("a").ascii_domain(domain).build().unwrap();
            assert_eq!(cookie.domain(), Some(expected));
        }
    }

    #[test]
    fn invalid_ascii_domain() {
        let error = Builder::new("a")
            .ascii_domain("exa\u{ffff}mple.com")
            .build()
            .unwrap_err();

        match *error.kind() {
            ErrorKind::InvalidDomain(ref domain, _) => assert_eq!(domain, "exa\u{ffff}mple.com"),
            ref kind => panic!("unexpected error: {:?}", kind),
        }
    }
}
