//! Quoting of cookie values.
//!
//! Values made up entirely of unreserved characters are emitted as they are.
//! Anything else causes the whole value to be wrapped in double quotes, with
//! the delimiters and control or high bytes escaped:
//!
//! ```text
//! unreserved = ALPHA / DIGIT / "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+"
//!            / "-" / "." / "^" / "_" / "`" / "|" / "~" / ":"
//!
//! ","        -> \054
//! ";"        -> \073
//! <">        -> \"
//! "\"        -> \\
//! %x00-1F    -> \ooo
//! %x7F-FF    -> \ooo
//! ```
//!
//! Other reserved characters, such as a space or `=`, are kept as they are
//! within the quotes.

use std::borrow::Cow;

/// Character never requires the value to be quoted.
fn is_unreserved(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '0'..='9' => true,
        '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|'
        | '~' | ':' => true,
        _ => false,
    }
}

/// Character is a control or high byte that is written as an octal escape.
fn is_octal_escaped(c: char) -> bool {
    let ordinal = c as u32;
    ordinal < 0x20 || (ordinal >= 0x7F && ordinal <= 0xFF)
}

/// Append the escaped form of a reserved character.
fn push_escaped(buffer: &mut String, c: char) {
    match c {
        ',' => buffer.push_str("\\054"),
        ';' => buffer.push_str("\\073"),
        '"' => buffer.push_str("\\\""),
        '\\' => buffer.push_str("\\\\"),
        c if is_octal_escaped(c) => buffer.push_str(&format!("\\{:03o}", c as u32)),
        c => buffer.push(c),
    }
}

/// Quote a cookie value if it contains any reserved characters.
///
/// ```
/// use cookie_header::cookie::quote;
///
/// assert_eq!(quote("simple"), "simple");
/// assert_eq!(quote("a,b"), "\"a\\054b\"");
/// assert_eq!(quote("a b"), "\"a b\"");
/// ```
pub fn quote(value: &str) -> Cow<str> {
    if value.chars().all(is_unreserved) {
        return Cow::Borrowed(value);
    }

    trace!("quoting cookie value {:?}", value);

    let mut buffer = String::with_capacity(value.len() + 2);
    buffer.push('"');
    for c in value.chars() {
        if is_unreserved(c) {
            buffer.push(c);
        } else {
            push_escaped(&mut buffer, c);
        }
    }
    buffer.push('"');

    Cow::Owned(buffer)
}
