//! Errors produced while building a cookie.

#![allow(missing_docs)]

error_chain!{
    errors {
        InvalidOrigin(url: ::url::Url) {
            description("The origin supplied for the cookie was invalid")
            display("The url is not a valid cookie origin: {}", url)
        }
        InvalidDomain(domain: String, err: ::idna::uts46::Errors) {
            description("Invalid domain name")
            display("The domain could not be converted to ASCII: {} ({:?})", domain, err)
        }
    }
}
