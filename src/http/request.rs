use cookie::Cookie;

use crate::cookies::{CookieHandler, Snapshot};
use crate::http::HttpMethod;
use crate::http::headers::HttpHeaders;

/// Common HTTP request headers
/// This enum defines the set of headers that can be explicitly set on an
/// [`HttpRequest`] through its safe wrapper API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestHeader {
    Host,
    ContentLength,
    ContentType,
    AcceptEncoding,
    Cookie,
}

impl RequestHeader {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestHeader::Host => "Host",
            RequestHeader::ContentLength => "Content-Length",
            RequestHeader::ContentType => "Content-Type",
            RequestHeader::AcceptEncoding => "Accept-Encoding",
            RequestHeader::Cookie => "Cookie",
        }
    }
}

#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub http_version: (u8, u8),

    // headers
    pub headers: HttpHeaders,
    pub body: Vec<u8>,

    /// Cookies exactly as received, in header order.
    pub raw_cookies: Vec<Cookie<'static>>,

    /// Cookie container handlers read and mutate. Filled by the cookie
    /// middleware; empty if it is not part of the pipeline.
    pub cookies: CookieHandler,

    /// Value copy of `cookies` taken when they were wrapped.
    pub original_cookies: Option<Snapshot>,
}

impl HttpRequest {
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Unknown,
            uri: String::new(),
            http_version: (0, 0),
            headers: HttpHeaders::new(),
            body: Vec::new(),
            raw_cookies: Vec::new(),
            cookies: CookieHandler::new(),
            original_cookies: None,
        }
    }

    /// Sets a request header constrained to the allowed [`RequestHeader`] variants.
    ///
    /// No validation is performed on the header value itself.
    pub fn set_header(&mut self, h: RequestHeader, value: &str) {
        self.headers.set_raw(h.as_str(), value);
    }

    /// Records one `Cookie` header line.
    ///
    /// The line is kept in the headers (repeated lines are joined with `"; "`)
    /// and split into [`raw_cookies`](Self::raw_cookies). Pairs the `cookie`
    /// crate cannot parse are skipped.
    pub fn add_cookie_header(&mut self, value: &str) {
        self.headers
            .append_raw(RequestHeader::Cookie.as_str(), value, "; ");

        for parsed in Cookie::split_parse_encoded(value.to_string()) {
            match parsed {
                Ok(cookie) => self.raw_cookies.push(cookie),
                Err(err) => log::debug!("Skipping malformed cookie pair: {err}"),
            }
        }
    }
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_is_split_into_pairs() {
        let mut req = HttpRequest::new();
        req.add_cookie_header("a=1; b=hello%20world");
        req.add_cookie_header("c=3");

        let pairs: Vec<(&str, &str)> = req
            .raw_cookies
            .iter()
            .map(|c| (c.name(), c.value()))
            .collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "hello world"), ("c", "3")]);
        assert_eq!(
            req.headers.get("cookie").map(String::as_str),
            Some("a=1; b=hello%20world; c=3")
        );
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let mut req = HttpRequest::new();
        req.add_cookie_header("=nameless; ok=yes");
        assert_eq!(req.raw_cookies.len(), 1);
        assert_eq!(req.raw_cookies[0].name(), "ok");
    }
}
