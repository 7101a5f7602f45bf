use std::time::SystemTime;

use crate::http::cookies::ResponseCookies;
use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;

pub enum ResponseHeader {
    ContentLength,
    ContentType,
    ContentEncoding,
    Connection,
    Server,
    Date,
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: HttpStatus,
    pub headers: HttpHeaders,
    pub cookies: ResponseCookies,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: HttpStatus::Ok,
            headers: HttpHeaders::new(),
            cookies: ResponseCookies::new(),
            body: Vec::new(),
        }
    }

    pub fn set_header(&mut self, h: ResponseHeader, value: &str) {
        let name = match h {
            ResponseHeader::ContentType => "Content-Type",
            ResponseHeader::ContentLength => "Content-Length",
            ResponseHeader::ContentEncoding => "Content-Encoding",
            ResponseHeader::Connection => "Connection",
            ResponseHeader::Server => "Server",
            ResponseHeader::Date => "Date",
        };

        self.headers.set_raw(name, value);
    }

    /// Replaces the body and keeps `Content-Length` in sync.
    pub fn set_body(&mut self, body: Vec<u8>, content_type: &str) {
        self.set_header(ResponseHeader::ContentLength, &body.len().to_string());
        self.set_header(ResponseHeader::ContentType, content_type);
        self.body = body;
    }

    /// Fills the headers every response carries, unless a handler set them.
    pub fn finalize(&mut self, server_name: &str) {
        if !self.headers.contains("Date") {
            self.set_header(
                ResponseHeader::Date,
                &httpdate::fmt_http_date(SystemTime::now()),
            );
        }
        if !self.headers.contains("Server") {
            self.set_header(ResponseHeader::Server, server_name);
        }
        if !self.headers.contains("Content-Length") {
            self.set_header(ResponseHeader::ContentLength, &self.body.len().to_string());
        }
    }

    pub fn build_headers(&self) -> String {
        // HTTP/1.1 <status> <reason>\r\n
        // <header_name>: <header_value>\r\n
        // Set-Cookie: <cookie>\r\n
        // ...
        // \r\n
        format!(
            "HTTP/1.1 {} {}\r\n{}{}\r\n",
            self.status.code(),
            self.status.reason(),
            self.headers.stringify(),
            self.cookies.stringify(),
        )
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie::Cookie;

    #[test]
    fn headers_include_cookies_after_regular_headers() {
        let mut res = HttpResponse::new();
        res.set_body(b"hi".to_vec(), "text/plain");
        res.cookies.insert_raw(Cookie::new("a", "1"));

        assert_eq!(
            res.build_headers(),
            "HTTP/1.1 200 OK\r\n\
             Content-Length: 2\r\n\
             Content-Type: text/plain\r\n\
             Set-Cookie: a=1\r\n\
             \r\n"
        );
    }

    #[test]
    fn finalize_keeps_handler_headers() {
        let mut res = HttpResponse::new();
        res.status = HttpStatus::NotFound;
        res.set_header(ResponseHeader::Server, "custom");
        res.finalize("crumbs/0.1");

        assert_eq!(res.headers.get("Server").map(String::as_str), Some("custom"));
        assert_eq!(res.headers.get("Content-Length").map(String::as_str), Some("0"));
        assert!(res.headers.contains("Date"));
        assert!(res.build_headers().starts_with("HTTP/1.1 404 Not Found\r\n"));
    }
}
