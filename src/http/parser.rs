//! Incremental HTTP/1.x request parser.
//!
//! Bytes are fed as they arrive from the socket; the parser keeps whatever it
//! could not consume yet and resumes from there on the next call. Parsing
//! goes request line, headers, then body (sized by `Content-Length` only).
//!
//! Only the headers the server acts on are kept on the request: `Host`,
//! `Content-Length`, `Content-Type`, `Accept-Encoding` and `Cookie`.
//! `Cookie` lines are additionally split into
//! [`HttpRequest::raw_cookies`](crate::http::request::HttpRequest::raw_cookies).

use crate::config::config;
use crate::http::request::*;
use crate::http::status::HttpStatus;
use crate::http::*;

/// Progress reported by [`Parser::feed`].
#[derive(PartialEq, Debug)]
pub enum ParserOk {
    /// More bytes are needed.
    Incomplete,
    /// All headers are in; reported once, before any body byte is consumed.
    HeadersDone,
    /// The request is complete.
    Done,
}

// To keep parser logic separate from HTTP status codes,
// direct http error codes are not used here but mapped later.
#[derive(PartialEq, Debug)]
pub enum ParserError {
    // 400 Bad Request
    Error,

    // 413 Payload Too Large
    PayloadTooLarge,

    // 414 URI Too Long
    TooLongUri,

    // 505 HTTP Version Not Supported
    HttpVersionNotSupported,
}

impl ParserError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ParserError::Error => HttpStatus::BadRequest,
            ParserError::PayloadTooLarge => HttpStatus::PayloadTooLarge,
            ParserError::TooLongUri => HttpStatus::UriTooLong,
            ParserError::HttpVersionNotSupported => HttpStatus::HttpVersionNotSupported,
        }
    }
}

#[derive(PartialEq, PartialOrd, Debug)]
enum ParserState {
    RequestLine,
    Headers,
    Body,
    Done,
}

pub struct Parser {
    buf: Vec<u8>,
    state: ParserState,
    header_bytes: usize,
    content_length: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            state: ParserState::RequestLine,
            header_bytes: 0,
            content_length: 0,
        }
    }

    /// Removes the next CRLF terminated line from the buffer, without the CRLF.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        let end = self.buf.windows(2).position(|w| w == b"\r\n")?;
        let mut line: Vec<u8> = self.buf.drain(..end + 2).collect();
        line.truncate(end);
        Some(line)
    }

    fn parse_request_line(&self, line: &[u8], req: &mut HttpRequest) -> Result<(), ParserError> {
        // Request line: METHOD PATH HTTP/VERSION
        let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
        if parts.len() != 3 {
            return Err(ParserError::Error);
        }

        if parts[0].len() > HTTP_METHOD_MAX_LEN {
            return Err(ParserError::Error);
        }

        let method = std::str::from_utf8(parts[0]).unwrap_or("").to_uppercase();
        let method = match http_method_from_str(&method) {
            HttpMethod::Unknown => return Err(ParserError::Error),
            m => m,
        };

        let path = std::str::from_utf8(parts[1]).map_err(|_| ParserError::Error)?;
        if path.is_empty() {
            return Err(ParserError::Error);
        }
        if path.len() > config().max_path_size {
            return Err(ParserError::TooLongUri);
        }

        let version = std::str::from_utf8(parts[2]).unwrap_or("");
        let (maj, min) = version
            .strip_prefix("HTTP/")
            .and_then(|v| v.split_once('.'))
            .and_then(|(maj, min)| Some((maj.parse::<u8>().ok()?, min.parse::<u8>().ok()?)))
            .ok_or(ParserError::Error)?;

        if !(maj == 1 && (min == 0 || min == 1)) {
            return Err(ParserError::HttpVersionNotSupported);
        }

        req.method = method;
        req.uri = path.to_string();
        req.http_version = (maj, min);
        Ok(())
    }

    fn parse_header(&mut self, line: &[u8], req: &mut HttpRequest) -> Result<(), ParserError> {
        let mut it = line.splitn(2, |&b| b == b':');
        let name = it.next().unwrap_or_default();
        let value = it.next().ok_or(ParserError::Error)?;

        let name = std::str::from_utf8(name).map_err(|_| ParserError::Error)?;
        if name.is_empty() || name.contains(|c: char| c.is_whitespace()) {
            return Err(ParserError::Error);
        }
        let value = std::str::from_utf8(value).map_err(|_| ParserError::Error)?.trim();

        match name.to_ascii_lowercase().as_str() {
            "host" => req.set_header(RequestHeader::Host, value),
            "content-length" => {
                let content_len = value.parse::<usize>().map_err(|_| ParserError::Error)?;
                if content_len > config().max_body_size {
                    return Err(ParserError::PayloadTooLarge);
                }
                self.content_length = content_len;
                req.set_header(RequestHeader::ContentLength, value);
            }
            "content-type" => req.set_header(RequestHeader::ContentType, value),
            "accept-encoding" => req.set_header(RequestHeader::AcceptEncoding, value),
            "cookie" => req.add_cookie_header(value),
            _ => {}
        }
        Ok(())
    }

    fn finish_headers(&mut self, req: &HttpRequest) -> Result<(), ParserError> {
        if !req.headers.contains(RequestHeader::Host.as_str()) {
            return Err(ParserError::Error);
        }

        self.state = if self.content_length > 0 {
            ParserState::Body
        } else {
            ParserState::Done
        };
        Ok(())
    }

    fn parse_body(&mut self, req: &mut HttpRequest) -> ParserOk {
        let to_copy = std::cmp::min(self.buf.len(), self.content_length - req.body.len());
        req.body.extend(self.buf.drain(..to_copy));

        if req.body.len() == self.content_length {
            self.state = ParserState::Done;
            return ParserOk::Done;
        }

        ParserOk::Incomplete
    }

    /// Feeds newly read bytes (possibly none) and parses as far as possible.
    pub fn feed(&mut self, data: &[u8], req: &mut HttpRequest) -> Result<ParserOk, ParserError> {
        self.buf.extend_from_slice(data);

        loop {
            match self.state {
                ParserState::RequestLine | ParserState::Headers => {
                    let Some(line) = self.take_line() else {
                        // Basic overflow check for request line and headers
                        if self.header_bytes + self.buf.len() > config().max_header_size {
                            return Err(ParserError::Error);
                        }
                        return Ok(ParserOk::Incomplete);
                    };

                    self.header_bytes += line.len() + 2;
                    if self.header_bytes > config().max_header_size {
                        return Err(ParserError::Error);
                    }

                    if self.state == ParserState::RequestLine {
                        self.parse_request_line(&line, req)?;
                        self.state = ParserState::Headers;
                    } else if line.is_empty() {
                        self.finish_headers(req)?;
                        return Ok(ParserOk::HeadersDone);
                    } else {
                        self.parse_header(&line, req)?;
                    }
                }
                ParserState::Body => return Ok(self.parse_body(req)),
                ParserState::Done => return Ok(ParserOk::Done),
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(raw: &[u8]) -> Result<HttpRequest, ParserError> {
        let mut parser = Parser::new();
        let mut req = HttpRequest::new();
        let mut data = raw;
        loop {
            match parser.feed(data, &mut req)? {
                ParserOk::Done => return Ok(req),
                ParserOk::HeadersDone => {}
                ParserOk::Incomplete if data.is_empty() => return Err(ParserError::Error),
                ParserOk::Incomplete => {}
            }
            data = &[];
        }
    }

    #[test]
    fn parses_request_with_cookies() {
        let req = parse_all(
            b"GET /cookies HTTP/1.1\r\n\
              Host: localhost\r\n\
              Cookie: a=1; b=2\r\n\
              X-Ignored: yes\r\n\
              \r\n",
        )
        .unwrap();

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.uri, "/cookies");
        assert_eq!(req.http_version, (1, 1));
        assert_eq!(req.raw_cookies.len(), 2);
        assert_eq!(req.raw_cookies[1].value(), "2");
        assert!(req.headers.get("X-Ignored").is_none());
    }

    #[test]
    fn headers_done_is_reported_before_body() {
        let mut parser = Parser::new();
        let mut req = HttpRequest::new();

        let head = b"POST /form HTTP/1.1\r\nHost: h\r\nContent-Length: 5\r\n\r\nab";
        assert_eq!(parser.feed(head, &mut req), Ok(ParserOk::HeadersDone));
        assert_eq!(parser.feed(&[], &mut req), Ok(ParserOk::Incomplete));
        assert_eq!(parser.feed(b"cde", &mut req), Ok(ParserOk::Done));
        assert_eq!(req.body, b"abcde");
        assert_eq!(parser.feed(&[], &mut req), Ok(ParserOk::Done));
    }

    #[test]
    fn split_request_line_is_resumed() {
        let mut parser = Parser::new();
        let mut req = HttpRequest::new();

        assert_eq!(parser.feed(b"GET / HT", &mut req), Ok(ParserOk::Incomplete));
        assert_eq!(parser.feed(b"TP/1.0\r\nHost: h\r\n", &mut req), Ok(ParserOk::Incomplete));
        assert_eq!(parser.feed(b"\r\n", &mut req), Ok(ParserOk::HeadersDone));
        assert_eq!(parser.feed(&[], &mut req), Ok(ParserOk::Done));
        assert_eq!(req.http_version, (1, 0));
    }

    #[test]
    fn missing_host_is_rejected() {
        assert_eq!(
            parse_all(b"GET / HTTP/1.1\r\n\r\n").unwrap_err(),
            ParserError::Error
        );
    }

    #[test]
    fn unsupported_version_is_rejected() {
        assert_eq!(
            parse_all(b"GET / HTTP/2.0\r\nHost: h\r\n\r\n").unwrap_err(),
            ParserError::HttpVersionNotSupported
        );
    }

    #[test]
    fn long_uri_is_rejected() {
        let raw = format!("GET /{} HTTP/1.1\r\nHost: h\r\n\r\n", "a".repeat(2000));
        assert_eq!(parse_all(raw.as_bytes()).unwrap_err(), ParserError::TooLongUri);
    }
}
