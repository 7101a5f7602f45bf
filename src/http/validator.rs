use crate::config::{ServerConfig, config};
use crate::http::HttpMethod;
use crate::http::HttpVersion;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;

#[derive(Debug, PartialEq)]
pub enum ValidatorError {
    Error,
    HttpVersionNotSupported,
    PayloadTooLarge,
    MalformedHeaderField,
    MissingContentLength,
    BodyNotAllowed,
    MandatoryBody,
    TooManyCookies,
}

impl ValidatorError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ValidatorError::Error => HttpStatus::BadRequest,
            ValidatorError::HttpVersionNotSupported => HttpStatus::HttpVersionNotSupported,
            ValidatorError::PayloadTooLarge => HttpStatus::PayloadTooLarge,
            ValidatorError::MalformedHeaderField => HttpStatus::BadRequest,
            ValidatorError::MandatoryBody => HttpStatus::BadRequest,
            ValidatorError::BodyNotAllowed => HttpStatus::BadRequest,
            ValidatorError::MissingContentLength => HttpStatus::LengthRequired,
            ValidatorError::TooManyCookies => HttpStatus::BadRequest,
        }
    }
}

pub struct Validator;

impl Validator {
    fn validate_http_version(v: (u8, u8), cfg: &ServerConfig) -> Result<(), ValidatorError> {
        match HttpVersion::from_pair(v) {
            Some(http_v) if http_v <= cfg.http_version => Ok(()),
            Some(_) => Err(ValidatorError::HttpVersionNotSupported),
            None => Err(ValidatorError::Error),
        }
    }

    fn validate_http_method(
        content_length: Option<usize>,
        method: &HttpMethod,
    ) -> Result<(), ValidatorError> {
        match method {
            HttpMethod::Get | HttpMethod::Head => match content_length {
                Some(n) if n > 0 => Err(ValidatorError::BodyNotAllowed),
                _ => Ok(()),
            },

            HttpMethod::Post | HttpMethod::Put => match content_length {
                None => Err(ValidatorError::MissingContentLength),
                Some(0) => Err(ValidatorError::MandatoryBody),
                Some(_) => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// Checks a request whose headers are fully parsed against the global config.
    pub fn validate_request(req: &HttpRequest) -> Result<(), ValidatorError> {
        Self::validate_with(req, config())
    }

    pub fn validate_with(req: &HttpRequest, cfg: &ServerConfig) -> Result<(), ValidatorError> {
        Self::validate_http_version(req.http_version, cfg)?;

        let content_length = req
            .headers
            .get("Content-Length")
            .map(|v| v.parse::<usize>())
            .transpose()
            .map_err(|_| ValidatorError::MalformedHeaderField)?;

        Self::validate_http_method(content_length, &req.method)?;

        if content_length.is_some_and(|n| n > cfg.max_body_size) {
            return Err(ValidatorError::PayloadTooLarge);
        }

        if req.raw_cookies.len() > cfg.max_request_cookies {
            return Err(ValidatorError::TooManyCookies);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::RequestHeader;

    fn get_request() -> HttpRequest {
        let mut req = HttpRequest::new();
        req.method = HttpMethod::Get;
        req.uri = "/".to_string();
        req.http_version = (1, 1);
        req.set_header(RequestHeader::Host, "localhost");
        req
    }

    #[test]
    fn plain_get_is_valid() {
        assert_eq!(Validator::validate_with(&get_request(), &ServerConfig::default()), Ok(()));
    }

    #[test]
    fn too_many_cookies_are_rejected() {
        let cfg = ServerConfig {
            max_request_cookies: 2,
            ..ServerConfig::default()
        };
        let mut req = get_request();
        req.add_cookie_header("a=1; b=2");
        assert_eq!(Validator::validate_with(&req, &cfg), Ok(()));

        req.add_cookie_header("c=3");
        assert_eq!(
            Validator::validate_with(&req, &cfg),
            Err(ValidatorError::TooManyCookies)
        );
    }

    #[test]
    fn post_without_length_is_rejected() {
        let mut req = get_request();
        req.method = HttpMethod::Post;
        assert_eq!(
            Validator::validate_with(&req, &ServerConfig::default()),
            Err(ValidatorError::MissingContentLength)
        );
    }

    #[test]
    fn version_above_configured_maximum_is_rejected() {
        let cfg = ServerConfig {
            http_version: crate::http::HttpVersion::V1_0,
            ..ServerConfig::default()
        };
        assert_eq!(
            Validator::validate_with(&get_request(), &cfg),
            Err(ValidatorError::HttpVersionNotSupported)
        );
    }
}
