//! Request/response hooks wrapped around the router.
//!
//! A [`Pipeline`] is built from the ordered `middleware` list of the server
//! configuration. Request hooks run in list order before routing; response
//! hooks run in reverse order once the handler returned, so the first
//! middleware sees the request first and the response last.

pub mod compression;
pub mod cookies;

use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

pub use compression::Compression;
pub use cookies::CookieMiddleware;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MiddlewareError {
    #[error("unknown middleware: {0:?}")]
    Unknown(String),
}

pub trait Middleware: Send + Sync {
    /// Name the middleware is registered under in the configuration.
    fn name(&self) -> &'static str;

    fn process_request(&self, _req: &mut HttpRequest) {}

    fn process_response(&self, _req: &mut HttpRequest, _res: &mut HttpResponse) {}
}

fn by_name(name: &str) -> Option<Box<dyn Middleware>> {
    match name {
        "cookies" => Some(Box::new(CookieMiddleware)),
        "compression" => Some(Box::new(Compression)),
        _ => None,
    }
}

#[derive(Default)]
pub struct Pipeline {
    hooks: Vec<Box<dyn Middleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.hooks.push(Box::new(middleware));
        self
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, MiddlewareError> {
        let hooks = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                by_name(name).ok_or_else(|| MiddlewareError::Unknown(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pipeline = Self { hooks };
        let names = pipeline.names();
        if names.contains(&CookieMiddleware::NAME) && names[0] != CookieMiddleware::NAME {
            log::warn!(
                "\"{}\" middleware is not first in {:?}; earlier hooks see unwrapped cookies",
                CookieMiddleware::NAME,
                names
            );
        }
        Ok(pipeline)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|m| m.name()).collect()
    }

    pub fn process_request(&self, req: &mut HttpRequest) {
        for hook in &self.hooks {
            hook.process_request(req);
        }
    }

    pub fn process_response(&self, req: &mut HttpRequest, res: &mut HttpResponse) {
        for hook in self.hooks.iter().rev() {
            hook.process_response(req, res);
        }
    }
}
