//! Cookie middleware.
//!
//! Before routing, the request's raw cookies are wrapped into a
//! [`CookieHandler`] and a [`Snapshot`] of it is kept on the request. After
//! the handler ran, every cookie whose value differs from the snapshot, or
//! that did not exist when it was taken, is written to the response as is.
//!
//! Only values are compared: changing nothing but a cookie's path, domain,
//! expiry or secure flag does not send it back to the client.

use crate::cookies::{CookieHandler, Snapshot};
use crate::handler::middleware::Middleware;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

pub struct CookieMiddleware;

impl CookieMiddleware {
    pub const NAME: &'static str = "cookies";
}

impl Middleware for CookieMiddleware {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn process_request(&self, req: &mut HttpRequest) {
        let mut jar = CookieHandler::new();
        for cookie in &req.raw_cookies {
            jar.insert(cookie.name(), cookie.value());
        }

        req.original_cookies = Some(jar.snapshot());
        req.cookies = jar;
    }

    fn process_response(&self, req: &mut HttpRequest, res: &mut HttpResponse) {
        let Some(original) = req.original_cookies.as_ref() else {
            log::debug!("No cookie snapshot on request to {}, skipping write-back", req.uri);
            return;
        };

        let current = Snapshot::of(&req.cookies);
        if *original == current {
            return;
        }

        for name in original.changed_names(&current) {
            if let Some(cookie) = req.cookies.get(name) {
                log::debug!("Writing back cookie {name:?}");
                res.cookies.insert_raw(cookie.cookie().clone());
            }
        }
    }
}
