//! Outgoing cookies of an [`HttpResponse`](crate::http::response::HttpResponse).
//!
//! Like [`HttpHeaders`](crate::http::headers::HttpHeaders), the collection has
//! a checked setter ([`ResponseCookies::set_cookie`]) and a raw one
//! ([`ResponseCookies::insert_raw`]) that stores whatever it is given. Each
//! entry is serialized as its own `Set-Cookie` line with the `cookie` crate's
//! percent-encoding.

use cookie::Cookie;
use indexmap::IndexMap;

use crate::cookies::CookieError;

#[derive(Debug, Default)]
pub struct ResponseCookies {
    cookies: IndexMap<String, Cookie<'static>>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `cookie` after checking its name, path and domain.
    pub fn set_cookie(&mut self, cookie: Cookie<'static>) -> Result<(), CookieError> {
        if !is_token(cookie.name()) {
            return Err(CookieError::InvalidName(cookie.name().to_string()));
        }
        if let Some(path) = cookie.path() {
            check_attribute("Path", path)?;
        }
        if let Some(domain) = cookie.domain() {
            check_attribute("Domain", domain)?;
        }

        self.insert_raw(cookie);
        Ok(())
    }

    /// Adds `cookie` as is. A cookie with the same name is replaced.
    pub fn insert_raw(&mut self, cookie: Cookie<'static>) {
        self.cookies.insert(cookie.name().to_string(), cookie);
    }

    pub fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.cookies.get(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie<'static>> {
        self.cookies.values()
    }

    /// `Set-Cookie: <cookie>\r\n` for every entry.
    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for cookie in self.cookies.values() {
            result.push_str(&format!("Set-Cookie: {}\r\n", cookie.encoded()));
        }
        result
    }
}

// RFC 7230 tchar
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

fn check_attribute(attribute: &'static str, value: &str) -> Result<(), CookieError> {
    if value.chars().any(|c| c == ';' || c.is_control()) {
        return Err(CookieError::InvalidAttribute {
            attribute,
            value: value.to_string(),
        });
    }
    Ok(())
}
