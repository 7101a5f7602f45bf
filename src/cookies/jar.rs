//! The request-scoped cookie container handed to handlers.
//!
//! [`CookieHandler`] is a name to [`StringCookie`] map with the two
//! response-style helpers handlers usually want:
//! - [`CookieHandler::set`] stores a value together with cookie attributes,
//! - [`CookieHandler::delete`] replaces a cookie with an already expired one.
//!
//! Anything stored here during a request ends up in `Set-Cookie` headers once
//! the cookie middleware diffs the container against its wrap-time
//! [`Snapshot`].

use time::OffsetDateTime;
use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::cookies::entry::StringCookie;
use crate::cookies::snapshot::Snapshot;

/// Attributes applied by [`CookieHandler::set`]. `None` leaves the
/// attribute unset on the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub max_age: Option<i64>,
    pub expires: Option<OffsetDateTime>,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub secure: Option<bool>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            max_age: None,
            expires: None,
            path: Some("/".to_string()),
            domain: None,
            secure: None,
        }
    }
}

/// Scope of the cookie removed by [`CookieHandler::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOptions {
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self {
            path: Some("/".to_string()),
            domain: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieHandler {
    cookies: IndexMap<String, StringCookie>,
}

impl CookieHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name`. An existing entry keeps its attributes.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.cookies.get_mut(name) {
            Some(existing) => existing.set_value(value),
            None => {
                self.cookies
                    .insert(name.to_string(), StringCookie::new(name, value));
            }
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>, opts: CookieOptions) {
        self.insert(name, &value.into());
        let Some(cookie) = self.cookies.get_mut(name) else {
            return;
        };

        if let Some(secs) = opts.max_age {
            cookie.set_max_age(secs);
        }
        if let Some(path) = opts.path.as_deref() {
            cookie.set_path(path);
        }
        if let Some(domain) = opts.domain.as_deref() {
            cookie.set_domain(domain);
        }
        if let Some(secure) = opts.secure {
            cookie.set_secure(secure);
        }
        if let Some(at) = opts.expires {
            cookie.set_expires(at);
        }
    }

    /// Overwrites `name` with an empty cookie that expired at the Unix epoch,
    /// so clients drop it on receipt.
    pub fn delete(&mut self, name: &str, opts: DeleteOptions) {
        self.insert(name, "");
        let Some(cookie) = self.cookies.get_mut(name) else {
            return;
        };

        if let Some(path) = opts.path.as_deref() {
            cookie.set_path(path);
        }
        if let Some(domain) = opts.domain.as_deref() {
            cookie.set_domain(domain);
        }
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie.set_max_age(0);
    }

    pub fn get(&self, name: &str) -> Option<&StringCookie> {
        self.cookies.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StringCookie> {
        self.cookies.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Drops `name` from the container. Nothing is sent to the client for
    /// it; use [`CookieHandler::delete`] to expire a client cookie.
    pub fn remove(&mut self, name: &str) -> Option<StringCookie> {
        self.cookies.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, StringCookie> {
        self.cookies.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.keys().map(String::as_str)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }
}

impl<'a> IntoIterator for &'a CookieHandler {
    type Item = (&'a String, &'a StringCookie);
    type IntoIter = Iter<'a, String, StringCookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let mut jar = CookieHandler::new();
        jar.set("lang", "fr", CookieOptions::default());

        let c = jar.get("lang").unwrap();
        assert_eq!(c, "fr");
        assert_eq!(c.path(), Some("/"));
        assert_eq!(c.max_age(), None);
        assert_eq!(c.secure(), None);
    }

    #[test]
    fn set_applies_only_given_attributes() {
        let mut jar = CookieHandler::new();
        jar.set(
            "sid",
            "42",
            CookieOptions {
                max_age: Some(3600),
                path: None,
                domain: Some("example.org".to_string()),
                secure: Some(true),
                ..CookieOptions::default()
            },
        );

        let c = jar.get("sid").unwrap();
        assert_eq!(c.max_age(), Some(3600));
        assert_eq!(c.path(), None);
        assert_eq!(c.domain(), Some("example.org"));
        assert_eq!(c.secure(), Some(true));
        assert_eq!(c.expires(), None);

        let at = OffsetDateTime::UNIX_EPOCH + time::Duration::days(365);
        jar.set(
            "sid",
            "43",
            CookieOptions {
                expires: Some(at),
                ..CookieOptions::default()
            },
        );
        let c = jar.get("sid").unwrap();
        assert_eq!(c.expires(), Some(at));
        assert_eq!(c.max_age(), Some(3600));
    }

    #[test]
    fn expires_before_epoch_is_stored_and_readable() {
        let mut jar = CookieHandler::new();
        let at = OffsetDateTime::UNIX_EPOCH - time::Duration::days(1);
        jar.set(
            "old",
            "v",
            CookieOptions {
                expires: Some(at),
                ..CookieOptions::default()
            },
        );

        let c = jar.get("old").unwrap();
        assert_eq!(c.expires(), Some(at));
        assert_eq!(
            c.attribute("expires").unwrap().as_deref(),
            Some("Wed, 31 Dec 1969 00:00:00 GMT")
        );
    }

    #[test]
    fn delete_writes_expired_empty_cookie() {
        let mut jar = CookieHandler::new();
        jar.insert("sid", "42");
        jar.delete("sid", DeleteOptions::default());

        let c = jar.get("sid").unwrap();
        assert_eq!(c, "");
        assert_eq!(c.max_age(), Some(0));
        assert_eq!(c.expires(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(c.path(), Some("/"));
    }

    #[test]
    fn delete_of_unknown_name_still_creates_entry() {
        let mut jar = CookieHandler::new();
        jar.delete(
            "ghost",
            DeleteOptions {
                path: None,
                domain: Some("example.org".to_string()),
            },
        );

        let c = jar.get("ghost").unwrap();
        assert!(c.is_empty());
        assert_eq!(c.path(), None);
        assert_eq!(c.domain(), Some("example.org"));
    }

    #[test]
    fn insert_keeps_existing_attributes() {
        let mut jar = CookieHandler::new();
        jar.set(
            "cart",
            "1",
            CookieOptions {
                path: Some("/shop".to_string()),
                secure: Some(true),
                ..CookieOptions::default()
            },
        );
        jar.insert("cart", "2");

        let c = jar.get("cart").unwrap();
        assert_eq!(c, "2");
        assert_eq!(c.path(), Some("/shop"));
        assert_eq!(c.secure(), Some(true));
    }

    #[test]
    fn one_entry_per_name() {
        let mut jar = CookieHandler::new();
        jar.insert("a", "1");
        jar.insert("a", "2");
        jar.set("a", "3", CookieOptions::default());
        assert_eq!(jar.len(), 1);
        assert_eq!(jar.names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn equality_is_by_value() {
        let mut a = CookieHandler::new();
        let mut b = CookieHandler::new();
        a.insert("x", "1");
        b.set(
            "x",
            "1",
            CookieOptions {
                secure: Some(true),
                ..CookieOptions::default()
            },
        );
        assert_eq!(a, b);
    }
}
