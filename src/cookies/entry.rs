//! A single request cookie that behaves like its value string.
//!
//! [`StringCookie`] wraps a [`cookie::Cookie`] and keeps its structured
//! attributes (path, domain, max-age, expiry, secure flag) while comparing,
//! hashing and printing as the plain value. Two entries with the same value
//! but different attributes are equal.

use std::fmt;
use std::hash::{Hash, Hasher};

use cookie::Cookie;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::cookies::error::CookieError;

// Same layout the `cookie` crate writes after `Expires=`.
const EXPIRES_FORMAT: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year padding:none] [hour]:[minute]:[second] GMT"
);

fn format_expires(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(EXPIRES_FORMAT)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

#[derive(Debug, Clone)]
pub struct StringCookie {
    inner: Cookie<'static>,
}

impl StringCookie {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            inner: Cookie::new(name.to_string(), value.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn value(&self) -> &str {
        self.inner.value()
    }

    pub fn path(&self) -> Option<&str> {
        self.inner.path()
    }

    pub fn domain(&self) -> Option<&str> {
        self.inner.domain()
    }

    /// Max-age in whole seconds.
    pub fn max_age(&self) -> Option<i64> {
        self.inner.max_age().map(|d| d.whole_seconds())
    }

    pub fn expires(&self) -> Option<OffsetDateTime> {
        self.inner.expires_datetime()
    }

    pub fn secure(&self) -> Option<bool> {
        self.inner.secure()
    }

    pub fn len(&self) -> usize {
        self.value().len()
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    pub fn contains(&self, pat: &str) -> bool {
        self.value().contains(pat)
    }

    /// Looks up an attribute by its `Set-Cookie` key, rendered as text.
    ///
    /// Unset attributes yield `Ok(None)`. Keys are matched case-insensitively;
    /// anything outside the known attribute set is an error.
    pub fn attribute(&self, key: &str) -> Result<Option<String>, CookieError> {
        let rendered = match key.to_ascii_lowercase().as_str() {
            "expires" => self.expires().map(format_expires),
            "path" => self.path().map(str::to_string),
            "domain" => self.domain().map(str::to_string),
            "max-age" => self.max_age().map(|secs| secs.to_string()),
            "secure" => self.secure().map(|flag| flag.to_string()),
            "httponly" => self.inner.http_only().map(|flag| flag.to_string()),
            "samesite" => self.inner.same_site().map(|site| site.to_string()),
            _ => {
                return Err(CookieError::AttributeNotFound {
                    attribute: key.to_string(),
                    kind: "StringCookie",
                });
            }
        };
        Ok(rendered)
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.inner.set_value(value.to_string());
    }

    pub fn set_path(&mut self, path: &str) {
        self.inner.set_path(path.to_string());
    }

    pub fn set_domain(&mut self, domain: &str) {
        self.inner.set_domain(domain.to_string());
    }

    pub fn set_max_age(&mut self, secs: i64) {
        self.inner.set_max_age(Duration::seconds(secs));
    }

    pub fn set_expires(&mut self, at: OffsetDateTime) {
        self.inner.set_expires(at);
    }

    pub fn set_secure(&mut self, secure: bool) {
        self.inner.set_secure(secure);
    }

    /// The underlying cookie, attributes included.
    pub fn cookie(&self) -> &Cookie<'static> {
        &self.inner
    }
}

impl fmt::Display for StringCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl AsRef<str> for StringCookie {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl PartialEq for StringCookie {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for StringCookie {}

impl PartialEq<str> for StringCookie {
    fn eq(&self, other: &str) -> bool {
        self.value() == other
    }
}

impl PartialEq<&str> for StringCookie {
    fn eq(&self, other: &&str) -> bool {
        self.value() == *other
    }
}

impl PartialEq<String> for StringCookie {
    fn eq(&self, other: &String) -> bool {
        self.value() == other.as_str()
    }
}

impl Hash for StringCookie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl From<Cookie<'static>> for StringCookie {
    fn from(inner: Cookie<'static>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn behaves_like_its_value() {
        let c = StringCookie::new("theme", "dark-blue");
        assert_eq!(c, "dark-blue");
        assert_eq!(c.to_string(), "dark-blue");
        assert_eq!(c.len(), 9);
        assert!(c.contains("blue"));
        assert!(!c.is_empty());
    }

    #[test]
    fn equality_and_hash_ignore_attributes() {
        let plain = StringCookie::new("a", "1");
        let mut scoped = StringCookie::new("a", "1");
        scoped.set_path("/admin");
        scoped.set_secure(true);

        assert_eq!(plain, scoped);

        let set: HashSet<StringCookie> = [plain, scoped].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn attribute_lookup_renders_known_keys() {
        let mut c = StringCookie::new("sid", "abc");
        c.set_path("/");
        c.set_max_age(0);
        c.set_expires(OffsetDateTime::UNIX_EPOCH);

        assert_eq!(c.attribute("path").unwrap().as_deref(), Some("/"));
        assert_eq!(c.attribute("Max-Age").unwrap().as_deref(), Some("0"));
        assert_eq!(
            c.attribute("expires").unwrap().as_deref(),
            Some("Thu, 01 Jan 1970 00:00:00 GMT")
        );
        assert_eq!(c.attribute("domain").unwrap(), None);
    }

    #[test]
    fn expires_before_epoch_renders_like_set_cookie() {
        let mut c = StringCookie::new("old", "v");
        c.set_expires(OffsetDateTime::UNIX_EPOCH - Duration::days(1));

        let rendered = c.attribute("expires").unwrap().unwrap();
        assert_eq!(rendered, "Wed, 31 Dec 1969 00:00:00 GMT");
        assert!(c.cookie().to_string().contains(&format!("Expires={rendered}")));
    }

    #[test]
    fn unknown_attribute_names_key_and_type() {
        let c = StringCookie::new("sid", "abc");
        let err = c.attribute("flavour").unwrap_err();
        assert_eq!(
            err,
            CookieError::AttributeNotFound {
                attribute: "flavour".to_string(),
                kind: "StringCookie",
            }
        );
        assert_eq!(
            err.to_string(),
            "'StringCookie' object has no attribute 'flavour'"
        );
    }
}
