use indexmap::IndexMap;

use crate::cookies::jar::CookieHandler;

/// Name to value copy of a [`CookieHandler`], taken when a request's cookies
/// are wrapped and compared against the live container once it is handled.
///
/// Only value strings are captured, so a change that touches nothing but a
/// cookie's attributes is invisible to [`Snapshot::changed_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    values: IndexMap<String, String>,
}

impl Snapshot {
    pub fn of(jar: &CookieHandler) -> Self {
        jar.iter()
            .map(|(name, cookie)| (name.to_string(), cookie.value().to_string()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names in `current` that are new or hold a different value than in
    /// `self`. Names dropped from `current` are not reported.
    pub fn changed_names<'a>(&self, current: &'a Snapshot) -> Vec<&'a str> {
        current
            .values
            .iter()
            .filter(|(name, value)| self.get(name) != Some(value.as_str()))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(pairs: &[(&str, &str)]) -> Snapshot {
        pairs.iter().copied().collect()
    }

    #[test]
    fn identical_maps_have_no_changes() {
        let before = snap(&[("a", "1"), ("b", "2")]);
        let after = snap(&[("b", "2"), ("a", "1")]);
        assert_eq!(before, after);
        assert!(before.changed_names(&after).is_empty());
    }

    #[test]
    fn reports_modified_and_added_names() {
        let before = snap(&[("a", "1"), ("b", "2")]);
        let after = snap(&[("a", "1"), ("b", "3"), ("c", "x")]);
        assert_eq!(before.changed_names(&after), vec!["b", "c"]);
    }

    #[test]
    fn removed_names_are_not_reported() {
        let before = snap(&[("a", "1"), ("b", "2")]);
        let after = snap(&[("a", "1")]);
        assert_ne!(before, after);
        assert!(before.changed_names(&after).is_empty());
    }

    #[test]
    fn empty_value_on_new_name_is_a_change() {
        let before = snap(&[]);
        let after = snap(&[("gone", "")]);
        assert_eq!(before.changed_names(&after), vec!["gone"]);
    }
}
