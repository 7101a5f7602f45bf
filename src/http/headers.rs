//! HTTP headers abstraction for [`HttpRequest`](crate::http::request::HttpRequest) and
//! [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Headers are stored in an ordered map to preserve insertion order, one value
//! per name. Names are matched case-insensitively on lookup but written back
//! with the casing they were first set with.
//!
//! `Set-Cookie` is the one header that may legitimately repeat, so it is not
//! kept here: responses carry their cookies in
//! [`ResponseCookies`](crate::http::cookies::ResponseCookies) and serialize
//! them separately.

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct HttpHeaders {
    headers: IndexMap<String, String>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.headers
            .keys()
            .position(|k| k.eq_ignore_ascii_case(name))
    }

    /// Sets a header without any check on name or value.
    pub fn set_raw(&mut self, name: &str, value: &str) {
        match self.find(name) {
            Some(idx) => {
                if let Some((_, v)) = self.headers.get_index_mut(idx) {
                    *v = value.to_string();
                }
            }
            None => {
                self.headers.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Appends `value` to an existing header as a comma list, or sets it.
    pub fn append_raw(&mut self, name: &str, value: &str, sep: &str) {
        match self.find(name).and_then(|idx| self.headers.get_index_mut(idx)) {
            Some((_, v)) => {
                v.push_str(sep);
                v.push_str(value);
            }
            None => {
                self.headers.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.find(name)
            .and_then(|idx| self.headers.get_index(idx))
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.headers {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result
    }
}
