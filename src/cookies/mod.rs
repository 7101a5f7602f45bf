//! Request cookie handling.
//!
//! Parsing and encoding of cookie syntax is left to the `cookie` crate; this
//! module only adds the container handlers mutate ([`CookieHandler`]), its
//! entry type ([`StringCookie`]) and the [`Snapshot`] used to find what
//! changed while a request was handled.

pub mod entry;
pub mod error;
pub mod jar;
pub mod snapshot;

pub use entry::StringCookie;
pub use error::CookieError;
pub use jar::{CookieHandler, CookieOptions, DeleteOptions};
pub use snapshot::Snapshot;
