//! A small async HTTP/1.1 server whose handlers work with cookies through a
//! request-scoped container.
//!
//! The `cookies` middleware wraps incoming cookies into a
//! [`CookieHandler`](cookies::CookieHandler) before routing and, once the
//! handler returned, sends every cookie whose value changed back to the
//! client as a `Set-Cookie` header.

pub mod config;
pub mod cookies;
pub mod handler;
pub mod http;
pub mod net;
