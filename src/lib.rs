//! Lantern - a minimal HTTP/1.1 server over raw TCP
//!
//! Exact-path dynamic routes, a small table of built-in routes and static
//! files, one request per connection.

pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;
