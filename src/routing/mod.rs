//! Dynamic route registration
//!
//! Handlers are keyed by exact path. Only GET registrations take part in
//! dispatch; other methods are stored but never routed to.

pub mod registry;

pub use registry::{Handler, RouteRegistry};
