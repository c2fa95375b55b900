//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1: one request per connection, only the request
//! line is interpreted, and responses are framed by hand.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Splits the request line into method, URI and version
//! - **`path`**: Turns a URI into a dispatch path and query string
//! - **`request`**: The request handed to dynamic route handlers
//! - **`response`**: Status codes, handler responses and wire-ready replies
//! - **`writer`**: Serializes and writes replies to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────────┐
//!        │ AwaitingRequestLine  │ ← Read one line (bounded by the read timeout)
//!        └──────────┬───────────┘
//!                   │ line (or nothing)
//!                   ▼
//!        ┌──────────────────────┐
//!        │     Dispatching      │ ← 400 / route / built-in / static file
//!        └──────────┬───────────┘
//!                   │ reply decided
//!                   ▼
//!        ┌──────────────────────┐
//!        │       Writing        │ ← Send the framed reply
//!        └──────────┬───────────┘
//!                   ▼
//!                 Closed           ← stream shut down unconditionally
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod path;
pub mod request;
pub mod response;
pub mod writer;
