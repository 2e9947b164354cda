//! Blog API access
//!
//! REST calls over `gloo-net`. Every function returns `Result<T, String>`
//! with a message ready to show in a toast.

mod client;

pub use client::*;
