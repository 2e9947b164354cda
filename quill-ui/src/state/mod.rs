//! State Management
//!
//! Global application state, the session token slot, and the chat connection.

pub mod chat;
pub mod global;
pub mod session;
