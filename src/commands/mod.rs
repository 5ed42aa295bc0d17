//! Server Command Wrappers
//!
//! Frontend bindings to the task application's JSON endpoints.

mod order;

pub use order::*;
