//! API layer - translating service outcomes for HTTP callers.

mod response;

pub use response::{respond, ServiceResponse};
