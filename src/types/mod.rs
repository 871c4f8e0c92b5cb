//! Shared types used across layers.

mod response;
pub mod timestamp;

pub use response::{Created, NoContent};
