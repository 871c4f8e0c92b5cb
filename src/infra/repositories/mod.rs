//! Repository layer - Data access abstraction
//!
//! SeaORM implementation of the domain's `UserRepository` contract.

pub(crate) mod entities;
mod user_repository;

pub use user_repository::UserStore;
