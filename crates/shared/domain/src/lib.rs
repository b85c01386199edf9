//! Domain layer - Core records and the rules they must satisfy.
//!
//! This crate has no infrastructure dependencies. Both services share
//! these types; storage and HTTP concerns live in the service crates.

pub mod constants;
pub mod error;
pub mod task;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use task::{Task, TaskId};
pub use user::{User, UserId, UserInput};
