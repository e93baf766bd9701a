//! # Newsroom Core
//!
//! The domain layer of the newsroom post service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult, RepoError};
pub use services::{EmptyListPolicy, PostService};
