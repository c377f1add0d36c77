//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for MongoDB connectivity and data persistence.
//!
//! # Modules
//!
//! - [`mongo`] - Client setup and connection verification
//! - [`persistence`] - MongoDB repository implementations

pub mod mongo;
pub mod persistence;
