//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Extension lifecycle and owner commands
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
