//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements I/O boundary traits (filesystem, PDF rendering,
//! font discovery) and wires up services.

pub mod di;
pub mod error;
pub mod fonts;
pub mod input;
pub mod pdf;
pub mod traits;

pub use error::{InfraError, InfraResult};
