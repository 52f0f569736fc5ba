//! Core domain models
//!
//! The two configuration documents (models and pipeline), their error
//! taxonomy and the path template variables shared by every stage.

pub mod defaults;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod template;

pub use error::*;
pub use models::*;
pub use pipeline::*;
