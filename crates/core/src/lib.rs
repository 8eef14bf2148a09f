//! # rulegen core
//!
//! Core types, traits, and error handling shared by every rulegen crate.
//!
//! - **Types**: semantic column types, foreign references and rule tokens
//! - **Traits**: `Validatable` and `CodeGenerable`
//! - **Errors**: unified error handling with `RulegenError` and `RulegenResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ResultExt, RulegenError, RulegenResult};
pub use traits::{CodeGenContext, CodeGenerable, Validatable};
pub use types::{ColumnType, ForeignRef, RuleToken, is_valid_identifier};
