//! Command implementations.

pub mod demo;
pub mod extract;
pub mod patterns;

pub use self::demo::execute_demo;
pub use self::extract::execute_extract;
pub use self::patterns::execute_patterns;
