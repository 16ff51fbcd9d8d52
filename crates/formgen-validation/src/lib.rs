//! Formgen-Validation Core
//!
//! Pure check functions shared by the formgen rule registry.
//! Every check answers a single yes/no question about one value and knows
//! nothing about schemas, attribute types or error messages.

pub mod email;
pub mod numeric;
pub mod string;

// Re-export all checks
pub use email::*;
pub use numeric::*;
pub use string::*;
