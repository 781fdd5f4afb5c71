//! NSMU ICS Core Library
//!
//! Extracts the class schedule of the Northern State Medical University
//! from its web timetable pages and serializes it to JSON and iCalendar.

pub mod datetime;
pub mod error;
pub mod ics;
pub mod loader;
pub mod parser;
pub mod provider;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, ExtractError, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{ics::*, loader::*, parser::*, provider::*, types::*};
}
