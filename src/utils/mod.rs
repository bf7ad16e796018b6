pub mod error;

pub use error::{BoxResult, DoctocError, Result};
