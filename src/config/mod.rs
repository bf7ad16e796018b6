mod types;
mod loader;
mod defaults;
mod resolver;
mod validation;
mod session;
pub mod selector;

pub use types::*;
pub use loader::{load_config, parse_config, DoctocConfig};
pub use session::SessionScope;
