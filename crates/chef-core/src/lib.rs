pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ChefConfig;
pub use error::{ChefError, Result};
pub use types::{Role, Turn};

#[cfg(test)]
mod tests;
