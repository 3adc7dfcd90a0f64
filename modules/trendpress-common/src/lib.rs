pub mod config;
pub mod error;
pub mod types;

pub use config::StudioConfig;
pub use error::StudioError;
pub use types::*;
