pub mod config;
pub mod error;
pub mod repo;
pub mod time;

// Re-export commonly used types
pub use config::{PrState, ServerConfig, UiConfig, parse_flag};
pub use error::{CoreError, CoreResult};
pub use repo::RepoRef;
pub use time::format_relative;
