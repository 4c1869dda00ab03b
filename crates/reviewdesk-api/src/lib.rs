pub mod error;
pub mod handlers;
pub mod health;
pub mod reply;
pub mod router;
pub mod state;
pub mod templates;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use health::{health, init_server_start_time};
pub use router::router;
pub use state::AppState;
pub use templates::Templates;
