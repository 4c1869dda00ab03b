pub mod api;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod queries;
pub mod types;

// Re-export commonly used types
pub use api::{GithubApiClient, GithubToken};
pub use error::{GithubError, GithubResult};
pub use gateway::ReviewGateway;
pub use mock::{MockGateway, RecordedReply};
pub use types::{PostedReply, PullRequestDetail, PullRequestSummary, ReviewReply, ReviewThread};
