mod commands;
mod queries;
mod service;
pub mod types;

pub use queries::page_limit;
pub use service::PostService;
pub use types::{CreatePostCommand, PostServiceError, UpdatePostCommand};
