//! Application services layered over the markdown pipeline.

pub mod content;
pub mod error;
pub mod posts;
pub mod preview;
pub mod render;
pub mod repos;
