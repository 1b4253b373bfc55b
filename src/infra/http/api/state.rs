use std::sync::Arc;

use crate::application::posts::PostService;
use crate::application::preview::PreviewService;

#[derive(Clone)]
pub struct ApiState {
    pub posts: Arc<PostService>,
    pub preview: Arc<PreviewService>,
}
