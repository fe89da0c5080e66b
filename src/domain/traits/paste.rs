use async_trait::async_trait;
use crate::application::errors::PasteError;

/// PasteService trait - abstraction for the paste-sharing collaborator
#[async_trait]
pub trait PasteService: Send + Sync {
    /// Upload `contents` and return a shareable URL
    async fn create_paste(&self, contents: &str) -> Result<String, PasteError>;
}
