mod file_loader;
mod llm_client;
mod outline_renderer;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{ChatCompletionParams, LlmClient, LlmClientError, LlmTokenStream};
pub use outline_renderer::{OutlineRenderer, RenderError};
