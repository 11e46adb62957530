pub mod llm;
pub mod observability;
pub mod relay_client;
pub mod rendering;
pub mod text_processing;

pub use relay_client::{RelayClient, RelayClientError};
