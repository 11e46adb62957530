mod mock_llm_client;
mod sse_decoder;
mod streaming_client;

pub use mock_llm_client::MockLlmClient;
pub use sse_decoder::SseDeltaDecoder;
pub use streaming_client::{StreamingLlmClient, delta_stream};
