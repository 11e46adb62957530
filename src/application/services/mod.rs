mod mind_map_service;
mod mind_map_session;
mod prompt_template;
mod stream_consumer;
mod text_extraction_service;

pub use mind_map_service::{GenerationOptions, MindMapService, StreamEventStream};
pub use mind_map_session::MindMapSession;
pub use prompt_template::{DEFAULT_SYSTEM_PROMPT, build_mind_map_prompt};
pub use stream_consumer::{
    ConsumerState, ConsumerUpdate, NdjsonLineDecoder, StreamConsumer, StreamConsumerError,
    consume_stream,
};
pub use text_extraction_service::{
    DEFAULT_MAX_FILE_SIZE_BYTES, ExtractionError, TextExtractionService,
};
