mod api_settings;
mod document;
mod generation_request;
mod mind_map;
mod stream_event;

pub use api_settings::{ApiSettings, DEFAULT_API_ENDPOINT};
pub use document::{DocumentId, ExtractedText, FileFormat, SourceDocument, file_extension};
pub use generation_request::{
    DEFAULT_MODEL_ID, GenerationRequest, MAX_CHAR_LIMIT, ValidationError, check_length,
};
pub use mind_map::{MindMap, OutlineNode, clean_generated_markdown};
pub use stream_event::{StreamEvent, StreamEventFrame};
