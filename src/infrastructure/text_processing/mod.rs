mod composite_file_loader;
mod docx_adapter;
mod plain_text_adapter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::{collapse_whitespace, decode_xml_entities, strip_document_xml_tags};
