pub mod api_types;
mod export;
mod extract;
mod generate;
mod health;

pub use export::{export_html_handler, export_markdown_handler, render_handler};
pub use extract::extract_handler;
pub use generate::{NDJSON_CONTENT_TYPE, generate_mindmap_handler};
pub use health::health_handler;
