mod front_matter;
mod html_exporter;
mod markmap_renderer;

pub use front_matter::{FrontMatter, split_front_matter};
pub use html_exporter::{HTML_EXPORT_FILENAME, HtmlExporter, MARKDOWN_EXPORT_FILENAME};
pub use markmap_renderer::{MAX_OUTLINE_DEPTH, MarkmapRenderer};
