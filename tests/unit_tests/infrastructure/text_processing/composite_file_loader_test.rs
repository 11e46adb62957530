use std::sync::Arc;

use smart_mindmap::application::ports::{FileLoader, FileLoaderError};
use smart_mindmap::domain::{FileFormat, SourceDocument};
use smart_mindmap::infrastructure::text_processing::{CompositeFileLoader, PlainTextAdapter};

#[tokio::test]
async fn given_markdown_document_when_loading_then_delegates_to_text_adapter() {
    let loader = CompositeFileLoader::with_default_adapters();
    let data = b"# Heading";
    let document = SourceDocument::new("notes.md".to_string(), FileFormat::Markdown, 9);

    let text = loader.extract_text(data, &document).await.unwrap();

    assert_eq!(text, "# Heading");
}

#[tokio::test]
async fn given_unregistered_format_when_loading_then_returns_unsupported() {
    let text_adapter: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
    let loader = CompositeFileLoader::new(vec![(FileFormat::PlainText, text_adapter)]);
    let document = SourceDocument::new("report.docx".to_string(), FileFormat::Docx, 2);

    let result = loader.extract_text(b"PK", &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(_))));
}
