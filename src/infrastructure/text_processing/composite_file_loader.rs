use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileFormat, SourceDocument};

use super::docx_adapter::DocxAdapter;
use super::plain_text_adapter::PlainTextAdapter;

pub struct CompositeFileLoader {
    adapters: HashMap<FileFormat, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(FileFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Plain text, markdown and DOCX, which is everything the upload path accepts.
    pub fn with_default_adapters() -> Self {
        let plain_text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter::new());
        Self::new(vec![
            (FileFormat::PlainText, Arc::clone(&plain_text)),
            (FileFormat::Markdown, plain_text),
            (FileFormat::Docx, docx),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&document.format).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(document.format.as_mime().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
