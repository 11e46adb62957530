use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileFormat, SourceDocument};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Handles `.txt` and `.md`: the bytes already are the text.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &SourceDocument,
    ) -> Result<String, FileLoaderError> {
        if !matches!(document.format, FileFormat::PlainText | FileFormat::Markdown) {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.as_mime().to_string(),
            ));
        }

        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
