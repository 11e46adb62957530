use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ExtractedText, FileFormat, MAX_CHAR_LIMIT, SourceDocument, file_extension};

pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

const BINARY_PROBE_CHARS: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("file is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("{0}")]
    Parse(String),
    #[error("extracted text has {length} characters, more than the {limit} allowed")]
    TooManyCharacters { length: usize, limit: usize },
}

impl From<FileLoaderError> for ExtractionError {
    fn from(e: FileLoaderError) -> Self {
        match e {
            FileLoaderError::UnsupportedFormat(format) => Self::UnsupportedFormat(format),
            FileLoaderError::ExtractionFailed(message) => Self::Parse(message),
        }
    }
}

pub struct TextExtractionService<F>
where
    F: FileLoader + ?Sized,
{
    file_loader: Arc<F>,
    max_file_size_bytes: usize,
}

impl<F> TextExtractionService<F>
where
    F: FileLoader + ?Sized,
{
    pub fn new(file_loader: Arc<F>, max_file_size_bytes: usize) -> Self {
        Self {
            file_loader,
            max_file_size_bytes,
        }
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_bytes
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(
        &self,
        filename: &str,
        data: &[u8],
    ) -> Result<ExtractedText, ExtractionError> {
        if data.len() > self.max_file_size_bytes {
            tracing::warn!(limit = self.max_file_size_bytes, "Rejecting oversized file");
            return Err(ExtractionError::FileTooLarge {
                size: data.len(),
                limit: self.max_file_size_bytes,
            });
        }

        let extension = file_extension(filename);
        let format = FileFormat::from_extension(&extension)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(extension.clone()))?;

        let document = SourceDocument::new(filename.to_string(), format, data.len() as u64);
        let text = self.file_loader.extract_text(data, &document).await?;
        let extracted = ExtractedText::new(text);

        tracing::info!(
            document_id = %document.id.as_uuid(),
            format = %format,
            length = extracted.char_count,
            byte_length = extracted.byte_count,
            "Text extracted"
        );

        if looks_binary(&extracted.text) {
            tracing::warn!(
                document_id = %document.id.as_uuid(),
                "Extracted text contains control characters; the file may be binary"
            );
        }

        if extracted.char_count > MAX_CHAR_LIMIT {
            return Err(ExtractionError::TooManyCharacters {
                length: extracted.char_count,
                limit: MAX_CHAR_LIMIT,
            });
        }

        Ok(extracted)
    }
}

fn looks_binary(text: &str) -> bool {
    text.chars()
        .take(BINARY_PROBE_CHARS)
        .any(|c| matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}'))
}
