use serde::Deserialize;

const DONE_SENTINEL: &str = "[DONE]";

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Turns a chat-completions event stream into content deltas.
///
/// - Keeps a byte buffer, so lines and UTF-8 sequences may be split across reads
/// - Ignores blank lines, non-`data:` fields and the `[DONE]` sentinel
/// - Skips payloads that are not valid JSON
#[derive(Debug, Default)]
pub struct SseDeltaDecoder {
    buf: Vec<u8>,
    skipped_lines: usize,
}

impl SseDeltaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `data:` payloads dropped because they failed to parse.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let mut deltas = Vec::new();

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            if let Some(delta) = self.decode_line(&line) {
                deltas.push(delta);
            }
        }

        deltas
    }

    /// Processes whatever is left once the upstream closes without a final newline.
    pub fn finish(&mut self) -> Vec<String> {
        let line = std::mem::take(&mut self.buf);
        self.decode_line(&line).into_iter().collect()
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();

        let data = line.strip_prefix("data:")?;
        let data = data.strip_prefix(' ').unwrap_or(data);
        if data.is_empty() || data == DONE_SENTINEL {
            return None;
        }

        match serde_json::from_str::<ChatCompletionChunk>(data) {
            Ok(chunk) => chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta)
                .and_then(|delta| delta.content)
                .filter(|content| !content.is_empty()),
            Err(e) => {
                self.skipped_lines += 1;
                tracing::warn!(error = %e, payload = %data, "Error parsing upstream JSON line");
                None
            }
        }
    }
}
