use super::pdf::SourceDocument;

/// A bounded window of one source document, the unit of retrieval.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
    pub source_name: String,
    /// Character offset of `content` within the cleaned source text.
    pub start_index: usize,
}

/// Overlapping-window splitter.
///
/// Windows are at most `chunk_size` characters with `chunk_overlap`
/// characters carried into the next window. Before hard-cutting mid-word,
/// the splitter backtracks to the nearest paragraph break, then sentence
/// ending, then whitespace. A boundary is only taken if it still leaves the
/// window longer than the overlap, which also guarantees forward progress.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

const SENTENCE_ENDINGS: [&str; 6] = [". ", "! ", "? ", ".\n", "!\n", "?\n"];

impl ChunkSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        assert!(chunk_overlap < chunk_size, "overlap must be below chunk size");
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split every document, preserving document order. No chunk crosses a
    /// document boundary.
    pub fn split_documents(&self, documents: &[SourceDocument]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for doc in documents {
            chunks.extend(self.split_text(&doc.text, &doc.source_name));
        }
        chunks
    }

    pub fn split_text(&self, text: &str, source_name: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < total {
            // Never begin a chunk on whitespace; keeps start_index honest.
            while start < total && chars[start].is_whitespace() {
                start += 1;
            }
            if start >= total {
                break;
            }

            let window_len = (total - start).min(self.chunk_size);
            let at_end = start + window_len == total;

            let mut cut = window_len;
            if !at_end {
                let window: String = chars[start..start + window_len].iter().collect();
                if let Some(boundary) = self.find_boundary(&window) {
                    cut = boundary;
                }
            }

            // Drop trailing whitespace from the emitted content without
            // shifting the next window.
            let mut content_len = cut;
            while content_len > 0 && chars[start + content_len - 1].is_whitespace() {
                content_len -= 1;
            }

            if content_len > 0 {
                let content: String = chars[start..start + content_len].iter().collect();
                chunks.push(Chunk {
                    content,
                    source_name: source_name.to_string(),
                    start_index: start,
                });
            }

            if start + cut >= total {
                break;
            }
            start = start + cut - self.chunk_overlap.min(cut.saturating_sub(1));
        }

        chunks
    }

    /// Best break position within `window` (in characters), or None for a
    /// hard cut at the full window.
    fn find_boundary(&self, window: &str) -> Option<usize> {
        self.paragraph_boundary(window)
            .or_else(|| self.sentence_boundary(window))
            .or_else(|| self.word_boundary(window))
    }

    fn usable(&self, cut_chars: usize) -> bool {
        cut_chars > self.chunk_overlap
    }

    fn paragraph_boundary(&self, window: &str) -> Option<usize> {
        let pos = window.rfind("\n\n")?;
        let cut = window[..pos + 2].chars().count();
        self.usable(cut).then_some(cut)
    }

    fn sentence_boundary(&self, window: &str) -> Option<usize> {
        let mut best: Option<usize> = None;
        for ending in SENTENCE_ENDINGS {
            if let Some(pos) = window.rfind(ending) {
                let byte_cut = pos + ending.len();
                best = Some(best.map_or(byte_cut, |b: usize| b.max(byte_cut)));
            }
        }
        let cut = window[..best?].chars().count();
        self.usable(cut).then_some(cut)
    }

    fn word_boundary(&self, window: &str) -> Option<usize> {
        let pos = window.rfind(char::is_whitespace)?;
        let cut = window[..pos + window[pos..].chars().next().map_or(1, char::len_utf8)]
            .chars()
            .count();
        self.usable(cut).then_some(cut)
    }
}
