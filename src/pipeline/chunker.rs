// file: src/pipeline/chunker.rs
// description: sliding-window text chunking with sentence-boundary snapping
// reference: character windows, UTF-8 safe

use crate::error::{KbError, Result};

/// Splits text into bounded, overlapping chunks on natural boundaries.
///
/// The window walks the text `chunk_size` characters at a time. A window
/// that does not reach end-of-text is cut back to just after the last `.`
/// or newline, provided that boundary lies past the window midpoint; worst
/// case shrinkage is therefore 50%. Consecutive windows share `overlap`
/// characters. Chunk boundaries are load-bearing for stored ids and
/// metadata, so the heuristic must not be changed.
#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Chunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(KbError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if overlap >= chunk_size {
            return Err(KbError::Config(format!(
                "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Pure function of `(text, chunk_size, overlap)`: same inputs always
    /// produce the same chunks. Emitted chunks are trimmed and non-empty.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let mut end = start + self.chunk_size;
            let mut window = &chars[start..end.min(chars.len())];

            if end < chars.len() {
                if let Some(break_at) = window.iter().rposition(|&c| c == '.' || c == '\n') {
                    if break_at > self.chunk_size / 2 {
                        end = start + break_at + 1;
                        window = &chars[start..end];
                    }
                }
            }

            let chunk: String = window.iter().collect();
            let trimmed = chunk.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            let next = end.saturating_sub(self.overlap);
            // A boundary cut shorter than the overlap would stall the
            // window; step past it without overlap instead.
            start = if next > start { next } else { end };
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(Chunker::new(0, 0).is_err());
        assert!(Chunker::new(100, 100).is_err());
        assert!(Chunker::new(100, 150).is_err());
        assert!(Chunker::new(100, 99).is_ok());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let chunker = Chunker::new(500, 50).unwrap();
        let chunks = chunker.chunk("  A short note.  ");

        assert_eq!(chunks, vec!["A short note.".to_string()]);
    }

    #[test]
    fn test_empty_and_whitespace_text_yield_nothing() {
        let chunker = Chunker::new(500, 50).unwrap();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk(" \n\t  ").is_empty());
    }

    #[test]
    fn test_splits_on_sentence_terminator_near_boundary() {
        let chunker = Chunker::new(20, 5).unwrap();
        let chunks = chunker.chunk("Sentence one. Sentence two. Sentence three.");

        assert!(chunks.len() >= 2);
        assert_eq!(chunks[0], "Sentence one.");
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20, "oversized chunk: {chunk:?}");
        }
        // Neighboring chunks share overlapping context.
        assert!(chunks[1].starts_with("one."));
    }

    #[test]
    fn test_chunks_are_bounded_and_non_empty() {
        let chunker = Chunker::new(100, 20).unwrap();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunks = chunker.chunk(&text);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(!chunk.trim().is_empty());
            assert!(chunk.chars().count() <= 100);
        }
    }

    #[test]
    fn test_chunk_count_bound_without_boundary_cuts() {
        // No sentence terminators, so every window advances by
        // chunk_size - overlap and the count bound is exact.
        let chunker = Chunker::new(50, 10).unwrap();
        let text = "lorem ipsum dolor sit amet consectetur ".repeat(30);
        let len = text.chars().count();

        let chunks = chunker.chunk(&text);
        let bound = len.div_ceil(50 - 10) + 1;
        assert!(chunks.len() <= bound, "{} chunks > bound {}", chunks.len(), bound);
    }

    #[test]
    fn test_chunker_is_deterministic() {
        let chunker = Chunker::new(64, 16).unwrap();
        let text = "First sentence. Second sentence follows here.\nThird on a new line. ".repeat(8);

        assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn test_multibyte_text_is_chunked_safely() {
        let chunker = Chunker::new(30, 5).unwrap();
        let text = "Der Bär läuft durch den Wald. Über die Brücke geht es weiter. Am Fluß endet der Weg.";
        let chunks = chunker.chunk(text);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 30);
        }
        assert_eq!(chunks[0], "Der Bär läuft durch den Wald.");
    }

    #[test]
    fn test_coverage_has_no_gaps() {
        // Window [start, end) always resumes at end - overlap, so every
        // word of the text lands in at least one chunk.
        let chunker = Chunker::new(40, 10).unwrap();
        let text = "Notes on the meeting. Action items follow. Deadline is Friday. Review next week.";
        let chunks = chunker.chunk(text);

        for word in text.split_whitespace() {
            assert!(
                chunks.iter().any(|c| c.contains(word)),
                "word {word:?} missing from all chunks"
            );
        }
    }
}
