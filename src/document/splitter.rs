/// Separator-based text splitter with bounded chunk size and trailing overlap.
///
/// The text is cut on `separator`, empty pieces are dropped, and pieces are
/// greedily merged back together until adding the next one would push the
/// chunk past `chunk_size` characters. When a chunk is flushed, trailing
/// pieces totalling at most `chunk_overlap` characters are carried into the
/// next chunk. A single piece longer than `chunk_size` is kept whole; the
/// splitter never cuts inside a separator-free run.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    separator: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(separator: &str, chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separator: separator.to_string(),
            chunk_size,
            chunk_overlap,
        }
    }

    /// Splitter for one analysis mode: newline separator, mode-specific bounds.
    pub fn for_config(config: &crate::analysis::AnalysisConfig) -> Self {
        Self::new("\n", config.chunk_size, config.chunk_overlap)
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let sep_len = self.separator.len();
        let pieces: Vec<&str> = text
            .split(self.separator.as_str())
            .filter(|p| !p.trim().is_empty())
            .collect();

        let mut chunks: Vec<String> = Vec::new();
        let mut window: Vec<&str> = Vec::new();
        let mut window_len = 0usize;

        for piece in pieces {
            let merged_len = if window.is_empty() {
                piece.len()
            } else {
                window_len + sep_len + piece.len()
            };

            if merged_len > self.chunk_size && !window.is_empty() {
                chunks.push(window.join(&self.separator));

                // Carry trailing pieces into the next chunk, up to the
                // overlap budget.
                let mut kept: Vec<&str> = Vec::new();
                let mut kept_len = 0usize;
                for p in window.iter().rev() {
                    let next_len = if kept.is_empty() {
                        p.len()
                    } else {
                        kept_len + sep_len + p.len()
                    };
                    if next_len > self.chunk_overlap {
                        break;
                    }
                    kept.push(p);
                    kept_len = next_len;
                }
                kept.reverse();
                window = kept;
                window_len = kept_len;

                // The carried overlap plus the new piece must still fit;
                // shed carried pieces from the front until it does.
                while !window.is_empty() && window_len + sep_len + piece.len() > self.chunk_size {
                    let removed = window.remove(0);
                    window_len = if window.is_empty() {
                        0
                    } else {
                        window_len - removed.len() - sep_len
                    };
                }
            }

            window_len = if window.is_empty() {
                piece.len()
            } else {
                window_len + sep_len + piece.len()
            };
            window.push(piece);
        }

        if !window.is_empty() {
            chunks.push(window.join(&self.separator));
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_chunks() {
        let splitter = TextSplitter::new("\n", 100, 20);
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("  \n \n ").is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let splitter = TextSplitter::new("\n", 100, 20);
        let chunks = splitter.split("first line\nsecond line");
        assert_eq!(chunks, vec!["first line\nsecond line".to_string()]);
    }

    #[test]
    fn respects_chunk_size() {
        let splitter = TextSplitter::new("\n", 25, 0);
        let text = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc\ndddddddddd";
        let chunks = splitter.split(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "aaaaaaaaaa\nbbbbbbbbbb");
        assert_eq!(chunks[1], "cccccccccc\ndddddddddd");
        for chunk in &chunks {
            assert!(chunk.len() <= 25);
        }
    }

    #[test]
    fn overlap_carries_trailing_piece() {
        let splitter = TextSplitter::new("\n", 25, 12);
        let text = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc";
        let chunks = splitter.split(text);
        assert_eq!(chunks.len(), 2);
        // The second chunk re-opens with the last piece of the first one.
        assert_eq!(chunks[1], "bbbbbbbbbb\ncccccccccc");
    }

    #[test]
    fn overlap_never_overflows_chunk_size() {
        // Overlap large enough to carry the whole previous window; the
        // carried pieces must shrink so the next piece still fits.
        let splitter = TextSplitter::new("\n", 25, 24);
        let text = "aaaaaaaaaa\nbbbbbbbbbb\ncccccccccc";
        let chunks = splitter.split(text);
        assert_eq!(
            chunks,
            vec![
                "aaaaaaaaaa\nbbbbbbbbbb".to_string(),
                "bbbbbbbbbb\ncccccccccc".to_string()
            ]
        );
        for chunk in &chunks {
            assert!(chunk.len() <= 25);
        }
    }

    #[test]
    fn oversized_piece_kept_whole() {
        let splitter = TextSplitter::new("\n", 10, 0);
        let long = "x".repeat(40);
        let chunks = splitter.split(&format!("short\n{}\ntail", long));
        assert!(chunks.contains(&long));
    }

    #[test]
    fn blank_lines_are_discarded() {
        let splitter = TextSplitter::new("\n", 100, 0);
        let chunks = splitter.split("one\n\n\ntwo\n");
        assert_eq!(chunks, vec!["one\ntwo".to_string()]);
    }
}
