//! Byte offset to line/column translation

/// Precomputed line starts for a source string, for offset-to-line lookups.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Build the index for `source`
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    /// Zero-based line number containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset) - 1
    }

    /// One-based (line, column) for `offset`; column counts bytes
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_of(offset);
        (line + 1, offset - self.starts[line] + 1)
    }
}
