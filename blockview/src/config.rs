//! Extraction configuration

use blockview_core::Direction;

/// Configuration for block-cached extraction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractionConfig {
    /// Rows per cached block for row traversal; `None` uses the backend's grid
    pub row_block: Option<usize>,
    /// Columns per cached block for column traversal; `None` uses the backend's grid
    pub col_block: Option<usize>,
    /// Widen secondary ranges to native chunk boundaries
    pub align_to_chunks: bool,
}

impl ExtractionConfig {
    /// Override the row block size
    pub fn with_row_block(mut self, rows: usize) -> Self {
        self.row_block = Some(rows);
        self
    }

    /// Override the column block size
    pub fn with_col_block(mut self, cols: usize) -> Self {
        self.col_block = Some(cols);
        self
    }

    /// Enable or disable secondary-axis chunk alignment
    pub fn with_chunk_alignment(mut self, enabled: bool) -> Self {
        self.align_to_chunks = enabled;
        self
    }

    /// Block size override for traversal in `direction`
    pub fn block_override(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Row => self.row_block,
            Direction::Column => self.col_block,
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration as JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            row_block: None,
            col_block: None,
            align_to_chunks: true,
        }
    }
}
