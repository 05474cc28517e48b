//! Error type shared by every stage of the Huffman pipeline.
//!
//! All errors are local and recoverable. Nothing is retried internally; each error is handed
//! straight back to the caller.

/// Errors that can occur while building trees, coding, or reading/writing containers.
#[derive(Debug, thiserror::Error)]
pub enum HuffError {
    /// No tree can be built from an empty frequency table.
    #[error("no symbols to build a huffman tree from")]
    EmptyInput,

    /// The symbol at `position` in the input has no entry in the code table.
    #[error("symbol at position {position} has no huffman code")]
    UnknownSymbol { position: usize },

    /// The bit stream ran out (or stopped matching codes) in the middle of a codeword.
    /// `decoded` symbols were recovered from the first `consumed` bits before that.
    #[error("bit stream ends mid-codeword: {decoded} symbols decoded from the first {consumed} bits")]
    MalformedStream { decoded: usize, consumed: usize },

    /// A textual bit string contained something other than '0', '1' or whitespace.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { found: char, position: usize },

    /// A code table assembled from explicit pairs was not a usable prefix code.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// The container stores code lengths in a single byte.
    #[error("code of {length} bits is too long to store")]
    CodeTooLong { length: usize },

    /// The container did not follow the expected layout.
    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    /// Io error when reading or writing a container
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;
