use std::{error, fmt, io};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while building, encoding or decoding.
#[derive(Debug)]
pub enum Error {
    /// No character with a non-zero count to build a tree from.
    EmptyInput,
    /// The encoder met a character that has no codeword.
    UnknownSymbol { symbol: char, position: usize },
    /// The encoded stream ended in the middle of a codeword.
    TruncatedStream { pending: usize },
    /// The encoded stream took a branch no codeword follows.
    CorruptStream { position: usize },
    /// A literal stream contained something other than `0` or `1`.
    InvalidSymbol { found: char, position: usize },
    /// One codeword is a prefix of (or equal to) another.
    NotPrefixFree { symbol: char, other: char },
    MalformedListing { line: usize, reason: &'static str },
    MalformedContainer { reason: &'static str },
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "cannot build a huffman tree from empty input"),
            Error::UnknownSymbol { symbol, position } => write!(
                f,
                "character {:?} at position {} has no codeword",
                symbol, position
            ),
            Error::TruncatedStream { pending } => write!(
                f,
                "encoded stream ends inside a codeword ({} dangling symbols)",
                pending
            ),
            Error::CorruptStream { position } => write!(
                f,
                "encoded stream matches no codeword at symbol {}",
                position
            ),
            Error::InvalidSymbol { found, position } => write!(
                f,
                "expected '0' or '1' but found {:?} at position {}",
                found, position
            ),
            Error::NotPrefixFree { symbol, other } => write!(
                f,
                "codeword of {:?} is a prefix of the codeword of {:?}",
                symbol, other
            ),
            Error::MalformedListing { line, reason } => {
                write!(f, "malformed codeword listing at line {}: {}", line, reason)
            }
            Error::MalformedContainer { reason } => {
                write!(f, "malformed packed container: {}", reason)
            }
            Error::Io(err) => write!(f, "i/o failure: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
