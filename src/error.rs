//! Error types for decoding, validating, and encoding tag streams.
//!
//! This module contains the [`Error`] type which represents all possible
//! errors that can occur while a tag stream is read, checked, or written.
//!
//! # Example
//!
//! ```
//! use ev_nbt::{Error, Result, TagReader, ValidationVisitor};
//!
//! fn check(data: &[u8]) -> Result<()> {
//!     let reader = TagReader::from_slice(data);
//!     match reader.accept(&mut ValidationVisitor::new()) {
//!         Ok(()) => Ok(()),
//!         Err(Error::EndOfFile) => {
//!             println!("data was truncated");
//!             Err(Error::EndOfFile)
//!         }
//!         Err(Error::InvalidTagType(tag)) => {
//!             println!("unknown tag type: {:#04x}", tag);
//!             Err(Error::InvalidTagType(tag))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::fmt::{self, Display};

use crate::Tag;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when decoding,
/// validating, or writing tag data.
///
/// Apart from [`IO`](Error::IO), every variant belongs to one of two
/// families: grammar violations raised while interpreting raw bytes
/// (see [`is_grammar`](Error::is_grammar)) and structural violations raised
/// while checking an event sequence (see
/// [`is_structural`](Error::is_structural)).
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    ///
    /// This typically happens when draining a [`std::io::Read`] source into
    /// a reader's buffer or flushing a writer's buffer to a
    /// [`std::io::Write`] sink.
    IO(std::io::Error),

    /// The input ended unexpectedly.
    ///
    /// This error occurs when the encoded data is truncated or incomplete,
    /// including a compound body that ends before its `End` marker.
    EndOfFile,

    /// An invalid tag type code was encountered.
    ///
    /// This format defines tag types 0-11. If a byte outside this range is
    /// found where a type code is expected, this error is returned with the
    /// invalid byte value.
    InvalidTagType(u8),

    /// The stream does not begin with a compound tag.
    RootMustBeCompound(Tag),

    /// An array or list declared a negative element count.
    NegativeLength(i32),

    /// Container nesting exceeded the reader's configured depth limit.
    DepthLimitExceeded(usize),

    /// An `End` type code appeared where a value was expected.
    UnexpectedEndTag,

    /// A root tag was announced while a document was already open.
    DuplicateRoot,

    /// A compound received a value without a preceding key.
    ///
    /// Carries the type of the value that arrived keyless.
    MissingKey(Tag),

    /// A list element did not match the list's declared element type.
    ListElementMismatch { expected: Tag, actual: Tag },

    /// An array element event did not match the array's element type.
    ArrayElementMismatch { expected: Tag, actual: Tag },

    /// A compound end marker arrived while the innermost open container was
    /// not a compound, or while no container was open at all.
    UnbalancedEnd(Option<Tag>),
}

impl Error {
    /// Returns `true` for violations of the wire grammar, raised while
    /// interpreting raw bytes.
    pub fn is_grammar(&self) -> bool {
        matches!(
            self,
            Error::EndOfFile
                | Error::InvalidTagType(_)
                | Error::RootMustBeCompound(_)
                | Error::NegativeLength(_)
                | Error::DepthLimitExceeded(_)
                | Error::UnexpectedEndTag
        )
    }

    /// Returns `true` for violations of the event-sequence structure, raised
    /// while checking decoded or hand-built events.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::DuplicateRoot
                | Error::MissingKey(_)
                | Error::ListElementMismatch { .. }
                | Error::ArrayElementMismatch { .. }
                | Error::UnbalancedEnd(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IO(error)
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::EndOfFile => formatter.write_str("unexpected end of input"),
            Error::InvalidTagType(tag) => {
                formatter.write_str(&format!("invalid tag type: {tag:#04x}"))
            }
            Error::RootMustBeCompound(tag) => formatter.write_str(&format!(
                "root tag must be a compound, got {tag:?}"
            )),
            Error::NegativeLength(length) => {
                formatter.write_str(&format!("negative element count: {length}"))
            }
            Error::DepthLimitExceeded(limit) => formatter.write_str(&format!(
                "container nesting exceeds the depth limit of {limit}"
            )),
            Error::UnexpectedEndTag => {
                formatter.write_str("unexpected End tag in value position")
            }
            Error::DuplicateRoot => {
                formatter.write_str("unexpected root tag: a document is already open")
            }
            Error::MissingKey(tag) => formatter.write_str(&format!(
                "compound value of type {tag:?} without a preceding key"
            )),
            Error::ListElementMismatch { expected, actual } => formatter.write_str(&format!(
                "list element mismatch: expected {expected:?}, got {actual:?}"
            )),
            Error::ArrayElementMismatch { expected, actual } => formatter.write_str(&format!(
                "array element mismatch: expected {expected:?}, got {actual:?}"
            )),
            Error::UnbalancedEnd(Some(tag)) => formatter.write_str(&format!(
                "compound end inside an open {tag:?}"
            )),
            Error::UnbalancedEnd(None) => {
                formatter.write_str("compound end without an open compound")
            }
        }
    }
}

impl std::error::Error for Error {}
