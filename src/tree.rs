use std::io::{Read, Write};
use std::path::Path;

use crate::util::cold_path;
use crate::{Error, Result, TagReader, TagVisitor, TagWriter, ValidationVisitor};

mod builder;
mod value;

pub use builder::*;
pub use value::*;

/// A fully materialized document: the named root compound.
///
/// `Document` sits on both sides of the event protocol. It is built from a
/// decode pass (a [`TagReader`] feeding a validated [`TreeBuilder`], which
/// is what [`from_slice`](Document::from_slice) and friends wire up) and it
/// emits itself back as events through [`accept`](Document::accept), which
/// is how [`to_vec`](Document::to_vec) and [`write_to`](Document::write_to)
/// re-encode it.
///
/// # Example
///
/// ```
/// use ev_nbt::{Compound, Document};
///
/// let mut root = Compound::new();
/// root.insert("greeting", "hi");
///
/// let document = Document::new("", root);
/// let bytes = document.to_vec().unwrap();
///
/// let parsed = Document::from_slice(&bytes).unwrap();
/// assert_eq!(parsed.root().get("greeting").unwrap().as_str(), Some("hi"));
/// assert_eq!(parsed.to_vec().unwrap(), bytes);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    name: String,
    root: Compound,
}

impl Document {
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// The root compound's name; often the empty string.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn root(&self) -> &Compound {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Compound {
        &mut self.root
    }

    /// Decodes, validates, and materializes one document from `data`.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::build(&TagReader::from_slice(data))
    }

    /// Drains `source` and materializes the document it encodes.
    ///
    /// The bytes must already be decompressed; see the reader's notes on
    /// byte sources.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Self::build(&TagReader::from_reader(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(&TagReader::from_path(path)?)
    }

    fn build(reader: &TagReader) -> Result<Self> {
        let mut chain = ValidationVisitor::with_next(TreeBuilder::new());
        reader.accept(&mut chain)?;

        match chain.into_inner().and_then(TreeBuilder::into_document) {
            Some(document) => Ok(document),
            None => {
                cold_path();
                Err(Error::EndOfFile)
            }
        }
    }

    /// Emits this document's full event sequence to `visitor`, from
    /// `enter_root` through the closing `end_compound`.
    pub fn accept<V: TagVisitor>(&self, visitor: &mut V) -> Result<()> {
        visitor.enter_root(&self.name)?;
        self.root.accept_members(visitor)?;
        visitor.end_compound()
    }

    /// Encodes this document to bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut writer = TagWriter::new();
        self.accept(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Encodes this document and writes the bytes to `sink`.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = TagWriter::new();
        self.accept(&mut writer)?;
        writer.write_to(sink)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = TagWriter::new();
        self.accept(&mut writer)?;
        writer.write_to_path(path)
    }
}
