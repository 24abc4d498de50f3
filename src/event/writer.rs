use std::fs::File;
use std::io::Write;
use std::path::Path;

use zerocopy::byteorder::{self, BigEndian};

use crate::{Result, Tag, TagVisitor};

/// Where the next value payload lands: inside a compound every value is
/// prefixed with its type code and pending key, inside a sequence values are
/// bare and counted down.
#[derive(Clone, Copy, Debug)]
enum Frame {
    Compound,
    Seq { remaining: i32 },
}

/// Serializes an event sequence into the wire encoding.
///
/// The writer is the byte-for-byte inverse of [`TagReader`]: feeding it the
/// events of a decode pass reproduces the decoded bytes exactly. Output
/// accumulates in an owned buffer exposed through
/// [`as_bytes`](TagWriter::as_bytes) / [`into_bytes`](TagWriter::into_bytes)
/// or flushed with [`write_to`](TagWriter::write_to).
///
/// The writer performs no structural checking; handed an event order that is
/// not a valid derivation of the grammar it produces undefined bytes rather
/// than an error. Chain a [`ValidationVisitor`] in front of it when the
/// event source is not already trusted.
///
/// A document can open either with
/// [`enter_root`](TagVisitor::enter_root) or, equivalently, with a top-level
/// [`visit_key`](TagVisitor::visit_key) followed by
/// [`enter_compound`](TagVisitor::enter_compound); both produce the same
/// root header.
///
/// # Example
///
/// ```
/// use ev_nbt::{TagVisitor, TagWriter};
///
/// let mut writer = TagWriter::new();
/// writer.enter_root("").unwrap();
/// writer.visit_key("greeting").unwrap();
/// writer.visit_string("hi").unwrap();
/// writer.end_compound().unwrap();
///
/// assert_eq!(writer.as_bytes()[0], 0x0a);
/// assert_eq!(*writer.as_bytes().last().unwrap(), 0x00);
/// ```
///
/// [`TagReader`]: crate::TagReader
/// [`ValidationVisitor`]: crate::ValidationVisitor
#[derive(Debug, Default)]
pub struct TagWriter {
    buffer: Vec<u8>,
    frames: Vec<Frame>,
    pending_key: Option<String>,
}

impl TagWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes accumulated so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer and returns its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes the accumulated bytes to `sink`.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(&self.buffer)?;
        Ok(())
    }

    /// Creates (or truncates) the file at `path` and writes the accumulated
    /// bytes to it.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(File::create(path)?)
    }

    /// Opens the slot for one value of type `tag`: inside a sequence the
    /// payload is bare and the countdown advances; everywhere else the type
    /// code and the pending key (empty if none was visited) are written
    /// first.
    fn begin_value(&mut self, tag: Tag) {
        match self.frames.last_mut() {
            Some(Frame::Seq { remaining }) => {
                *remaining -= 1;

                if *remaining <= 0 {
                    self.frames.pop();
                }
            }
            _ => {
                self.buffer.push(tag as u8);
                let key = self.pending_key.take().unwrap_or_default();
                self.put_string(&key);
            }
        }
    }

    fn put_string(&mut self, value: &str) {
        let raw = value.as_bytes();
        self.buffer
            .extend_from_slice(&byteorder::U16::<BigEndian>::new(raw.len() as u16).to_bytes());
        self.buffer.extend_from_slice(raw);
    }

    fn put_i32(&mut self, value: i32) {
        self.buffer
            .extend_from_slice(&byteorder::I32::<BigEndian>::new(value).to_bytes());
    }

    /// Pushes a sequence frame unless its element count is already spent;
    /// a zero-length sequence closes the moment it opens.
    fn open_sequence(&mut self, length: i32) {
        if length > 0 {
            self.frames.push(Frame::Seq { remaining: length });
        }
    }
}

impl TagVisitor for TagWriter {
    fn enter_root(&mut self, name: &str) -> Result<()> {
        self.buffer.push(Tag::Compound as u8);
        self.put_string(name);
        self.frames.push(Frame::Compound);
        Ok(())
    }

    fn visit_key(&mut self, name: &str) -> Result<()> {
        self.pending_key = Some(name.to_owned());
        Ok(())
    }

    fn visit_byte(&mut self, value: i8) -> Result<()> {
        self.begin_value(Tag::Byte);
        self.buffer.push(value as u8);
        Ok(())
    }

    fn visit_short(&mut self, value: i16) -> Result<()> {
        self.begin_value(Tag::Short);
        self.buffer
            .extend_from_slice(&byteorder::I16::<BigEndian>::new(value).to_bytes());
        Ok(())
    }

    fn visit_int(&mut self, value: i32) -> Result<()> {
        self.begin_value(Tag::Int);
        self.put_i32(value);
        Ok(())
    }

    fn visit_long(&mut self, value: i64) -> Result<()> {
        self.begin_value(Tag::Long);
        self.buffer
            .extend_from_slice(&byteorder::I64::<BigEndian>::new(value).to_bytes());
        Ok(())
    }

    fn visit_float(&mut self, value: f32) -> Result<()> {
        self.begin_value(Tag::Float);
        self.buffer
            .extend_from_slice(&byteorder::F32::<BigEndian>::new(value).to_bytes());
        Ok(())
    }

    fn visit_double(&mut self, value: f64) -> Result<()> {
        self.begin_value(Tag::Double);
        self.buffer
            .extend_from_slice(&byteorder::F64::<BigEndian>::new(value).to_bytes());
        Ok(())
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        self.begin_value(Tag::String);
        self.put_string(value);
        Ok(())
    }

    fn enter_byte_array(&mut self, length: i32) -> Result<()> {
        self.begin_value(Tag::ByteArray);
        self.put_i32(length);
        self.open_sequence(length);
        Ok(())
    }

    fn enter_int_array(&mut self, length: i32) -> Result<()> {
        self.begin_value(Tag::IntArray);
        self.put_i32(length);
        self.open_sequence(length);
        Ok(())
    }

    fn enter_list(&mut self, element_type: Tag, length: i32) -> Result<()> {
        self.begin_value(Tag::List);
        self.buffer.push(element_type as u8);
        self.put_i32(length);
        self.open_sequence(length);
        Ok(())
    }

    fn enter_compound(&mut self) -> Result<()> {
        self.begin_value(Tag::Compound);
        self.frames.push(Frame::Compound);
        Ok(())
    }

    fn end_compound(&mut self) -> Result<()> {
        self.buffer.push(Tag::End as u8);
        self.frames.pop();
        Ok(())
    }
}
