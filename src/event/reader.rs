use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use zerocopy::byteorder::{self, BigEndian};

use crate::util::cold_path;
use crate::{Error, Result, Tag, TagVisitor};

/// Default bound on nested container depth below the root.
///
/// Decoding recurses once per nested list or compound; the bound keeps
/// adversarial input from exhausting the call stack. Override it per reader
/// with [`TagReader::with_max_depth`].
pub const DEFAULT_DEPTH_LIMIT: usize = 512;

/// Decodes an encoded document and emits it as events on a [`TagVisitor`].
///
/// The reader buffers its whole input up front; draining a stream or file
/// into that buffer is the constructor's job, and transparent decompression
/// (gzip and friends) is the byte source's job before the bytes get here.
/// Each [`accept`](TagReader::accept) pass decodes from the start of the
/// buffer with a fresh cursor, so one reader can replay the same document
/// into any number of visitor chains.
///
/// # Example
///
/// ```
/// use ev_nbt::{TagReader, TagWriter, ValidationVisitor};
///
/// let data = [
///     0x0a, 0x00, 0x00, // root compound, empty name
///     0x08, 0x00, 0x08, b'g', b'r', b'e', b'e', b't', b'i', b'n', b'g',
///     0x00, 0x02, b'h', b'i', // String "greeting" -> "hi"
///     0x00, // End
/// ];
///
/// let reader = TagReader::from_slice(&data);
/// let mut chain = ValidationVisitor::with_next(TagWriter::new());
/// reader.accept(&mut chain).unwrap();
///
/// let writer = chain.into_inner().unwrap();
/// assert_eq!(writer.as_bytes(), &data);
/// ```
pub struct TagReader {
    data: Vec<u8>,
    max_depth: usize,
}

impl TagReader {
    /// Creates a reader over an owned buffer.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            max_depth: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Creates a reader over a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }

    /// Drains `source` to its end and buffers the bytes.
    pub fn from_reader<R: Read>(mut source: R) -> Result<Self> {
        let mut data = Vec::new();
        source.read_to_end(&mut data)?;
        Ok(Self::new(data))
    }

    /// Reads the file at `path` into the buffer.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Replaces the nesting bound of [`DEFAULT_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decodes the buffered document and emits its events to `visitor`.
    ///
    /// The pass aborts on the first grammar violation or on the first error
    /// returned by the visitor; events already delivered stay delivered.
    /// Bytes following the root's `End` marker are left untouched.
    pub fn accept<V: TagVisitor>(&self, visitor: &mut V) -> Result<()> {
        let mut cursor = Cursor {
            data: &self.data,
            pos: 0,
            remaining_depth: self.max_depth,
            max_depth: self.max_depth,
        };

        cursor.read_root(visitor)
    }
}

struct Cursor<'d> {
    data: &'d [u8],
    pos: usize,
    remaining_depth: usize,
    max_depth: usize,
}

impl<'d> Cursor<'d> {
    fn read_root<V: TagVisitor>(&mut self, visitor: &mut V) -> Result<()> {
        let tag = self.read_tag()?;

        if tag != Tag::Compound {
            cold_path();
            return Err(Error::RootMustBeCompound(tag));
        }

        let name = self.read_string()?;
        visitor.enter_root(&name)?;

        self.read_compound_body(visitor)
    }

    /// Reads compound members until the `End` marker. The marker is
    /// mandatory; running out of bytes first is a truncation error.
    fn read_compound_body<V: TagVisitor>(&mut self, visitor: &mut V) -> Result<()> {
        loop {
            let tag = self.read_tag()?;

            if tag == Tag::End {
                return visitor.end_compound();
            }

            let key = self.read_string()?;
            visitor.visit_key(&key)?;
            self.read_value(tag, visitor)?;
        }
    }

    fn read_value<V: TagVisitor>(&mut self, tag: Tag, visitor: &mut V) -> Result<()> {
        match tag {
            Tag::End => {
                cold_path();
                Err(Error::UnexpectedEndTag)
            }
            Tag::Byte => visitor.visit_byte(self.read_i8()?),
            Tag::Short => visitor.visit_short(self.read_i16()?),
            Tag::Int => visitor.visit_int(self.read_i32()?),
            Tag::Long => visitor.visit_long(self.read_i64()?),
            Tag::Float => visitor.visit_float(self.read_f32()?),
            Tag::Double => visitor.visit_double(self.read_f64()?),
            Tag::ByteArray => {
                let length = self.read_length()?;
                visitor.enter_byte_array(length)?;

                for _ in 0..length {
                    visitor.visit_byte(self.read_i8()?)?;
                }

                Ok(())
            }
            Tag::String => visitor.visit_string(&self.read_string()?),
            Tag::List => {
                let element_type = self.read_tag()?;
                let length = self.read_length()?;

                self.descend()?;
                visitor.enter_list(element_type, length)?;

                for _ in 0..length {
                    self.read_value(element_type, visitor)?;
                }

                self.ascend();
                Ok(())
            }
            Tag::Compound => {
                self.descend()?;
                visitor.enter_compound()?;
                self.read_compound_body(visitor)?;
                self.ascend();
                Ok(())
            }
            Tag::IntArray => {
                let length = self.read_length()?;
                visitor.enter_int_array(length)?;

                for _ in 0..length {
                    visitor.visit_int(self.read_i32()?)?;
                }

                Ok(())
            }
        }
    }

    fn descend(&mut self) -> Result<()> {
        if self.remaining_depth == 0 {
            cold_path();
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }

        self.remaining_depth -= 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.remaining_depth += 1;
    }

    fn take(&mut self, count: usize) -> Result<&'d [u8]> {
        if self.data.len() - self.pos < count {
            cold_path();
            return Err(Error::EndOfFile);
        }

        let raw = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(raw)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let raw = self.take(N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(raw);
        Ok(bytes)
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let value = self.read_array::<1>()?[0];

        match Tag::from_u8(value) {
            Some(tag) => Ok(tag),
            None => {
                cold_path();
                Err(Error::InvalidTagType(value))
            }
        }
    }

    /// Reads a signed 32-bit array/list element count and rejects negatives.
    fn read_length(&mut self) -> Result<i32> {
        let length = self.read_i32()?;

        if length < 0 {
            cold_path();
            return Err(Error::NegativeLength(length));
        }

        Ok(length)
    }

    /// Reads a length-prefixed string, replacing invalid UTF-8 sequences
    /// with U+FFFD.
    fn read_string(&mut self) -> Result<Cow<'d, str>> {
        let length = byteorder::U16::<BigEndian>::from_bytes(self.read_array()?).get();
        let raw = self.take(length as usize)?;
        Ok(String::from_utf8_lossy(raw))
    }

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_array::<1>()?[0] as i8)
    }

    fn read_i16(&mut self) -> Result<i16> {
        Ok(byteorder::I16::<BigEndian>::from_bytes(self.read_array()?).get())
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(byteorder::I32::<BigEndian>::from_bytes(self.read_array()?).get())
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(byteorder::I64::<BigEndian>::from_bytes(self.read_array()?).get())
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(byteorder::F32::<BigEndian>::from_bytes(self.read_array()?).get())
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(byteorder::F64::<BigEndian>::from_bytes(self.read_array()?).get())
    }
}
