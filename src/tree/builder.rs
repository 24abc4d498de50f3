use crate::util::cold_path;
use crate::{Compound, Document, Error, List, Result, Tag, TagVisitor, Value};

/// Element-count cap on buffers preallocated from wire-declared lengths.
/// A declared length is untrusted until that many elements actually decode.
const MAX_PREALLOC: usize = 4096;

/// One container under construction.
enum Node {
    Compound {
        compound: Compound,
        pending_key: Option<String>,
    },
    List {
        list: List,
        remaining: i32,
    },
    ByteArray {
        values: Vec<i8>,
        remaining: i32,
    },
    IntArray {
        values: Vec<i32>,
        remaining: i32,
    },
}

impl Node {
    fn tag(&self) -> Tag {
        match self {
            Node::Compound { .. } => Tag::Compound,
            Node::List { .. } => Tag::List,
            Node::ByteArray { .. } => Tag::ByteArray,
            Node::IntArray { .. } => Tag::IntArray,
        }
    }
}

/// Terminal protocol stage that materializes the event stream as a
/// [`Document`].
///
/// The builder mirrors the containers it is inside as a frame stack; a
/// completed value is placed into its parent, and a sequence whose countdown
/// reaches zero completes in turn, cascading upward. After the root's
/// `end_compound` the finished document is available through
/// [`into_document`](TreeBuilder::into_document).
///
/// The builder assumes a well-formed event order (chain a
/// [`ValidationVisitor`](crate::ValidationVisitor) in front of it
/// otherwise); handed a malformed order it fails with the matching
/// structural error or ignores events that have no place to land.
///
/// # Example
///
/// ```
/// use ev_nbt::{TagReader, TreeBuilder, ValidationVisitor};
///
/// let data = [
///     0x0a, 0x00, 0x00, // root compound, empty name
///     0x01, 0x00, 0x01, b'b', 0x07, // Byte "b" = 7
///     0x00, // End
/// ];
///
/// let mut chain = ValidationVisitor::with_next(TreeBuilder::new());
/// TagReader::from_slice(&data).accept(&mut chain).unwrap();
///
/// let document = chain.into_inner().unwrap().into_document().unwrap();
/// assert_eq!(document.root().get("b").unwrap().as_byte(), Some(7));
/// ```
#[derive(Default)]
pub struct TreeBuilder {
    root_name: Option<String>,
    frames: Vec<Node>,
    document: Option<Document>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a full pass has completed and a document is ready.
    pub fn is_complete(&self) -> bool {
        self.document.is_some()
    }

    /// Consumes the builder and returns the finished document, or `None` if
    /// no complete pass has run.
    pub fn into_document(self) -> Option<Document> {
        self.document
    }

    /// Places a completed value into the innermost open container. Filling
    /// the last slot of a list completes the list itself, which then places
    /// into its own parent.
    fn place(&mut self, value: Value) -> Result<()> {
        let mut value = value;

        loop {
            let exhausted = match self.frames.last_mut() {
                // No open document; nowhere for the value to land.
                None => return Ok(()),
                Some(Node::Compound {
                    compound,
                    pending_key,
                }) => {
                    let key = pending_key.take().unwrap_or_default();
                    compound.insert(key, value);
                    return Ok(());
                }
                Some(Node::List { list, remaining }) => {
                    list.push(value)?;
                    *remaining -= 1;
                    *remaining <= 0
                }
                Some(Node::ByteArray { .. }) => {
                    cold_path();
                    return Err(Error::ArrayElementMismatch {
                        expected: Tag::Byte,
                        actual: value.tag(),
                    });
                }
                Some(Node::IntArray { .. }) => {
                    cold_path();
                    return Err(Error::ArrayElementMismatch {
                        expected: Tag::Int,
                        actual: value.tag(),
                    });
                }
            };

            if !exhausted {
                return Ok(());
            }

            value = match self.frames.pop() {
                Some(Node::List { list, .. }) => Value::List(list),
                _ => return Ok(()),
            };
        }
    }

    fn prealloc(length: i32) -> usize {
        (length as usize).min(MAX_PREALLOC)
    }
}

impl TagVisitor for TreeBuilder {
    fn enter_root(&mut self, name: &str) -> Result<()> {
        if self.document.is_some() || !self.frames.is_empty() {
            cold_path();
            return Err(Error::DuplicateRoot);
        }

        self.root_name = Some(name.to_owned());
        self.frames.push(Node::Compound {
            compound: Compound::new(),
            pending_key: None,
        });
        Ok(())
    }

    fn visit_key(&mut self, name: &str) -> Result<()> {
        if let Some(Node::Compound { pending_key, .. }) = self.frames.last_mut() {
            *pending_key = Some(name.to_owned());
        }

        Ok(())
    }

    fn visit_byte(&mut self, value: i8) -> Result<()> {
        match self.frames.last_mut() {
            Some(Node::ByteArray { values, remaining }) => {
                values.push(value);
                *remaining -= 1;

                if *remaining > 0 {
                    return Ok(());
                }

                match self.frames.pop() {
                    Some(Node::ByteArray { values, .. }) => self.place(Value::ByteArray(values)),
                    _ => Ok(()),
                }
            }
            _ => self.place(Value::Byte(value)),
        }
    }

    fn visit_short(&mut self, value: i16) -> Result<()> {
        self.place(Value::Short(value))
    }

    fn visit_int(&mut self, value: i32) -> Result<()> {
        match self.frames.last_mut() {
            Some(Node::IntArray { values, remaining }) => {
                values.push(value);
                *remaining -= 1;

                if *remaining > 0 {
                    return Ok(());
                }

                match self.frames.pop() {
                    Some(Node::IntArray { values, .. }) => self.place(Value::IntArray(values)),
                    _ => Ok(()),
                }
            }
            _ => self.place(Value::Int(value)),
        }
    }

    fn visit_long(&mut self, value: i64) -> Result<()> {
        self.place(Value::Long(value))
    }

    fn visit_float(&mut self, value: f32) -> Result<()> {
        self.place(Value::Float(value))
    }

    fn visit_double(&mut self, value: f64) -> Result<()> {
        self.place(Value::Double(value))
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        self.place(Value::String(value.to_owned()))
    }

    fn enter_byte_array(&mut self, length: i32) -> Result<()> {
        if length <= 0 {
            return self.place(Value::ByteArray(Vec::new()));
        }

        self.frames.push(Node::ByteArray {
            values: Vec::with_capacity(Self::prealloc(length)),
            remaining: length,
        });
        Ok(())
    }

    fn enter_int_array(&mut self, length: i32) -> Result<()> {
        if length <= 0 {
            return self.place(Value::IntArray(Vec::new()));
        }

        self.frames.push(Node::IntArray {
            values: Vec::with_capacity(Self::prealloc(length)),
            remaining: length,
        });
        Ok(())
    }

    fn enter_list(&mut self, element_type: Tag, length: i32) -> Result<()> {
        if length <= 0 {
            return self.place(Value::List(List::new(element_type)));
        }

        self.frames.push(Node::List {
            list: List::with_capacity(element_type, Self::prealloc(length)),
            remaining: length,
        });
        Ok(())
    }

    fn enter_compound(&mut self) -> Result<()> {
        self.frames.push(Node::Compound {
            compound: Compound::new(),
            pending_key: None,
        });
        Ok(())
    }

    fn end_compound(&mut self) -> Result<()> {
        match self.frames.pop() {
            Some(Node::Compound { compound, .. }) => {
                if self.frames.is_empty() {
                    let name = self.root_name.take().unwrap_or_default();
                    self.document = Some(Document::new(name, compound));
                    Ok(())
                } else {
                    self.place(Value::Compound(compound))
                }
            }
            Some(frame) => {
                cold_path();
                Err(Error::UnbalancedEnd(Some(frame.tag())))
            }
            None => {
                cold_path();
                Err(Error::UnbalancedEnd(None))
            }
        }
    }
}
