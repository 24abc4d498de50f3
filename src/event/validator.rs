use crate::util::cold_path;
use crate::{Error, Result, Tag, TagVisitor};

/// One open container on the validation stack.
///
/// Sequence frames carry the countdown to their own completion; compounds
/// stay open until an explicit end marker and track whether a key has been
/// announced for the member currently expected.
#[derive(Clone, Copy, Debug)]
enum Frame {
    Compound { has_key: bool },
    List { element_type: Tag, remaining: i32 },
    ByteArray { remaining: i32 },
    IntArray { remaining: i32 },
}

impl Frame {
    fn tag(&self) -> Tag {
        match self {
            Frame::Compound { .. } => Tag::Compound,
            Frame::List { .. } => Tag::List,
            Frame::ByteArray { .. } => Tag::ByteArray,
            Frame::IntArray { .. } => Tag::IntArray,
        }
    }
}

/// Checks an event sequence against the container grammar and forwards it.
///
/// The validator re-derives nesting state purely from the events it sees, so
/// it works the same whether the events come from a [`TagReader`], a tree,
/// or hand-written calls. It materializes nothing: state is one frame per
/// open container plus a per-compound pending-key flag.
///
/// As a chaining stage it is transparent — every event that passes its check
/// is forwarded to the `next` stage unmodified — so it can sit in front of
/// any consumer:
///
/// ```
/// use ev_nbt::{TagVisitor, TagWriter, ValidationVisitor};
///
/// let mut chain = ValidationVisitor::with_next(TagWriter::new());
/// chain.enter_root("example").unwrap();
/// chain.visit_key("answer").unwrap();
/// chain.visit_int(42).unwrap();
/// chain.end_compound().unwrap();
///
/// assert_eq!(chain.depth(), 0);
/// let writer = chain.into_inner().unwrap();
/// assert!(!writer.as_bytes().is_empty());
/// ```
///
/// A violation aborts the pass with a structural error before the offending
/// event reaches the `next` stage; events already forwarded stay forwarded.
///
/// [`TagReader`]: crate::TagReader
pub struct ValidationVisitor<V = ()> {
    frames: Vec<Frame>,
    next: Option<V>,
}

impl ValidationVisitor<()> {
    /// Creates a terminal validator with no downstream stage.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            next: None,
        }
    }
}

impl Default for ValidationVisitor<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: TagVisitor> ValidationVisitor<V> {
    /// Creates a validator that forwards every checked event to `next`.
    pub fn with_next(next: V) -> Self {
        Self {
            frames: Vec::new(),
            next: Some(next),
        }
    }

    /// Number of currently open containers. Zero after a complete pass.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn next(&self) -> Option<&V> {
        self.next.as_ref()
    }

    pub fn next_mut(&mut self) -> Option<&mut V> {
        self.next.as_mut()
    }

    /// Consumes the validator and returns the downstream stage, if any.
    pub fn into_inner(self) -> Option<V> {
        self.next
    }

    fn forward<F: FnOnce(&mut V) -> Result<()>>(&mut self, event: F) -> Result<()> {
        match self.next.as_mut() {
            Some(next) => event(next),
            None => Ok(()),
        }
    }

    /// Checks one incoming value (or container entry) of type `tag` against
    /// the innermost open frame, then advances that frame's bookkeeping.
    ///
    /// With no open frame there is no constraint; that situation only
    /// legitimately occurs before the root opens.
    fn check_value(&mut self, tag: Tag) -> Result<()> {
        let exhausted = match self.frames.last_mut() {
            None => false,
            Some(Frame::Compound { has_key }) => {
                if !*has_key {
                    cold_path();
                    return Err(Error::MissingKey(tag));
                }

                *has_key = false;
                false
            }
            Some(Frame::List {
                element_type,
                remaining,
            }) => {
                if tag != *element_type {
                    cold_path();
                    return Err(Error::ListElementMismatch {
                        expected: *element_type,
                        actual: tag,
                    });
                }

                *remaining -= 1;
                *remaining <= 0
            }
            Some(Frame::ByteArray { remaining }) => {
                if tag != Tag::Byte {
                    cold_path();
                    return Err(Error::ArrayElementMismatch {
                        expected: Tag::Byte,
                        actual: tag,
                    });
                }

                *remaining -= 1;
                *remaining <= 0
            }
            Some(Frame::IntArray { remaining }) => {
                if tag != Tag::Int {
                    cold_path();
                    return Err(Error::ArrayElementMismatch {
                        expected: Tag::Int,
                        actual: tag,
                    });
                }

                *remaining -= 1;
                *remaining <= 0
            }
        };

        if exhausted {
            self.frames.pop();
        }

        Ok(())
    }

    /// Pushes a sequence frame unless its element count is already spent;
    /// a zero-length sequence is complete the moment it is announced.
    fn open_sequence(&mut self, frame: Frame, length: i32) {
        if length > 0 {
            self.frames.push(frame);
        }
    }
}

impl<V: TagVisitor> TagVisitor for ValidationVisitor<V> {
    fn enter_root(&mut self, name: &str) -> Result<()> {
        if !self.frames.is_empty() {
            cold_path();
            return Err(Error::DuplicateRoot);
        }

        self.frames.push(Frame::Compound { has_key: false });
        self.forward(|next| next.enter_root(name))
    }

    fn visit_key(&mut self, name: &str) -> Result<()> {
        if let Some(Frame::Compound { has_key }) = self.frames.last_mut() {
            *has_key = true;
        }

        self.forward(|next| next.visit_key(name))
    }

    fn visit_byte(&mut self, value: i8) -> Result<()> {
        self.check_value(Tag::Byte)?;
        self.forward(|next| next.visit_byte(value))
    }

    fn visit_short(&mut self, value: i16) -> Result<()> {
        self.check_value(Tag::Short)?;
        self.forward(|next| next.visit_short(value))
    }

    fn visit_int(&mut self, value: i32) -> Result<()> {
        self.check_value(Tag::Int)?;
        self.forward(|next| next.visit_int(value))
    }

    fn visit_long(&mut self, value: i64) -> Result<()> {
        self.check_value(Tag::Long)?;
        self.forward(|next| next.visit_long(value))
    }

    fn visit_float(&mut self, value: f32) -> Result<()> {
        self.check_value(Tag::Float)?;
        self.forward(|next| next.visit_float(value))
    }

    fn visit_double(&mut self, value: f64) -> Result<()> {
        self.check_value(Tag::Double)?;
        self.forward(|next| next.visit_double(value))
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        self.check_value(Tag::String)?;
        self.forward(|next| next.visit_string(value))
    }

    fn enter_byte_array(&mut self, length: i32) -> Result<()> {
        self.check_value(Tag::ByteArray)?;
        self.open_sequence(Frame::ByteArray { remaining: length }, length);
        self.forward(|next| next.enter_byte_array(length))
    }

    fn enter_int_array(&mut self, length: i32) -> Result<()> {
        self.check_value(Tag::IntArray)?;
        self.open_sequence(Frame::IntArray { remaining: length }, length);
        self.forward(|next| next.enter_int_array(length))
    }

    fn enter_list(&mut self, element_type: Tag, length: i32) -> Result<()> {
        self.check_value(Tag::List)?;
        self.open_sequence(
            Frame::List {
                element_type,
                remaining: length,
            },
            length,
        );
        self.forward(|next| next.enter_list(element_type, length))
    }

    fn enter_compound(&mut self) -> Result<()> {
        self.check_value(Tag::Compound)?;
        self.frames.push(Frame::Compound { has_key: false });
        self.forward(|next| next.enter_compound())
    }

    fn end_compound(&mut self) -> Result<()> {
        match self.frames.last() {
            Some(Frame::Compound { .. }) => {
                self.frames.pop();
            }
            Some(frame) => {
                cold_path();
                return Err(Error::UnbalancedEnd(Some(frame.tag())));
            }
            None => {
                cold_path();
                return Err(Error::UnbalancedEnd(None));
            }
        }

        self.forward(|next| next.end_compound())
    }
}
