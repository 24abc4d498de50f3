use crate::{Result, Tag};

mod reader;
mod validator;
mod writer;

pub use reader::*;
pub use validator::*;
pub use writer::*;

/// Receives the event stream that describes one encoded document.
///
/// A [`TagReader`] turns bytes into calls on this trait; a [`TagWriter`]
/// turns the same calls back into bytes. Every method defaults to `Ok(())`,
/// so an implementation overrides only the events it consumes.
///
/// Events arrive in the order the encoded members occur: the pass opens with
/// [`enter_root`](TagVisitor::enter_root), compound members are announced as
/// a [`visit_key`](TagVisitor::visit_key) followed by their value events,
/// arrays and lists are announced with their declared length before their
/// elements arrive individually, and every compound (the root included) is
/// closed by [`end_compound`](TagVisitor::end_compound).
///
/// Implementations can be chained by holding a downstream stage and
/// forwarding events to it, which is how [`ValidationVisitor`] slots in
/// front of any consumer. Callers are expected to emit a well-formed
/// sequence; an implementation is not required to re-check that (chain a
/// [`ValidationVisitor`] for that job) but must not corrupt its own state
/// when handed a malformed order — it may fail however it chooses.
///
/// # Example
///
/// ```
/// use ev_nbt::{Result, TagVisitor};
///
/// /// Counts the keys of every compound in the stream.
/// #[derive(Default)]
/// struct KeyCounter {
///     keys: usize,
/// }
///
/// impl TagVisitor for KeyCounter {
///     fn visit_key(&mut self, name: &str) -> Result<()> {
///         let _ = name;
///         self.keys += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait TagVisitor {
    /// Announces the named root compound that begins the document.
    ///
    /// No separate [`enter_compound`](TagVisitor::enter_compound) follows;
    /// the root's members arrive next, and the matching
    /// [`end_compound`](TagVisitor::end_compound) closes the document.
    fn enter_root(&mut self, name: &str) -> Result<()> {
        let _ = name;
        Ok(())
    }

    /// Announces the key of the compound member whose value events follow.
    fn visit_key(&mut self, name: &str) -> Result<()> {
        let _ = name;
        Ok(())
    }

    fn visit_byte(&mut self, value: i8) -> Result<()> {
        let _ = value;
        Ok(())
    }

    fn visit_short(&mut self, value: i16) -> Result<()> {
        let _ = value;
        Ok(())
    }

    fn visit_int(&mut self, value: i32) -> Result<()> {
        let _ = value;
        Ok(())
    }

    fn visit_long(&mut self, value: i64) -> Result<()> {
        let _ = value;
        Ok(())
    }

    fn visit_float(&mut self, value: f32) -> Result<()> {
        let _ = value;
        Ok(())
    }

    fn visit_double(&mut self, value: f64) -> Result<()> {
        let _ = value;
        Ok(())
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        let _ = value;
        Ok(())
    }

    /// Announces a byte array; exactly `length`
    /// [`visit_byte`](TagVisitor::visit_byte) calls follow.
    fn enter_byte_array(&mut self, length: i32) -> Result<()> {
        let _ = length;
        Ok(())
    }

    /// Announces an integer array; exactly `length`
    /// [`visit_int`](TagVisitor::visit_int) calls follow.
    fn enter_int_array(&mut self, length: i32) -> Result<()> {
        let _ = length;
        Ok(())
    }

    /// Announces a list; exactly `length` values of `element_type` follow.
    fn enter_list(&mut self, element_type: Tag, length: i32) -> Result<()> {
        let _ = (element_type, length);
        Ok(())
    }

    /// Opens a nested compound; its members follow until the matching
    /// [`end_compound`](TagVisitor::end_compound).
    fn enter_compound(&mut self) -> Result<()> {
        Ok(())
    }

    /// Closes the innermost open compound (or, at depth one, the root).
    fn end_compound(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The terminal no-op stage; useful as the end of a chain or to drive a
/// decode pass purely for its side effects.
impl TagVisitor for () {}

impl<T: TagVisitor + ?Sized> TagVisitor for &mut T {
    fn enter_root(&mut self, name: &str) -> Result<()> {
        (**self).enter_root(name)
    }

    fn visit_key(&mut self, name: &str) -> Result<()> {
        (**self).visit_key(name)
    }

    fn visit_byte(&mut self, value: i8) -> Result<()> {
        (**self).visit_byte(value)
    }

    fn visit_short(&mut self, value: i16) -> Result<()> {
        (**self).visit_short(value)
    }

    fn visit_int(&mut self, value: i32) -> Result<()> {
        (**self).visit_int(value)
    }

    fn visit_long(&mut self, value: i64) -> Result<()> {
        (**self).visit_long(value)
    }

    fn visit_float(&mut self, value: f32) -> Result<()> {
        (**self).visit_float(value)
    }

    fn visit_double(&mut self, value: f64) -> Result<()> {
        (**self).visit_double(value)
    }

    fn visit_string(&mut self, value: &str) -> Result<()> {
        (**self).visit_string(value)
    }

    fn enter_byte_array(&mut self, length: i32) -> Result<()> {
        (**self).enter_byte_array(length)
    }

    fn enter_int_array(&mut self, length: i32) -> Result<()> {
        (**self).enter_int_array(length)
    }

    fn enter_list(&mut self, element_type: Tag, length: i32) -> Result<()> {
        (**self).enter_list(element_type, length)
    }

    fn enter_compound(&mut self) -> Result<()> {
        (**self).enter_compound()
    }

    fn end_compound(&mut self) -> Result<()> {
        (**self).end_compound()
    }
}
