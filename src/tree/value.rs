use crate::util::cold_path;
use crate::{Error, Result, Tag, TagVisitor};

/// One materialized value of any kind.
///
/// A value knows how to announce itself as events through
/// [`accept`](Value::accept), which makes any tree a drop-in event source
/// for a [`TagWriter`](crate::TagWriter) or
/// [`ValidationVisitor`](crate::ValidationVisitor) chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl Value {
    /// The wire type of this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
        }
    }

    /// Emits this value's event sequence to `visitor`.
    ///
    /// Containers recurse: arrays announce their length and then each
    /// element, lists and compounds emit their members in order.
    pub fn accept<V: TagVisitor>(&self, visitor: &mut V) -> Result<()> {
        match self {
            Value::Byte(value) => visitor.visit_byte(*value),
            Value::Short(value) => visitor.visit_short(*value),
            Value::Int(value) => visitor.visit_int(*value),
            Value::Long(value) => visitor.visit_long(*value),
            Value::Float(value) => visitor.visit_float(*value),
            Value::Double(value) => visitor.visit_double(*value),
            Value::ByteArray(values) => {
                visitor.enter_byte_array(values.len() as i32)?;

                for value in values {
                    visitor.visit_byte(*value)?;
                }

                Ok(())
            }
            Value::String(value) => visitor.visit_string(value),
            Value::List(list) => list.accept(visitor),
            Value::Compound(compound) => compound.accept(visitor),
            Value::IntArray(values) => {
                visitor.enter_int_array(values.len() as i32)?;

                for value in values {
                    visitor.visit_int(*value)?;
                }

                Ok(())
            }
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Value::Byte(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Value::Short(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Value::ByteArray(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Value::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Value::IntArray(values) => Some(values),
            _ => None,
        }
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<i8>> for Value {
    fn from(values: Vec<i8>) -> Self {
        Value::ByteArray(values)
    }
}

impl From<Vec<i32>> for Value {
    fn from(values: Vec<i32>) -> Self {
        Value::IntArray(values)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Compound> for Value {
    fn from(compound: Compound) -> Self {
        Value::Compound(compound)
    }
}

/// A homogeneous sequence of values sharing one declared element type.
///
/// An empty list carries [`Tag::End`] as its element type, the wire
/// convention for lists with nothing in them; the first
/// [`push`](List::push) onto such a list adopts the pushed value's type.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    element_type: Tag,
    values: Vec<Value>,
}

impl List {
    pub fn new(element_type: Tag) -> Self {
        Self {
            element_type,
            values: Vec::new(),
        }
    }

    pub fn with_capacity(element_type: Tag, capacity: usize) -> Self {
        Self {
            element_type,
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn element_type(&self) -> Tag {
        self.element_type
    }

    /// Appends a value, enforcing homogeneity.
    ///
    /// Pushing onto an empty `End`-typed list retypes the list to the
    /// pushed value; any later mismatch is an error.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let tag = value.tag();

        if self.values.is_empty() && self.element_type == Tag::End {
            self.element_type = tag;
        } else if tag != self.element_type {
            cold_path();
            return Err(Error::ListElementMismatch {
                expected: self.element_type,
                actual: tag,
            });
        }

        self.values.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Emits `enter_list` and then every element's events.
    pub fn accept<V: TagVisitor>(&self, visitor: &mut V) -> Result<()> {
        visitor.enter_list(self.element_type, self.values.len() as i32)?;

        for value in &self.values {
            value.accept(visitor)?;
        }

        Ok(())
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new(Tag::End)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A mapping of string keys to values, kept in insertion order.
///
/// The wire format emits compound members in whatever order they were
/// written, so the tree preserves that order rather than sorting keys.
/// Lookup is a linear scan; compounds in this format are small.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Value)>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a member. Replacement keeps the key's original
    /// position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter().position(|(existing, _)| *existing == key) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Emits `enter_compound`, every member as key + value events, and the
    /// closing `end_compound`.
    pub fn accept<V: TagVisitor>(&self, visitor: &mut V) -> Result<()> {
        visitor.enter_compound()?;
        self.accept_members(visitor)?;
        visitor.end_compound()
    }

    /// Emits the members without the surrounding compound markers; the root
    /// compound announces itself differently.
    pub(crate) fn accept_members<V: TagVisitor>(&self, visitor: &mut V) -> Result<()> {
        for (key, value) in &self.entries {
            visitor.visit_key(key)?;
            value.accept(visitor)?;
        }

        Ok(())
    }
}
