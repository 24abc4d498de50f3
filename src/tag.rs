/// Identifies the kind of a tag on the wire.
///
/// Each variant maps to the one-byte type code that precedes (or, for list
/// elements, governs) a value in the binary encoding. The code is the sole
/// discriminator on the stream.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Tag {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
}

impl Tag {
    /// Decodes a wire type code.
    ///
    /// Returns `None` for any byte outside the known range; this format
    /// defines codes 0 through 11 only.
    ///
    /// # Example
    ///
    /// ```
    /// use ev_nbt::Tag;
    ///
    /// assert_eq!(Tag::from_u8(10), Some(Tag::Compound));
    /// assert_eq!(Tag::from_u8(11), Some(Tag::IntArray));
    /// assert_eq!(Tag::from_u8(12), None);
    /// ```
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::End),
            1 => Some(Self::Byte),
            2 => Some(Self::Short),
            3 => Some(Self::Int),
            4 => Some(Self::Long),
            5 => Some(Self::Float),
            6 => Some(Self::Double),
            7 => Some(Self::ByteArray),
            8 => Some(Self::String),
            9 => Some(Self::List),
            10 => Some(Self::Compound),
            11 => Some(Self::IntArray),
            _ => None,
        }
    }

    /// Fixed-width scalar kinds. `End` is a marker, not a value.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray)
    }

    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }
}
