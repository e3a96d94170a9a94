/*!
The shared CBOR type vocabulary: major types and the well-known
additional-information (minor) values of an item's initial byte.
*/

use core::fmt;

/// The 3-bit major type carried in the top bits of a CBOR initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum MajorType {
    UnsignedInteger = 0,
    NegativeInteger = 1,
    ByteString = 2,
    TextString = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    /// Simple values, floats and the break stop code
    Simple = 7,
}

impl MajorType {
    /// Extract the major type from a complete initial byte.
    #[inline]
    pub fn from_initial_byte(byte: u8) -> Self {
        match byte >> 5 {
            0 => Self::UnsignedInteger,
            1 => Self::NegativeInteger,
            2 => Self::ByteString,
            3 => Self::TextString,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Simple,
        }
    }

    /// Arrays and maps, whose elements follow the header directly.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Map)
    }

    /// Byte and text strings, whose payload follows the header directly.
    pub fn is_string(self) -> bool {
        matches!(self, Self::ByteString | Self::TextString)
    }
}

impl From<MajorType> for u8 {
    fn from(value: MajorType) -> Self {
        value as u8
    }
}

impl fmt::Display for MajorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnsignedInteger => "unsigned integer",
            Self::NegativeInteger => "negative integer",
            Self::ByteString => "byte string",
            Self::TextString => "text string",
            Self::Array => "array",
            Self::Map => "map",
            Self::Tag => "tag",
            Self::Simple => "simple",
        })
    }
}

/// Well-known values of the 5-bit additional-information field.
pub mod minor {
    /// Largest argument that is stored inline in the initial byte.
    pub const MAX_INLINE: u8 = 23;

    pub const ONE_BYTE: u8 = 24;
    pub const TWO_BYTES: u8 = 25;
    pub const FOUR_BYTES: u8 = 26;
    pub const EIGHT_BYTES: u8 = 27;

    /// Indefinite length marker, or the break stop code for major type 7.
    pub const INDEFINITE: u8 = 31;

    // Simple values
    pub const FALSE: u8 = 20;
    pub const TRUE: u8 = 21;
    pub const NULL: u8 = 22;
    pub const UNDEFINED: u8 = 23;

    /// Mask selecting the additional-information bits of an initial byte.
    pub const MASK: u8 = 0x1F;
}
