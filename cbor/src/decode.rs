/*!
Bounds-checked decoding of CBOR item headers.

A header is the initial byte of an item plus its 0, 1, 2, 4 or 8 byte
big-endian argument. Any semantic tags (major type 6) in front of the item are
unwrapped, up to a configurable depth, and reported alongside the header of
the item they annotate.

The decoder never reads past the end of the slice it is given, and never
panics. Truncated input is reported as [`Error::NeedMoreData`] carrying the
total number of bytes required, so a caller can retry from the same offset
once more data has arrived.
*/

use super::types::{MajorType, minor};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

pub use super::decode_seq::Headers;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Need at least {0} bytes of data")]
    NeedMoreData(usize),

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("More than {0} nested tags")]
    MaxTagDepth(usize),
}

/// Tag numbers unwrapped from in front of an item, outermost first.
pub type Tags = SmallVec<[u64; 4]>;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// The maximum number of tags unwrapped in front of an item.
    ///
    /// A tag found once this many have been unwrapped is returned as an
    /// ordinary item with [`MajorType::Tag`], unless `strict_tag_depth` is set.
    pub max_tag_depth: usize,

    /// Fail with [`Error::MaxTagDepth`] rather than returning a tag header
    /// when `max_tag_depth` is exhausted.
    pub strict_tag_depth: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_tag_depth: 1,
            strict_tag_depth: false,
        }
    }
}

/// A decoded item header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    major: MajorType,
    minor: u8,
    value: u64,
    length: usize,
    argument_len: usize,
    tags: Tags,
    shortest: bool,
}

impl Header {
    /// The major type of the item, after any tags have been unwrapped.
    pub fn major_type(&self) -> MajorType {
        self.major
    }

    /// The additional-information field of the item's initial byte.
    pub fn minor_type(&self) -> u8 {
        self.minor
    }

    /// The decoded argument.
    ///
    /// For an indefinite length item this is 31, the minor type itself.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Total bytes consumed, including all unwrapped tags.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The outermost tag, if the item was tagged.
    pub fn tag(&self) -> Option<u64> {
        self.tags.first().copied()
    }

    pub fn tags(&self) -> &[u64] {
        &self.tags
    }

    /// The number of extended argument bytes following the item's initial byte.
    pub fn argument_len(&self) -> usize {
        self.argument_len
    }

    pub fn is_indefinite(&self) -> bool {
        self.minor == minor::INDEFINITE
    }

    /// Whether this header is the `0xFF` break stop code.
    pub fn is_break(&self) -> bool {
        self.major == MajorType::Simple && self.minor == minor::INDEFINITE
    }

    /// Whether every argument, including those of the tags, was encoded in
    /// the fewest possible bytes.
    pub fn is_shortest(&self) -> bool {
        self.shortest
    }

    /// The number of payload bytes following a definite length byte or text
    /// string header.
    pub fn payload_len(&self) -> Option<u64> {
        (self.major.is_string() && !self.is_indefinite()).then_some(self.value)
    }
}

/// A single initial byte and argument, with `end` relative to the start of
/// the decoded buffer.
struct Initial {
    major: MajorType,
    minor: u8,
    value: u64,
    argument_len: usize,
    end: usize,
}

impl Initial {
    fn is_shortest(&self) -> bool {
        match (self.major, self.minor) {
            (_, 0..=minor::MAX_INLINE | minor::INDEFINITE) => true,
            // Simple values 0..32 must use the inline form
            (MajorType::Simple, minor::ONE_BYTE) => self.value >= 32,
            // Floats are a payload concern
            (MajorType::Simple, _) => true,
            (_, minor::ONE_BYTE) => self.value > minor::MAX_INLINE as u64,
            (_, minor::TWO_BYTES) => self.value > u8::MAX as u64,
            (_, minor::FOUR_BYTES) => self.value > u16::MAX as u64,
            _ => self.value > u32::MAX as u64,
        }
    }
}

#[inline]
fn read_argument<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], Error> {
    data.get(offset..offset + N)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| {
            trace!("Truncated {} byte argument at offset {offset}", N);
            Error::NeedMoreData(offset + N)
        })
}

fn parse_initial(data: &[u8], offset: usize) -> Result<Initial, Error> {
    let Some(&byte) = data.get(offset) else {
        trace!("No initial byte at offset {offset}");
        return Err(Error::NeedMoreData(offset + 1));
    };

    let major = MajorType::from_initial_byte(byte);
    let minor = byte & minor::MASK;
    let start = offset + 1;
    let (value, argument_len) = match minor {
        0..=minor::MAX_INLINE => (minor as u64, 0),
        minor::ONE_BYTE => (u8::from_be_bytes(read_argument(data, start)?) as u64, 1),
        minor::TWO_BYTES => (u16::from_be_bytes(read_argument(data, start)?) as u64, 2),
        minor::FOUR_BYTES => (u32::from_be_bytes(read_argument(data, start)?) as u64, 4),
        minor::EIGHT_BYTES => (u64::from_be_bytes(read_argument(data, start)?), 8),
        minor::INDEFINITE => (minor::INDEFINITE as u64, 0),
        _ => {
            trace!("Reserved minor-type {minor} at offset {offset}");
            return Err(Error::InvalidMinorValue(minor));
        }
    };

    Ok(Initial {
        major,
        minor,
        value,
        argument_len,
        end: start + argument_len,
    })
}

/// Decodes item headers according to a set of [`Options`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    options: Options,
}

impl Decoder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Decode the header at the start of `data`.
    pub fn decode(&self, data: &[u8]) -> Result<Header, Error> {
        let mut tags = Tags::new();
        let mut shortest = true;
        let mut item = parse_initial(data, 0)?;
        while item.major == MajorType::Tag {
            if tags.len() >= self.options.max_tag_depth {
                if self.options.strict_tag_depth {
                    trace!("Tag {} exceeds the maximum tag depth", item.value);
                    return Err(Error::MaxTagDepth(self.options.max_tag_depth));
                }
                break;
            }
            shortest &= item.is_shortest();
            tags.push(item.value);
            item = parse_initial(data, item.end)?;
        }

        Ok(Header {
            shortest: shortest && item.is_shortest(),
            major: item.major,
            minor: item.minor,
            value: item.value,
            length: item.end,
            argument_len: item.argument_len,
            tags,
        })
    }

    /// Decode the header at the start of `data`, reading no further than
    /// `max_length` bytes.
    ///
    /// A `max_length` beyond the end of `data` is clamped to `data.len()`.
    pub fn decode_bounded(&self, data: &[u8], max_length: usize) -> Result<Header, Error> {
        self.decode(&data[..max_length.min(data.len())])
    }

    /// Iterate the consecutive headers of a buffered CBOR sequence.
    pub fn headers<'a>(&self, data: &'a [u8]) -> Headers<'a> {
        Headers::new(*self, data)
    }
}

/// Decode the header at the start of `data` using the default [`Options`].
pub fn decode_header(data: &[u8]) -> Result<Header, Error> {
    Decoder::default().decode(data)
}

/// Decode the header at the start of `data` using the default [`Options`],
/// reading no further than `max_length` bytes.
pub fn decode_header_bounded(data: &[u8], max_length: usize) -> Result<Header, Error> {
    Decoder::default().decode_bounded(data, max_length)
}
