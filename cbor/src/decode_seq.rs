use super::decode::{Decoder, Error, Header};

/// An iterator over the consecutive item headers in a buffered CBOR sequence.
///
/// Each item is the offset of a header within the buffer and the header
/// itself. Definite length string payloads are skipped. Container elements are
/// visited in order, because their headers directly follow the container
/// header. The structure of containers is not checked.
///
/// Iteration stops after the first error, which is yielded once. Offsets in
/// [`Error::NeedMoreData`] are measured from the start of the buffer.
pub struct Headers<'a> {
    decoder: Decoder,
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Headers<'a> {
    pub(super) fn new(decoder: Decoder, data: &'a [u8]) -> Self {
        Self {
            decoder,
            data,
            offset: 0,
            done: false,
        }
    }

    /// The offset of the next header to be decoded.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn fail(&mut self, e: Error) -> Option<Result<(usize, Header), Error>> {
        self.done = true;
        Some(Err(e))
    }
}

impl Iterator for Headers<'_> {
    type Item = Result<(usize, Header), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.offset > self.data.len() {
            // The previous string payload ran off the end
            return self.fail(Error::NeedMoreData(self.offset));
        }
        if self.offset == self.data.len() {
            self.done = true;
            return None;
        }

        let start = self.offset;
        match self.decoder.decode(&self.data[start..]) {
            Ok(header) => {
                let payload = header
                    .payload_len()
                    .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
                self.offset = start
                    .saturating_add(header.length())
                    .saturating_add(payload);
                Some(Ok((start, header)))
            }
            Err(Error::NeedMoreData(n)) => self.fail(Error::NeedMoreData(start + n)),
            Err(e) => self.fail(e),
        }
    }
}
