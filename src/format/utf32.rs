use crate::format::{is_valid_codepoint, CodeFormat, Sink, Source};
use crate::Error;

/// UTF-32: the unit is the codepoint, so both directions reduce to a
/// validity check.
pub struct Utf32;

impl CodeFormat for Utf32 {
    type Unit = u32;

    const MAX_UNITS_PER_POINT: usize = 1;

    fn decode<S: Source<u32>>(lead: u32, _rest: &mut S) -> Result<u32, Error> {
        if is_valid_codepoint(lead) {
            Ok(lead)
        } else {
            Err(Error::InvalidInput)
        }
    }

    fn encode_valid<K: Sink<u32>>(codepoint: u32, sink: &mut K) -> Result<usize, Error> {
        debug_assert!(is_valid_codepoint(codepoint));
        sink.put(codepoint)?;
        Ok(1)
    }

    #[inline(always)]
    fn unit_from(value: u32) -> u32 {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SliceSource;

    fn decode_one(unit: u32) -> Result<u32, Error> {
        Utf32::decode(unit, &mut SliceSource::new(&[]))
    }

    #[test]
    fn accepts_valid_scalars() {
        assert_eq!(decode_one(0x0000), Ok(0x0000));
        assert_eq!(decode_one(0xD7FF), Ok(0xD7FF));
        assert_eq!(decode_one(0xE000), Ok(0xE000));
        assert_eq!(decode_one(0x10_FFFF), Ok(0x10_FFFF));
    }

    #[test]
    fn rejects_surrogates_and_out_of_range() {
        assert_eq!(decode_one(0xD800), Err(Error::InvalidInput));
        assert_eq!(decode_one(0xDFFF), Err(Error::InvalidInput));
        assert_eq!(decode_one(0x11_0000), Err(Error::InvalidInput));
        assert_eq!(decode_one(u32::MAX), Err(Error::InvalidInput));
    }

    #[test]
    fn encode_checks_validity() {
        let mut out = Vec::new();
        assert_eq!(Utf32::encode(0x1F600, &mut out), Ok(1));
        assert_eq!(out, [0x1F600]);
        assert_eq!(Utf32::encode(0x11_0000, &mut out), Err(Error::InvalidInput));
        assert_eq!(out.len(), 1);
    }
}
