use crate::format::{is_high_surrogate, is_low_surrogate, is_valid_codepoint, CodeFormat, Sink, Source};
use crate::Error;

/// UTF-16 in native unit order, no BOM handling: one unit for the BMP, a
/// high/low surrogate pair for everything above it.
pub struct Utf16;

impl CodeFormat for Utf16 {
    type Unit = u16;

    const MAX_UNITS_PER_POINT: usize = 2;

    fn decode<S: Source<u16>>(lead: u16, rest: &mut S) -> Result<u32, Error> {
        let lead = lead as u32;
        if is_high_surrogate(lead) {
            let low = rest.next()? as u32;
            if !is_low_surrogate(low) {
                return Err(Error::InvalidInput);
            }
            return Ok(((lead - 0xD800) << 10) + (low - 0xDC00) + 0x1_0000);
        }
        // A low surrogate with no preceding high surrogate stands alone here
        // and fails the validity check.
        if is_valid_codepoint(lead) {
            Ok(lead)
        } else {
            Err(Error::InvalidInput)
        }
    }

    fn encode_valid<K: Sink<u16>>(codepoint: u32, sink: &mut K) -> Result<usize, Error> {
        debug_assert!(is_valid_codepoint(codepoint));
        if codepoint < 0x1_0000 {
            sink.put(codepoint as u16)?;
            return Ok(1);
        }
        let v = codepoint - 0x1_0000;
        // v <= 0xFFFFF, so the halves land in 0xD800..=0xDBFF and
        // 0xDC00..=0xDFFF respectively.
        sink.reserve(2)?;
        sink.put(0xD800 + (v >> 10) as u16)?;
        sink.put(0xDC00 | (v & 0x3FF) as u16)?;
        Ok(2)
    }

    #[inline(always)]
    fn unit_from(value: u32) -> u16 {
        debug_assert!(value <= 0xFFFF);
        value as u16
    }
}
