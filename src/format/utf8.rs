use crate::format::{is_valid_codepoint, CodeFormat, Sink, Source};
use crate::Error;

/// UTF-8: one to four bytes per codepoint.
///
/// Lead byte ranges and the codepoints they may carry:
///
/// | lead        | bytes | codepoints          |
/// |-------------|-------|---------------------|
/// | 0x00..=0x7F | 1     | 0x00..=0x7F         |
/// | 0xC0..=0xDF | 2     | 0x80..=0x7FF        |
/// | 0xE0..=0xEF | 3     | 0x800..=0xFFFF      |
/// | 0xF0..=0xF7 | 4     | 0x10000..=0x10FFFF  |
///
/// Anything below the range minimum is an overlong encoding and rejected,
/// as are surrogate codepoints and anything above 0x10FFFF.
pub struct Utf8;

/// Append the six payload bits of a `10xxxxxx` continuation byte.
#[inline(always)]
fn push_continuation(codepoint: u32, byte: u8) -> Result<u32, Error> {
    if byte & 0xC0 != 0x80 {
        return Err(Error::InvalidInput);
    }
    Ok((codepoint << 6) | (byte & 0x3F) as u32)
}

impl CodeFormat for Utf8 {
    type Unit = u8;

    const MAX_UNITS_PER_POINT: usize = 4;

    fn decode<S: Source<u8>>(lead: u8, rest: &mut S) -> Result<u32, Error> {
        if lead <= 0x7F {
            return Ok(lead as u32);
        }
        if lead <= 0xDF {
            // Stray continuation bytes (0x80..=0xBF) land here and fail the
            // 110xxxxx tag check.
            if lead & 0xE0 != 0xC0 {
                return Err(Error::InvalidInput);
            }
            let cp = push_continuation((lead & 0x1F) as u32, rest.next()?)?;
            if cp >= 0x80 {
                return Ok(cp);
            }
        } else if lead <= 0xEF {
            let cp = push_continuation((lead & 0x0F) as u32, rest.next()?)?;
            let cp = push_continuation(cp, rest.next()?)?;
            if cp >= 0x800 && is_valid_codepoint(cp) {
                return Ok(cp);
            }
        } else if lead <= 0xF7 {
            let cp = push_continuation((lead & 0x07) as u32, rest.next()?)?;
            let cp = push_continuation(cp, rest.next()?)?;
            let cp = push_continuation(cp, rest.next()?)?;
            if (0x1_0000..=0x10_FFFF).contains(&cp) {
                return Ok(cp);
            }
        }
        Err(Error::InvalidInput)
    }

    fn encode_valid<K: Sink<u8>>(codepoint: u32, sink: &mut K) -> Result<usize, Error> {
        debug_assert!(is_valid_codepoint(codepoint));
        if codepoint <= 0x7F {
            sink.put(codepoint as u8)?;
            Ok(1)
        } else if codepoint <= 0x7FF {
            sink.reserve(2)?;
            sink.put(0xC0 | (codepoint >> 6) as u8)?;
            sink.put(0x80 | (codepoint & 0x3F) as u8)?;
            Ok(2)
        } else if codepoint <= 0xFFFF {
            sink.reserve(3)?;
            sink.put(0xE0 | (codepoint >> 12) as u8)?;
            sink.put(0x80 | ((codepoint >> 6) & 0x3F) as u8)?;
            sink.put(0x80 | (codepoint & 0x3F) as u8)?;
            Ok(3)
        } else {
            sink.reserve(4)?;
            sink.put(0xF0 | (codepoint >> 18) as u8)?;
            sink.put(0x80 | ((codepoint >> 12) & 0x3F) as u8)?;
            sink.put(0x80 | ((codepoint >> 6) & 0x3F) as u8)?;
            sink.put(0x80 | (codepoint & 0x3F) as u8)?;
            Ok(4)
        }
    }

    #[inline(always)]
    fn unit_from(value: u32) -> u8 {
        debug_assert!(value <= 0x7F);
        value as u8
    }
}
