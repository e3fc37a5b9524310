pub mod utf16;
pub mod utf32;
pub mod utf8;

use crate::Error;

/// Codepoints in the surrogate block or above U+10FFFF are invalid.
pub const fn is_valid_codepoint(codepoint: u32) -> bool {
    codepoint <= 0xD7FF || (codepoint > 0xDFFF && codepoint <= 0x10_FFFF)
}

pub(crate) const fn is_high_surrogate(value: u32) -> bool {
    matches!(value, 0xD800..=0xDBFF)
}

pub(crate) const fn is_low_surrogate(value: u32) -> bool {
    matches!(value, 0xDC00..=0xDFFF)
}

/// Supplies the continuation units of a multi-unit sequence. Running out of
/// input mid-sequence is `InvalidInput`, never a silent stop.
pub trait Source<T: Copy> {
    fn next(&mut self) -> Result<T, Error>;
}

/// Receives encoded units. `reserve` is called before a multi-unit write so
/// a bounded sink can refuse the whole codepoint instead of half of it.
pub trait Sink<T: Copy> {
    fn put(&mut self, unit: T) -> Result<(), Error>;

    #[inline(always)]
    fn reserve(&mut self, _units: usize) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Copy> Sink<T> for Vec<T> {
    #[inline(always)]
    fn put(&mut self, unit: T) -> Result<(), Error> {
        self.push(unit);
        Ok(())
    }
}

/// One encoding: its native code value width, the worst-case number of code
/// values per codepoint, and the decode/encode steps between code values and
/// codepoints.
pub trait CodeFormat {
    type Unit: Copy + Default + Into<u32>;

    const MAX_UNITS_PER_POINT: usize;

    /// Assemble one codepoint starting at `lead`, pulling continuation units
    /// from `rest` as the sequence requires.
    fn decode<S: Source<Self::Unit>>(lead: Self::Unit, rest: &mut S) -> Result<u32, Error>;

    /// Write `codepoint` to `sink`, returning the number of units written.
    /// The codepoint must already be a valid scalar value.
    fn encode_valid<K: Sink<Self::Unit>>(codepoint: u32, sink: &mut K) -> Result<usize, Error>;

    /// Validating variant of [`encode_valid`](CodeFormat::encode_valid).
    fn encode<K: Sink<Self::Unit>>(codepoint: u32, sink: &mut K) -> Result<usize, Error> {
        if !is_valid_codepoint(codepoint) {
            return Err(Error::InvalidInput);
        }
        Self::encode_valid(codepoint, sink)
    }

    /// Reinterpret a value as one unit. Callers guarantee it fits the unit
    /// width; only the passthrough paths use this.
    fn unit_from(value: u32) -> Self::Unit;
}

/// Per source/destination pair: which raw code values may be copied verbatim
/// because their bit pattern is valid and identical in both formats.
pub trait ConvertPair<D: CodeFormat>: CodeFormat {
    fn is_passthrough(unit: Self::Unit) -> bool;
}

/// The ASCII plane is representation-identical across all three formats, so
/// it is the baseline passthrough window for every pair.
macro_rules! ascii_passthrough {
    ($($src:ty => $dst:ty),+ $(,)?) => {$(
        impl ConvertPair<$dst> for $src {
            #[inline(always)]
            fn is_passthrough(unit: Self::Unit) -> bool {
                let value: u32 = unit.into();
                value <= 0x7F
            }
        }
    )+};
}

ascii_passthrough!(
    utf8::Utf8 => utf8::Utf8,
    utf8::Utf8 => utf16::Utf16,
    utf8::Utf8 => utf32::Utf32,
    utf16::Utf16 => utf8::Utf8,
    utf16::Utf16 => utf16::Utf16,
    utf32::Utf32 => utf8::Utf8,
    utf32::Utf32 => utf32::Utf32,
);

// The surrogate-free BMP is bit-identical between 16-bit and 32-bit units,
// so the UTF-16/UTF-32 pair skips surrogate arithmetic for all of it.
impl ConvertPair<utf32::Utf32> for utf16::Utf16 {
    #[inline(always)]
    fn is_passthrough(unit: u16) -> bool {
        unit <= 0xD7FF || unit >= 0xE000
    }
}

impl ConvertPair<utf16::Utf16> for utf32::Utf32 {
    #[inline(always)]
    fn is_passthrough(unit: u32) -> bool {
        unit <= 0xD7FF || (0xE000..=0xFFFF).contains(&unit)
    }
}

#[cfg(test)]
mod tests {
    use super::utf16::Utf16;
    use super::utf32::Utf32;
    use super::utf8::Utf8;
    use super::*;

    #[test]
    fn codepoint_validity_boundaries() {
        assert!(is_valid_codepoint(0x0000));
        assert!(is_valid_codepoint(0xD7FF));
        assert!(!is_valid_codepoint(0xD800));
        assert!(!is_valid_codepoint(0xDFFF));
        assert!(is_valid_codepoint(0xE000));
        assert!(is_valid_codepoint(0x10_FFFF));
        assert!(!is_valid_codepoint(0x11_0000));
    }

    #[test]
    fn ascii_window_is_shared() {
        assert!(<Utf8 as ConvertPair<Utf16>>::is_passthrough(0x7F));
        assert!(!<Utf8 as ConvertPair<Utf16>>::is_passthrough(0x80));
        assert!(<Utf16 as ConvertPair<Utf8>>::is_passthrough(0x41));
        assert!(!<Utf16 as ConvertPair<Utf8>>::is_passthrough(0x00E4));
        assert!(!<Utf32 as ConvertPair<Utf8>>::is_passthrough(0x1F600));
    }

    #[test]
    fn bmp_window_excludes_surrogates() {
        assert!(<Utf16 as ConvertPair<Utf32>>::is_passthrough(0xD7FF));
        assert!(!<Utf16 as ConvertPair<Utf32>>::is_passthrough(0xD800));
        assert!(!<Utf16 as ConvertPair<Utf32>>::is_passthrough(0xDFFF));
        assert!(<Utf16 as ConvertPair<Utf32>>::is_passthrough(0xE000));
        assert!(<Utf16 as ConvertPair<Utf32>>::is_passthrough(0xFFFF));

        assert!(<Utf32 as ConvertPair<Utf16>>::is_passthrough(0xD7FF));
        assert!(!<Utf32 as ConvertPair<Utf16>>::is_passthrough(0xDFFF));
        assert!(<Utf32 as ConvertPair<Utf16>>::is_passthrough(0xFFFF));
        assert!(!<Utf32 as ConvertPair<Utf16>>::is_passthrough(0x1_0000));
    }
}
