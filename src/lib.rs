//! Strict transcoding between UTF-8, UTF-16 and UTF-32 code value sequences.
//!
//! Any of the three formats can be source or destination through the
//! [`CodeFormat`] trait. Input is validated fully: truncated and overlong
//! sequences, stray continuation bytes, unpaired surrogates and
//! out-of-range codepoints all fail with [`Error::InvalidInput`], and no
//! replacement characters are ever substituted. Output is bounded by the
//! caller's buffer; [`measure`] pre-computes the exact size [`transcode`]
//! needs.
//!
//! ```
//! use transcode::{measure, transcode, Utf16, Utf8};
//!
//! let input = "gr\u{00FC}n \u{1F331}".as_bytes();
//! let needed = measure::<Utf8, Utf16>(input).unwrap();
//! let mut buffer = vec![0u16; needed];
//! let written = transcode::<Utf8, Utf16>(input, &mut buffer).unwrap();
//! assert_eq!(written, needed);
//! ```

mod engine;
mod format;

pub use engine::{measure, transcode};
pub use format::utf16::Utf16;
pub use format::utf32::Utf32;
pub use format::utf8::Utf8;
pub use format::{is_valid_codepoint, CodeFormat, ConvertPair, Sink, Source};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed, truncated or out-of-range input: overlong sequences,
    /// bad continuation tags, unpaired surrogates, codepoints past U+10FFFF.
    #[error("malformed or truncated input sequence")]
    InvalidInput,
    /// The output buffer ran out before the input was fully consumed.
    #[error("output buffer too small for converted data")]
    BufferTooSmall,
}

/// Measure, allocate exactly, convert.
pub fn transcode_to_vec<S, D>(input: &[S::Unit]) -> Result<Vec<D::Unit>, Error>
where
    S: ConvertPair<D>,
    D: CodeFormat,
{
    let needed = measure::<S, D>(input)?;
    let mut output = vec![D::Unit::default(); needed];
    let written = transcode::<S, D>(input, &mut output)?;
    debug_assert_eq!(written, needed);
    Ok(output)
}

pub fn utf8_to_utf16(input: &[u8]) -> Result<Vec<u16>, Error> {
    transcode_to_vec::<Utf8, Utf16>(input)
}

pub fn utf16_to_utf8(input: &[u16]) -> Result<Vec<u8>, Error> {
    transcode_to_vec::<Utf16, Utf8>(input)
}
