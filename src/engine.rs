use std::cmp::min;

use crate::format::{CodeFormat, ConvertPair, Sink, Source};
use crate::Error;

/// Codepoints per unchecked group. The batched loop only runs while the
/// headroom computation guarantees at least one full group.
const BATCH: usize = 4;

pub(crate) struct SliceSource<'a, T: Copy> {
    slice: &'a [T],
    pos: usize,
}

impl<'a, T: Copy> SliceSource<'a, T> {
    pub(crate) fn new(slice: &'a [T]) -> Self {
        Self { slice, pos: 0 }
    }

    #[inline(always)]
    fn remaining(&self) -> usize {
        self.slice.len() - self.pos
    }

    /// Next lead unit, or `None` at the ordinary end of input. Running out
    /// of input is only an error when it happens mid-sequence, which goes
    /// through [`Source::next`] instead.
    #[inline(always)]
    fn next_lead(&mut self) -> Option<T> {
        let unit = *self.slice.get(self.pos)?;
        self.pos += 1;
        Some(unit)
    }

    /// # Safety
    ///
    /// `pos < len` must hold, normally established by the batch headroom
    /// computation in [`transcode`].
    #[inline(always)]
    unsafe fn read_unchecked(&mut self) -> T {
        debug_assert!(self.pos < self.slice.len());
        let unit = *self.slice.get_unchecked(self.pos);
        self.pos += 1;
        unit
    }
}

impl<T: Copy> Source<T> for SliceSource<'_, T> {
    #[inline(always)]
    fn next(&mut self) -> Result<T, Error> {
        self.next_lead().ok_or(Error::InvalidInput)
    }
}

/// Continuation reads inside the batched loop skip the bounds check; the
/// headroom computation already covered the worst-case sequence length.
struct UncheckedSource<'a, 'b, T: Copy>(&'a mut SliceSource<'b, T>);

impl<T: Copy> Source<T> for UncheckedSource<'_, '_, T> {
    #[inline(always)]
    fn next(&mut self) -> Result<T, Error> {
        // SAFETY: only constructed by the batched loop after it has proven
        // MAX_UNITS_PER_POINT units of input headroom for this codepoint.
        Ok(unsafe { self.0.read_unchecked() })
    }
}

pub(crate) struct SliceSink<'a, T: Copy> {
    slice: &'a mut [T],
    pos: usize,
}

impl<'a, T: Copy> SliceSink<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        Self { slice, pos: 0 }
    }

    #[inline(always)]
    fn remaining(&self) -> usize {
        self.slice.len() - self.pos
    }

    #[inline(always)]
    fn written(&self) -> usize {
        self.pos
    }

    /// # Safety
    ///
    /// `pos < len` must hold, normally established by the batch headroom
    /// computation in [`transcode`].
    #[inline(always)]
    unsafe fn write_unchecked(&mut self, unit: T) {
        debug_assert!(self.pos < self.slice.len());
        *self.slice.get_unchecked_mut(self.pos) = unit;
        self.pos += 1;
    }
}

impl<T: Copy> Sink<T> for SliceSink<'_, T> {
    #[inline(always)]
    fn put(&mut self, unit: T) -> Result<(), Error> {
        if self.pos < self.slice.len() {
            self.slice[self.pos] = unit;
            self.pos += 1;
            Ok(())
        } else {
            Err(Error::BufferTooSmall)
        }
    }

    #[inline(always)]
    fn reserve(&mut self, units: usize) -> Result<(), Error> {
        if self.remaining() < units {
            Err(Error::BufferTooSmall)
        } else {
            Ok(())
        }
    }
}

struct UncheckedSink<'a, 'b, T: Copy>(&'a mut SliceSink<'b, T>);

impl<T: Copy> Sink<T> for UncheckedSink<'_, '_, T> {
    #[inline(always)]
    fn put(&mut self, unit: T) -> Result<(), Error> {
        // SAFETY: only constructed by the batched loop after it has proven
        // MAX_UNITS_PER_POINT units of output headroom for this codepoint.
        unsafe { self.0.write_unchecked(unit) };
        Ok(())
    }
}

/// Counts what a real sink would receive. Backs [`measure`].
#[derive(Default)]
struct CountingSink {
    written: usize,
}

impl<T: Copy> Sink<T> for CountingSink {
    #[inline(always)]
    fn put(&mut self, _unit: T) -> Result<(), Error> {
        self.written += 1;
        Ok(())
    }
}

/// One codepoint: passthrough copy where the pair allows it, otherwise a
/// full decode and encode.
#[inline(always)]
fn convert_one<S, D, R, K>(lead: S::Unit, rest: &mut R, sink: &mut K) -> Result<usize, Error>
where
    S: ConvertPair<D>,
    D: CodeFormat,
    R: Source<S::Unit>,
    K: Sink<D::Unit>,
{
    if S::is_passthrough(lead) {
        sink.put(D::unit_from(lead.into()))?;
        Ok(1)
    } else {
        let codepoint = S::decode(lead, rest)?;
        D::encode_valid(codepoint, sink)
    }
}

/// Convert the complete `input` range into `output`, returning the number of
/// destination units written.
///
/// The whole input must convert: a sequence truncated at end of input is
/// [`Error::InvalidInput`], and running out of `output` capacity is
/// [`Error::BufferTooSmall`]. On error the written count is not reported and
/// no unit of the failing codepoint is left in `output`.
///
/// Large inputs run in groups of four codepoints with the per-unit bounds
/// checks hoisted into a single headroom computation:
/// `min(input_left / S::MAX_UNITS_PER_POINT, output_left / D::MAX_UNITS_PER_POINT)`
/// codepoints are safe even if every one of them uses its format's maximum
/// width on both sides. The tail, and anything the headroom cannot cover,
/// goes through the fully checked loop.
pub fn transcode<S, D>(input: &[S::Unit], output: &mut [D::Unit]) -> Result<usize, Error>
where
    S: ConvertPair<D>,
    D: CodeFormat,
{
    let mut src = SliceSource::new(input);
    let mut dst = SliceSink::new(output);

    loop {
        let safe = min(
            src.remaining() / S::MAX_UNITS_PER_POINT,
            dst.remaining() / D::MAX_UNITS_PER_POINT,
        );
        let groups = safe / BATCH;
        if groups == 0 {
            break;
        }
        for _ in 0..groups {
            for _ in 0..BATCH {
                // SAFETY: this loop steps at most groups * BATCH <= safe
                // codepoints before recomputing, and `safe` counts worst
                // case widths on both sides.
                let lead = unsafe { src.read_unchecked() };
                convert_one::<S, D, _, _>(
                    lead,
                    &mut UncheckedSource(&mut src),
                    &mut UncheckedSink(&mut dst),
                )?;
            }
        }
    }

    while let Some(lead) = src.next_lead() {
        convert_one::<S, D, _, _>(lead, &mut src, &mut dst)?;
    }
    Ok(dst.written())
}

/// Dry run of [`transcode`]: same decode and validation, but every encode
/// lands in a counting sink. The result is exactly the buffer size
/// [`transcode`] needs for this input.
pub fn measure<S, D>(input: &[S::Unit]) -> Result<usize, Error>
where
    S: ConvertPair<D>,
    D: CodeFormat,
{
    let mut src = SliceSource::new(input);
    let mut sink = CountingSink::default();
    while let Some(lead) = src.next_lead() {
        convert_one::<S, D, _, _>(lead, &mut src, &mut sink)?;
    }
    Ok(sink.written)
}
