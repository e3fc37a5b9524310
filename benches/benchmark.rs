use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use transcode::{measure, transcode, Utf16, Utf32, Utf8};

const CORPORA: [(&str, &str); 3] = [
    ("ascii", "the quick brown fox jumps over the lazy dog 0123456789 "),
    ("mixed_bmp", "Ver\u{00E4}nderung \u{3053}\u{3093}\u{306B}\u{3061}\u{306F} \u{0391}\u{03B2}\u{03B3} "),
    ("astral", "\u{1F600}\u{1F680}\u{1F4A1} xlang \u{10348}\u{1D11E} "),
];

fn corpus(text: &str, target_len: usize) -> String {
    text.repeat(target_len / text.len() + 1)
}

fn conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");
    for (name, sample) in CORPORA {
        let text = corpus(sample, 64 * 1024);
        let utf8: Vec<u8> = text.bytes().collect();
        let utf16: Vec<u16> = text.encode_utf16().collect();

        group.throughput(Throughput::Bytes(utf8.len() as u64));
        group.bench_with_input(BenchmarkId::new("utf8_to_utf16", name), &utf8, |b, input| {
            let mut out = vec![0u16; input.len()];
            b.iter(|| transcode::<Utf8, Utf16>(input, &mut out).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf8_to_utf32", name), &utf8, |b, input| {
            let mut out = vec![0u32; input.len()];
            b.iter(|| transcode::<Utf8, Utf32>(input, &mut out).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("measure_utf8_to_utf16", name), &utf8, |b, input| {
            b.iter(|| measure::<Utf8, Utf16>(input).unwrap());
        });

        group.throughput(Throughput::Bytes((utf16.len() * 2) as u64));
        group.bench_with_input(BenchmarkId::new("utf16_to_utf8", name), &utf16, |b, input| {
            let mut out = vec![0u8; input.len() * 4];
            b.iter(|| transcode::<Utf16, Utf8>(input, &mut out).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("utf16_to_utf32", name), &utf16, |b, input| {
            let mut out = vec![0u32; input.len()];
            b.iter(|| transcode::<Utf16, Utf32>(input, &mut out).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, conversions);

criterion_main!(benches);
