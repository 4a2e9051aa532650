//! Performance benchmarks for the deflate-family codec.
//!
//! Measures block compression/decompression throughput across data
//! patterns and container formats, plus streaming compressor overhead.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use colzip_core::{Codec, CompressionLevel};
use colzip_gzip::{GzipCodec, StreamFormat};

/// Generate test data patterns for benchmarking
mod test_data {
    /// Repetitive text - compresses well, exercises match emission.
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }

    /// Pseudorandom data - barely compressible, exercises literal paths.
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }
}

fn bench_block_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_compress");
    let size = 256 * 1024;

    for (name, data) in [
        ("text", test_data::text_like(size)),
        ("random", test_data::random(size)),
    ] {
        group.throughput(Throughput::Bytes(size as u64));
        for format in [StreamFormat::Raw, StreamFormat::Zlib, StreamFormat::Gzip] {
            let mut codec = GzipCodec::new(CompressionLevel::DEFAULT, format);
            let mut output = vec![0u8; codec.max_compressed_len(size)];
            group.bench_with_input(
                BenchmarkId::new(name, format),
                &data,
                |b, data| {
                    b.iter(|| {
                        let written = codec
                            .compress(black_box(data), &mut output)
                            .expect("compress failed");
                        black_box(written)
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_block_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_decompress");
    let size = 256 * 1024;
    let data = test_data::text_like(size);

    group.throughput(Throughput::Bytes(size as u64));
    for format in [StreamFormat::Raw, StreamFormat::Zlib, StreamFormat::Gzip] {
        let mut codec = GzipCodec::new(CompressionLevel::DEFAULT, format);
        let compressed = codec.compress_to_vec(&data).expect("compress failed");
        let mut output = vec![0u8; size];
        group.bench_with_input(
            BenchmarkId::from_parameter(format),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    let written = codec
                        .decompress(black_box(compressed), &mut output)
                        .expect("decompress failed");
                    black_box(written)
                });
            },
        );
    }
    group.finish();
}

fn bench_streaming_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_compress");
    let size = 256 * 1024;
    let data = test_data::text_like(size);

    group.throughput(Throughput::Bytes(size as u64));
    for chunk_size in [4096usize, 65536] {
        let codec = GzipCodec::new(CompressionLevel::DEFAULT, StreamFormat::Gzip);
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut comp = codec.make_compressor().expect("make_compressor failed");
                    let mut buf = vec![0u8; 64 * 1024];
                    let mut total = 0usize;
                    for chunk in data.chunks(chunk_size) {
                        let mut pos = 0;
                        while pos < chunk.len() {
                            let r = comp
                                .compress(&chunk[pos..], &mut buf)
                                .expect("compress failed");
                            pos += r.bytes_read;
                            total += r.bytes_written;
                        }
                    }
                    loop {
                        let r = comp.end(&mut buf).expect("end failed");
                        total += r.bytes_written;
                        if !r.should_retry {
                            break;
                        }
                    }
                    black_box(total)
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_block_compress,
    bench_block_decompress,
    bench_streaming_compress
);
criterion_main!(benches);
