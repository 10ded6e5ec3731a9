use criterion::{criterion_group, criterion_main, Criterion};
use imgrotate::image::RGB_DEPTH;
use imgrotate::lowlevel::rotate_bilinear;
use imgrotate::{Pixel, PixelBuffer, RotateConfig};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> PixelBuffer {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            pixels.push(Pixel::new(value as u8, (x & 0xFF) as u8, (y & 0xFF) as u8));
        }
    }
    PixelBuffer::from_pixels(width, height, RGB_DEPTH, &pixels).unwrap()
}

fn bench_rotate(c: &mut Criterion) {
    let src = make_image(512, 384);
    let config = RotateConfig::default();

    for angle in [0u32, 30, 45, 90] {
        c.bench_function(&format!("rotate_bilinear_512x384_{angle}deg"), |b| {
            b.iter(|| black_box(rotate_bilinear(black_box(&src), angle, &config).unwrap()));
        });
    }
}

criterion_group!(benches, bench_rotate);
criterion_main!(benches);
