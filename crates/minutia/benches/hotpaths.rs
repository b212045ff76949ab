use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};
use minutia::{extract, DetectConfig, MinutiaeDetector, OrientationMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Ridge-like skeleton: wavy one-pixel lines with random gaps (terminations)
/// and random vertical bridges between neighbouring lines (bifurcations).
fn make_skeleton_fixture(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut img = GrayImage::new(width, height);
    let mut rng = StdRng::seed_from_u64(seed);
    let spacing = 9u32;

    let mut line_rows = Vec::new();
    let mut base = 4u32;
    while base + 4 < height {
        let phase = rng.gen_range(0.0f32..std::f32::consts::TAU);
        let rows: Vec<u32> = (0..width)
            .map(|x| {
                let y = base as f32 + 2.0 * (x as f32 * 0.05 + phase).sin();
                y.round().clamp(0.0, (height - 1) as f32) as u32
            })
            .collect();

        let mut x = 0u32;
        while x < width {
            let run = rng.gen_range(20..120);
            for xx in x..(x + run).min(width) {
                img.put_pixel(xx, rows[xx as usize], Luma([1]));
                // Keep the line 8-connected where the wave steps by a row.
                if xx > 0 {
                    let prev = rows[xx as usize - 1];
                    if prev != rows[xx as usize] {
                        img.put_pixel(xx, prev, Luma([1]));
                    }
                }
            }
            x += run + rng.gen_range(2..6);
        }
        line_rows.push(rows);
        base += spacing;
    }

    for pair in line_rows.windows(2) {
        for _ in 0..(width / 64) {
            let x = rng.gen_range(1..width - 1);
            let (top, bottom) = (pair[0][x as usize], pair[1][x as usize]);
            for y in top.min(bottom)..=top.max(bottom) {
                img.put_pixel(x, y, Luma([1]));
            }
        }
    }
    img
}

fn make_orientation_fixture(width: u32, height: u32) -> OrientationMap {
    let angles = (0..height)
        .flat_map(|y| (0..width).map(move |x| 0.1 * ((x as f32 * 0.05).cos() + y as f32 * 0.001)))
        .collect();
    OrientationMap::from_angles(width, height, angles).expect("fixture dimensions match")
}

fn bench_detect(c: &mut Criterion) {
    let img_512 = make_skeleton_fixture(512, 512, 7);
    let img_1024 = make_skeleton_fixture(1024, 1024, 9);
    let keep_all = MinutiaeDetector::with_config(DetectConfig {
        remove_invalid: false,
        ..Default::default()
    });
    let detector = MinutiaeDetector::new();

    c.bench_function("detect_512x512_keep_border", |b| {
        b.iter(|| black_box(keep_all.detect(black_box(&img_512)).len()))
    });

    c.bench_function("detect_512x512", |b| {
        b.iter(|| black_box(detector.detect(black_box(&img_512)).len()))
    });

    c.bench_function("detect_1024x1024", |b| {
        b.iter(|| black_box(detector.detect(black_box(&img_1024)).len()))
    });
}

fn bench_detect_with_orientation(c: &mut Criterion) {
    let img = make_skeleton_fixture(512, 512, 11);
    let field = make_orientation_fixture(512, 512);
    let detector = MinutiaeDetector::new();

    c.bench_function("detect_512x512_orientation", |b| {
        b.iter(|| black_box(detector.detect_with_orientation(black_box(&img), &field).len()))
    });
}

fn bench_encode(c: &mut Criterion) {
    let img = make_skeleton_fixture(1024, 1024, 13);
    let minutiae = MinutiaeDetector::new().detect(&img).with_core(512, 512);

    c.bench_function("encode_circular", |b| {
        b.iter(|| {
            let (features, _) = extract(black_box(&minutiae), "circular", Some(16.0))
                .expect("fixture has a core point");
            black_box(features.len())
        })
    });

    c.bench_function("encode_polar", |b| {
        b.iter(|| {
            let (features, _) =
                extract(black_box(&minutiae), "polar", None).expect("fixture has a core point");
            black_box(features.len())
        })
    });
}

criterion_group!(
    hotpaths,
    bench_detect,
    bench_detect_with_orientation,
    bench_encode
);
criterion_main!(hotpaths);
