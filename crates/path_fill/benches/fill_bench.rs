use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{DVec2, Mat3, Vec3};
use path_fill::{FilledPath, TessellatedPath};

fn circle(points: usize) -> TessellatedPath {
  let pts = (0..points)
    .map(|i| {
      let angle = std::f64::consts::TAU * i as f64 / points as f64;
      DVec2::new(0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
    })
    .collect();
  TessellatedPath::new(vec![pts])
}

fn bench_construction(c: &mut Criterion) {
  let path = circle(4096);
  c.bench_function("construct_4096", |b| {
    b.iter(|| FilledPath::new(black_box(&path)))
  });
}

fn bench_realization(c: &mut Criterion) {
  let path = circle(4096);
  c.bench_function("make_ready_all_4096", |b| {
    b.iter(|| {
      let mut filled = FilledPath::new(black_box(&path));
      filled.make_ready_all();
      filled.number_subsets()
    })
  });
}

fn bench_selection(c: &mut Criterion) {
  let path = circle(4096);
  let mut filled = FilledPath::new(&path);
  filled.make_ready_all();
  let window = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.1),
    Vec3::new(0.0, 1.0, -0.4),
    Vec3::new(0.0, -1.0, 0.6),
  ];
  let mut out = vec![0u32; filled.number_subsets()];
  c.bench_function("select_window_4096", |b| {
    b.iter(|| {
      filled.select_subsets(
        black_box(&window),
        Mat3::IDENTITY,
        usize::MAX,
        usize::MAX,
        &mut out,
      )
    })
  });
}

criterion_group!(benches, bench_construction, bench_realization, bench_selection);
criterion_main!(benches);
