use criterion::{Criterion, black_box, criterion_group, criterion_main};
use grid_raycaster::texture::TextureSet;
use grid_raycaster::{DEFAULT_MAP, Frame, GridMap, Pose, RenderConfig, Renderer, par_strips};

fn setup() -> (GridMap, Pose, RenderConfig) {
    let map = GridMap::parse(DEFAULT_MAP).unwrap();
    let pose = Pose::new(3.5, 3.5, std::f32::consts::FRAC_PI_4);
    (map, pose, RenderConfig::default())
}

fn bench_sequential_columns(c: &mut Criterion) {
    let (map, pose, cfg) = setup();
    c.bench_function("frame_sequential_800_columns", |b| {
        b.iter(|| Frame::new(black_box(&map), black_box(&pose), &cfg).flatten().count())
    });
}

fn bench_parallel_columns(c: &mut Criterion) {
    let (map, pose, cfg) = setup();
    c.bench_function("frame_parallel_800_columns", |b| {
        b.iter(|| par_strips(black_box(&map), black_box(&pose), &cfg))
    });
}

fn bench_render_frame(c: &mut Criterion) {
    let (map, pose, cfg) = setup();
    let renderer = Renderer::new(cfg, TextureSet::procedural(64));
    let mut buf = vec![0u32; cfg.screen_width() * cfg.screen_height()];
    c.bench_function("render_frame_800x600", |b| {
        b.iter(|| renderer.render_frame(&mut buf, black_box(&map), black_box(&pose)))
    });
}

criterion_group!(
    benches,
    bench_sequential_columns,
    bench_parallel_columns,
    bench_render_frame
);
criterion_main!(benches);
