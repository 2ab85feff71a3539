use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simulator::track::{render_track_layer, FadeConfig, TrackModel};
use simulator::{FrameSynthesizer, SynthesizerConfig};

fn bench_track_raster(c: &mut Criterion) {
    let model = TrackModel::default();
    let fade = FadeConfig::default();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("render_track_layer_48x48", |b| {
        b.iter(|| {
            let track = model.generate(&mut rng);
            black_box(render_track_layer((48, 48), &track, &fade))
        })
    });
}

fn bench_generation_pass(c: &mut Criterion) {
    let config = SynthesizerConfig::default().with_frame_count(100);
    let mut synth = FrameSynthesizer::new(config, None).expect("valid default config");
    let mut rng = StdRng::seed_from_u64(2);

    c.bench_function("generate_background_100", |b| {
        b.iter(|| synth.generate_background(&mut rng))
    });
    c.bench_function("generate_tracks_100", |b| {
        b.iter(|| synth.generate_tracks(&mut rng))
    });
    c.bench_function("generate_tracks_parallel_100", |b| {
        b.iter(|| synth.generate_tracks_parallel(black_box(3)))
    });
}

criterion_group!(benches, bench_track_raster, bench_generation_pass);
criterion_main!(benches);
