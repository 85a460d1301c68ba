use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tienlen_render::{
    standard_deck, Card, CardRenderer, HandLayout, ManualClock, RecordingSurface, RenderConfig,
};

fn hand_layout(c: &mut Criterion) {
    let config = RenderConfig::default();
    c.bench_function("hand_layout_13", |b| {
        b.iter(|| HandLayout::compute(black_box(13), black_box(1280.0), &config))
    });
}

fn draw_hand(c: &mut Criterion) {
    let renderer = CardRenderer::with_clock(RenderConfig::default(), ManualClock::new(0.0));
    let hand: Vec<Card> = standard_deck().into_iter().take(13).collect();
    c.bench_function("draw_hand_recorded", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            renderer.draw_hand(&mut surface, black_box(&hand), 600.0, &[3, 4], Some(6), 1280.0)
        })
    });
}

criterion_group!(benches, hand_layout, draw_hand);
criterion_main!(benches);
