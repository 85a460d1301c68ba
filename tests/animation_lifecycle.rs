//! Animation lifecycle against a manually driven clock.

use proptest::prelude::*;
use tienlen_render::{
    advance, Animation, Card, CardRenderer, Clock, ManualClock, RecordingSurface, RenderConfig,
    Suit,
};

fn renderer() -> CardRenderer<ManualClock> {
    CardRenderer::with_clock(RenderConfig::default(), ManualClock::new(0.0))
}

fn card() -> Card {
    Card::new(9, Suit::Diamonds).unwrap()
}

proptest! {
    #[test]
    fn deal_waits_then_runs_for_its_duration(delay in 0.0f64..2000.0, step in 1.0f64..50.0) {
        let renderer = renderer();
        let mut animation = renderer.create_deal_animation(card(), (0.0, 0.0), (100.0, 100.0), delay);
        let duration = renderer.config().timings.deal_ms;

        let mut now = 0.0;
        while now < delay {
            prop_assert!(animation.update(now));
            prop_assert_eq!(animation.progress(), 0.0);
            now += step;
        }
        while now < delay + duration {
            prop_assert!(animation.update(now));
            now += step;
        }
        prop_assert!(!animation.update(delay + duration + 1.0));
        prop_assert!(animation.is_complete());
    }
}

#[test]
fn test_every_kind_completes() {
    let renderer = renderer();
    let animations = vec![
        renderer.create_bot_play_animation(1, card(), (0.0, 0.0), (10.0, 10.0)),
        renderer.create_card_flip_animation(card(), 0.0, 0.0),
        renderer.create_deal_animation(card(), (0.0, 0.0), (10.0, 10.0), 0.0),
        renderer.create_three_spades_animation(card(), 0.0, 0.0),
    ];
    let timings = renderer.config().timings;
    let durations = [
        timings.bot_play_ms,
        timings.card_flip_ms,
        timings.deal_ms,
        timings.three_spades_ms,
    ];

    for (animation, duration) in animations.into_iter().zip(durations) {
        let halfway = advance(animation, duration / 2.0).expect("running at halfway");
        assert!((halfway.progress() - 0.5).abs() < 1e-6);
        assert!(advance(halfway, duration).is_none());
    }
}

#[test]
fn test_controller_frame_loop() {
    let renderer = renderer();
    let mut animations: Vec<Animation> = (0..4)
        .map(|i| renderer.create_deal_animation(card(), (0.0, 0.0), (10.0, 10.0), i as f64 * 100.0))
        .collect();

    let mut frames = 0;
    while !animations.is_empty() {
        renderer.clock().advance(16.0);
        renderer.update_animations(&mut animations);

        let mut surface = RecordingSurface::new();
        renderer.draw_bot_animations(&mut surface, &animations);
        assert!(surface.is_balanced());
        frames += 1;
        assert!(frames < 100, "animations never finished");
    }
    assert!(renderer.clock().now_ms() >= 800.0);
}
