//! # Animation System
//!
//! Short, time-boxed card animations.
//!
//! Animations are plain values: they hold their start time, duration and
//! endpoints and are advanced against a wall-clock reading. The controller
//! owns the list, the renderer creates and draws entries, and an entry is
//! dropped once it reports completion.
//!
//! ## Lifecycle
//!
//! An animation is created, runs while `update` returns `true` and is
//! complete from the first `update` at which its progress reaches 1. A deal
//! animation may start in the future; until then `update` keeps returning
//! `true` without progressing and drawing it is a no-op.

use crate::config::{PLAYER_CARD_HEIGHT, PLAYER_CARD_WIDTH, TABLE_CARD_HEIGHT, TABLE_CARD_WIDTH};
use crate::rendering::{
    circle_path, palette, with_alpha, CardRenderer, CardStyle, Shadow, Surface,
};
use crate::utils::{ease_in_out_cubic, ease_in_out_quad, lerp, Clock};
use crate::Card;
use log::trace;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// A point on the drawing surface.
pub type Point = (f32, f32);

/// Start time, duration and progress shared by every animation kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub start_ms: f64,
    pub duration_ms: f64,
    /// Eased-input progress in `0.0..=1.0`
    pub progress: f32,
    pub complete: bool,
}

impl Timeline {
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
            progress: 0.0,
            complete: false,
        }
    }

    /// True once `now_ms` has reached the start time.
    pub fn has_started(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms
    }

    /// Advances to `now_ms`; returns whether the animation is still running.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if self.complete {
            return false;
        }
        if !self.has_started(now_ms) {
            return true;
        }
        let elapsed = now_ms - self.start_ms;
        self.complete = elapsed >= self.duration_ms;
        self.progress = if self.complete {
            1.0
        } else {
            (elapsed / self.duration_ms).min(1.0) as f32
        };
        !self.complete
    }
}

/// A card played by a bot, flying from its seat to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotPlayAnimation {
    pub bot_index: usize,
    pub card: Card,
    pub from: Point,
    pub to: Point,
    pub current: Point,
    pub timeline: Timeline,
}

/// A card turning over in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFlipAnimation {
    pub card: Card,
    pub position: Point,
    pub timeline: Timeline,
}

impl CardFlipAnimation {
    /// The face is showing once the squash passes its midpoint.
    pub fn is_face_up(&self) -> bool {
        self.timeline.progress > 0.5
    }

    /// Horizontal scale of the card: 1 at both ends, 0 at the midpoint.
    pub fn scale_x(&self) -> f32 {
        let p = self.timeline.progress;
        let flip = if p < 0.5 { p * 2.0 } else { (1.0 - p) * 2.0 };
        (1.0 - flip).abs()
    }
}

/// A card dealt into the viewer's hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnimation {
    pub card: Card,
    pub from: Point,
    pub to: Point,
    pub current: Point,
    pub timeline: Timeline,
}

impl DealAnimation {
    /// Slight wobble, largest halfway through.
    pub fn rotation(&self) -> f32 {
        (self.timeline.progress * PI).sin() * 0.1
    }
}

/// Celebration for the opening three of spades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeSpadesAnimation {
    pub card: Card,
    pub position: Point,
    pub timeline: Timeline,
}

impl ThreeSpadesAnimation {
    pub fn ring_radius(&self) -> f32 {
        lerp(30.0, 90.0, ease_in_out_quad(self.timeline.progress))
    }

    pub fn scale(&self) -> f32 {
        1.0 + 0.15 * (self.timeline.progress * PI).sin()
    }
}

/// Any running card animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Animation {
    BotPlay(BotPlayAnimation),
    CardFlip(CardFlipAnimation),
    Deal(DealAnimation),
    ThreeSpades(ThreeSpadesAnimation),
}

impl Animation {
    pub fn timeline(&self) -> &Timeline {
        match self {
            Animation::BotPlay(a) => &a.timeline,
            Animation::CardFlip(a) => &a.timeline,
            Animation::Deal(a) => &a.timeline,
            Animation::ThreeSpades(a) => &a.timeline,
        }
    }

    pub fn progress(&self) -> f32 {
        self.timeline().progress
    }

    pub fn is_complete(&self) -> bool {
        self.timeline().complete
    }

    /// The card being animated.
    pub fn card(&self) -> &Card {
        match self {
            Animation::BotPlay(a) => &a.card,
            Animation::CardFlip(a) => &a.card,
            Animation::Deal(a) => &a.card,
            Animation::ThreeSpades(a) => &a.card,
        }
    }

    /// Advances to `now_ms`; returns `false` once complete.
    pub fn update(&mut self, now_ms: f64) -> bool {
        match self {
            Animation::BotPlay(a) => {
                let running = a.timeline.advance(now_ms);
                let eased = ease_in_out_cubic(a.timeline.progress);
                a.current = (lerp(a.from.0, a.to.0, eased), lerp(a.from.1, a.to.1, eased));
                running
            }
            Animation::CardFlip(a) => a.timeline.advance(now_ms),
            Animation::Deal(a) => {
                if !a.timeline.has_started(now_ms) {
                    return !a.timeline.complete;
                }
                let running = a.timeline.advance(now_ms);
                let eased = ease_in_out_quad(a.timeline.progress);
                a.current = (lerp(a.from.0, a.to.0, eased), lerp(a.from.1, a.to.1, eased));
                running
            }
            Animation::ThreeSpades(a) => a.timeline.advance(now_ms),
        }
    }

    /// Whether drawing at `now_ms` would put anything on the surface.
    pub fn is_visible(&self, now_ms: f64) -> bool {
        !self.is_complete() && self.timeline().has_started(now_ms)
    }
}

/// Consuming form of [`Animation::update`]: `None` once complete.
pub fn advance(mut animation: Animation, now_ms: f64) -> Option<Animation> {
    animation.update(now_ms).then_some(animation)
}

impl<C: Clock> CardRenderer<C> {
    /// Card flying from a bot's seat to the table.
    pub fn create_bot_play_animation(&self, bot_index: usize, card: Card, from: Point, to: Point) -> Animation {
        trace!("Bot {} plays {}", bot_index, card);
        Animation::BotPlay(BotPlayAnimation {
            bot_index,
            card,
            from,
            to,
            current: from,
            timeline: Timeline::new(self.now_ms(), self.config().timings.bot_play_ms),
        })
    }

    /// Card turning over at a fixed position.
    pub fn create_card_flip_animation(&self, card: Card, x: f32, y: f32) -> Animation {
        Animation::CardFlip(CardFlipAnimation {
            card,
            position: (x, y),
            timeline: Timeline::new(self.now_ms(), self.config().timings.card_flip_ms),
        })
    }

    /// Card dealt to the viewer, starting `delay_ms` from now.
    pub fn create_deal_animation(&self, card: Card, from: Point, to: Point, delay_ms: f64) -> Animation {
        Animation::Deal(DealAnimation {
            card,
            from,
            to,
            current: from,
            timeline: Timeline::new(self.now_ms() + delay_ms.max(0.0), self.config().timings.deal_ms),
        })
    }

    /// Ring and pulse around a freshly played three of spades.
    pub fn create_three_spades_animation(&self, card: Card, x: f32, y: f32) -> Animation {
        Animation::ThreeSpades(ThreeSpadesAnimation {
            card,
            position: (x, y),
            timeline: Timeline::new(self.now_ms(), self.config().timings.three_spades_ms),
        })
    }

    /// Advances every animation and drops the completed ones.
    pub fn update_animations(&self, animations: &mut Vec<Animation>) {
        let now = self.now_ms();
        animations.retain_mut(|animation| animation.update(now));
    }

    /// Draws every animation that is running and has started.
    pub fn draw_bot_animations(&self, surface: &mut dyn Surface, animations: &[Animation]) {
        for animation in animations {
            self.draw_animation(surface, animation);
        }
    }

    /// Draws one animation at its current state.
    pub fn draw_animation(&self, surface: &mut dyn Surface, animation: &Animation) {
        if !animation.is_visible(self.now_ms()) {
            return;
        }
        match animation {
            Animation::BotPlay(a) => self.draw_bot_play(surface, a),
            Animation::CardFlip(a) => self.draw_card_flip(surface, a),
            Animation::Deal(a) => self.draw_deal(surface, a),
            Animation::ThreeSpades(a) => self.draw_three_spades(surface, a),
        }
    }

    fn draw_bot_play(&self, surface: &mut dyn Surface, animation: &BotPlayAnimation) {
        let (x, y) = animation.current;
        let progress = animation.timeline.progress;
        let style = CardStyle::table().animating(true);

        surface.save();
        if self.config().enable_shadows {
            surface.set_shadow(Shadow::new(
                with_alpha(palette::TEAL, 0.7),
                self.config().glow.blur,
                0.0,
                5.0,
            ));
        }
        self.draw_card_face(surface, &animation.card, x, y, style);

        if self.config().enable_trails && progress < 0.9 {
            surface.set_global_alpha(0.3 * (1.0 - progress));
            if self.config().enable_shadows {
                surface.set_shadow(Shadow::glow(with_alpha(palette::TEAL, 0.7), 30.0));
            }
            self.draw_card_face(surface, &animation.card, x, y, style);
        }
        surface.restore();
    }

    fn draw_card_flip(&self, surface: &mut dyn Surface, animation: &CardFlipAnimation) {
        let (x, y) = animation.position;
        let (cx, cy) = (x + TABLE_CARD_WIDTH / 2.0, y + TABLE_CARD_HEIGHT / 2.0);

        surface.save();
        surface.translate(cx, cy);
        surface.scale(animation.scale_x(), 1.0);
        surface.translate(-cx, -cy);
        if animation.is_face_up() {
            self.draw_card_face(surface, &animation.card, x, y, CardStyle::table().animating(true));
        } else {
            self.draw_card_back(surface, x, y, false);
        }
        surface.restore();
    }

    fn draw_deal(&self, surface: &mut dyn Surface, animation: &DealAnimation) {
        let (x, y) = animation.current;
        let (cx, cy) = (x + PLAYER_CARD_WIDTH / 2.0, y + PLAYER_CARD_HEIGHT / 2.0);

        surface.save();
        surface.translate(cx, cy);
        surface.rotate(animation.rotation());
        surface.translate(-cx, -cy);
        self.draw_card_face(surface, &animation.card, x, y, CardStyle::player().animating(true));
        surface.restore();
    }

    fn draw_three_spades(&self, surface: &mut dyn Surface, animation: &ThreeSpadesAnimation) {
        let (x, y) = animation.position;
        let (cx, cy) = (x + TABLE_CARD_WIDTH / 2.0, y + TABLE_CARD_HEIGHT / 2.0);
        let fade = 1.0 - animation.timeline.progress;

        surface.save();
        circle_path(surface, cx, cy, animation.ring_radius());
        surface.set_stroke_color(with_alpha(palette::GREEN, fade));
        surface.set_line_width(4.0);
        if self.config().enable_shadows {
            surface.set_shadow(Shadow::glow(with_alpha(palette::GREEN, fade), self.config().glow.blur));
        }
        surface.stroke();
        surface.clear_shadow();

        let scale = animation.scale();
        surface.translate(cx, cy);
        surface.scale(scale, scale);
        surface.translate(-cx, -cy);
        self.draw_card_face(surface, &animation.card, x, y, CardStyle::table().animating(true));
        surface.restore();
    }
}
