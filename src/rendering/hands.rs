//! # Hands and Play Area
//!
//! Composite drawing of the viewer's hand, the bots' face-down rows and the
//! cards on the table.

use crate::config::TABLE_CARD_HEIGHT;
use crate::rendering::card_face::CardStyle;
use crate::rendering::layout::{BotHandLayout, CardRect, HandLayout, PlayAreaLayout};
use crate::rendering::renderer::CardRenderer;
use crate::rendering::surface::{
    circle_path, palette, with_alpha, ColorStop, CompositeMode, FillStyle, FontSpec, Shadow,
    Surface, TextAlign, TextBaseline,
};
use crate::utils::Clock;
use crate::Card;

impl<C: Clock> CardRenderer<C> {
    /// Draws the viewer's hand centered on the canvas.
    ///
    /// Cards are drawn left to right, then every selected card is drawn once
    /// more on top so raised cards are never covered by their neighbours.
    /// The returned rectangles come from the first pass, one per card in
    /// hand order, with `index` equal to the hand position.
    pub fn draw_hand(
        &self,
        surface: &mut dyn Surface,
        hand: &[Card],
        y: f32,
        selected: &[usize],
        hovered: Option<usize>,
        canvas_width: f32,
    ) -> Vec<CardRect> {
        let layout = HandLayout::compute(hand.len(), canvas_width, self.config());

        let rects: Vec<CardRect> = hand
            .iter()
            .enumerate()
            .map(|(position, card)| {
                let style = CardStyle::player()
                    .selected(selected.contains(&position))
                    .hovered(hovered == Some(position));
                let card = card.with_index(position);
                self.draw_card_face(surface, &card, layout.card_x(position), y, style)
            })
            .collect();

        for (position, card) in hand.iter().enumerate() {
            if !selected.contains(&position) {
                continue;
            }
            surface.save();
            surface.set_composite(CompositeMode::SourceOver);
            let card = card.with_index(position);
            self.draw_card_face(
                surface,
                &card,
                layout.card_x(position),
                y,
                CardStyle::player().selected(true),
            );
            surface.restore();
        }

        rects
    }

    /// Draws one bot's face-down row with its labels.
    ///
    /// At most [`RenderConfig::bot_display_cap`](crate::RenderConfig) backs
    /// are shown, further limited by the row width; the remainder is
    /// reported by a "+N" badge. Returns the bounding box of the backs with
    /// `index` set to `bot_index`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bot_hand(
        &self,
        surface: &mut dyn Surface,
        card_count: usize,
        x: f32,
        y: f32,
        is_current_turn: bool,
        canvas_width: f32,
        bot_index: usize,
    ) -> CardRect {
        let layout = BotHandLayout::compute(
            card_count,
            x,
            y,
            canvas_width,
            self.config().bot_display_cap,
        );

        for position in 0..layout.shown {
            self.draw_card_back(surface, layout.card_x(position), y, is_current_turn);
        }

        surface.save();
        surface.set_text_align(TextAlign::Left);
        surface.set_text_baseline(TextBaseline::Alphabetic);
        surface.set_fill_color(if is_current_turn {
            palette::GOLD
        } else {
            palette::WHITE
        });
        surface.set_font(FontSpec::bold(14.0));
        surface.fill_text(&format!("Bot {}", bot_index), x, y - 8.0);

        surface.set_fill_color(with_alpha(palette::WHITE, 0.8));
        surface.set_font(FontSpec::regular(12.0));
        let noun = if card_count == 1 { "card" } else { "cards" };
        surface.fill_text(
            &format!("{} {}", card_count, noun),
            x,
            y + TABLE_CARD_HEIGHT + 18.0,
        );

        if layout.hidden() > 0 {
            let badge_x = x + layout.row_width() + 18.0;
            let badge_y = y + TABLE_CARD_HEIGHT / 2.0;
            circle_path(surface, badge_x, badge_y, 14.0);
            surface.set_fill_color(with_alpha(palette::BLACK, 0.6));
            surface.fill();
            surface.set_stroke_color(palette::METALLIC_GOLD);
            surface.set_line_width(1.5);
            surface.stroke();

            surface.set_fill_color(palette::WHITE);
            surface.set_font(FontSpec::bold(13.0));
            surface.set_text_align(TextAlign::Center);
            surface.set_text_baseline(TextBaseline::Middle);
            surface.fill_text(&format!("+{}", layout.hidden()), badge_x, badge_y);
        }
        surface.restore();

        layout.bounds(bot_index)
    }

    /// Draws the cards on the table centered on `(center_x, center_y)`.
    ///
    /// A soft gold disc is drawn behind the row first. Cards are table-size,
    /// raised with a drop shadow and never show hover effects.
    pub fn draw_play_area(
        &self,
        surface: &mut dyn Surface,
        cards: &[Card],
        center_x: f32,
        center_y: f32,
        canvas_width: f32,
    ) {
        if cards.is_empty() {
            return;
        }
        let layout = PlayAreaLayout::compute(cards.len(), center_x, center_y, canvas_width, self.config());

        let radius = (layout.total_width / 2.0 + 20.0).max(TABLE_CARD_HEIGHT / 2.0 + 10.0);
        surface.save();
        surface.set_fill_style(FillStyle::RadialGradient {
            cx: center_x,
            cy: center_y,
            radius,
            stops: vec![
                ColorStop::new(0.0, with_alpha(palette::GOLD, 0.25)),
                ColorStop::new(0.7, with_alpha(palette::GOLD, 0.08)),
                ColorStop::new(1.0, palette::TRANSPARENT),
            ],
        });
        circle_path(surface, center_x, center_y, radius);
        surface.fill();
        surface.restore();

        for (position, card) in cards.iter().enumerate() {
            surface.save();
            if self.config().enable_shadows {
                surface.set_shadow(Shadow::new(palette::SHADOW, 10.0, 0.0, 5.0));
            }
            self.draw_card_face(
                surface,
                card,
                layout.card_x(position),
                layout.top_y,
                CardStyle::table().animating(true),
            );
            surface.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::recorder::{DrawCommand, RecordingSurface};
    use crate::rendering::settings::RenderConfig;
    use crate::utils::ManualClock;
    use crate::Suit;

    fn renderer() -> CardRenderer<ManualClock> {
        CardRenderer::with_clock(RenderConfig::default(), ManualClock::new(0.0))
    }

    fn hand(size: usize) -> Vec<Card> {
        crate::standard_deck().into_iter().take(size).collect()
    }

    #[test]
    fn test_hand_rects_follow_layout() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        let cards = hand(13);

        let rects = renderer.draw_hand(&mut surface, &cards, 600.0, &[], None, 800.0);
        assert_eq!(rects.len(), 13);
        for (position, rect) in rects.iter().enumerate() {
            assert_eq!(rect.index, position);
            assert_eq!(rect.y, 600.0);
        }
        assert!(rects.windows(2).all(|pair| pair[0].x < pair[1].x));
        assert!((rects[0].x - 30.0).abs() < 1e-3);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_selected_cards_drawn_twice_and_lifted_once() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        let cards = hand(5);

        let rects = renderer.draw_hand(&mut surface, &cards, 600.0, &[1, 3], None, 1200.0);
        assert_eq!(rects[1].y, 582.0);
        assert_eq!(rects[3].y, 582.0);
        assert_eq!(rects[0].y, 600.0);

        // Four glyphs per face, five faces plus two redraws
        assert_eq!(surface.texts().len(), 7 * 4);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_hovered_card_is_enlarged() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        let rects = renderer.draw_hand(&mut surface, &hand(5), 600.0, &[], Some(2), 1200.0);
        assert!(rects[2].width > rects[1].width);
        assert!(rects[2].y < 600.0);
    }

    #[test]
    fn test_empty_hand_draws_nothing() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        assert!(renderer.draw_hand(&mut surface, &[], 600.0, &[], None, 800.0).is_empty());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_bot_hand_badge_and_labels() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        let bounds = renderer.draw_bot_hand(&mut surface, 13, 20.0, 50.0, false, 1600.0, 2);

        assert_eq!(bounds.index, 2);
        assert_eq!(bounds.width, 6.0 * 45.0 + 60.0);
        let texts = surface.texts();
        assert!(texts.contains(&"Bot 2"));
        assert!(texts.contains(&"13 cards"));
        assert!(texts.contains(&"+6"));
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_bot_hand_without_badge() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        renderer.draw_bot_hand(&mut surface, 1, 20.0, 50.0, true, 1600.0, 1);
        let texts = surface.texts();
        assert!(texts.contains(&"1 card"));
        assert!(!texts.iter().any(|t| t.starts_with('+')));
    }

    #[test]
    fn test_play_area_highlight_drawn_behind_cards() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        let cards = vec![
            Card::new(7, Suit::Hearts).unwrap(),
            Card::new(7, Suit::Clubs).unwrap(),
        ];
        renderer.draw_play_area(&mut surface, &cards, 500.0, 300.0, 1200.0);

        assert_eq!(surface.texts(), vec!["7", "♥", "♥", "7", "7", "♣", "♣", "7"]);

        match &surface.fills()[0].fill {
            FillStyle::RadialGradient { radius, .. } => assert_eq!(*radius, 70.0),
            other => panic!("expected radial highlight, got {other:?}"),
        }
        let card_body = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill(paint) if paint.fill == FillStyle::Solid(palette::CARD_FACE) => Some(paint),
                _ => None,
            })
            .next()
            .unwrap();
        assert!(card_body.shadow.is_visible());
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_empty_play_area_is_noop() {
        let renderer = renderer();
        let mut surface = RecordingSurface::new();
        renderer.draw_play_area(&mut surface, &[], 500.0, 300.0, 1200.0);
        assert!(surface.commands().is_empty());
    }
}
