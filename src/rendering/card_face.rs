//! # Card Faces
//!
//! Drawing of a single face-up card and of the shared card back.

use crate::config::{PLAYER_CARD_HEIGHT, PLAYER_CARD_WIDTH, TABLE_CARD_HEIGHT, TABLE_CARD_WIDTH};
use crate::game::AutoWinCue;
use crate::rendering::layout::CardRect;
use crate::rendering::renderer::CardRenderer;
use crate::rendering::surface::{
    circle_path, palette, rounded_rect_path, with_alpha, ColorStop, FillStyle, FontSpec, Shadow,
    Surface, TextAlign, TextBaseline,
};
use crate::utils::{pulse, Clock};
use crate::{is_three_of_spades, Card};
use macroquad::color::Color;
use std::f32::consts::PI;

/// Interaction flags for one card face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardStyle {
    pub selected: bool,
    pub hovered: bool,
    /// The card is in flight; hover effects are suppressed
    pub animating: bool,
    /// Drawn at the larger player-hand footprint
    pub player_card: bool,
}

impl CardStyle {
    /// A card in the viewer's hand.
    pub fn player() -> Self {
        Self {
            player_card: true,
            ..Self::default()
        }
    }

    /// A table-size card (play area, bot reveals).
    pub fn table() -> Self {
        Self::default()
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    pub fn animating(mut self, animating: bool) -> Self {
        self.animating = animating;
        self
    }
}

/// Size-dependent constants of a card face.
#[derive(Debug, Clone, Copy)]
struct FaceMetrics {
    width: f32,
    height: f32,
    radius: f32,
    inset: f32,
    rank_size: f32,
    small_suit_size: f32,
    large_suit_size: f32,
    rank_y: f32,
    small_suit_y: f32,
    center_dx: f32,
    center_dy: f32,
}

const PLAYER_METRICS: FaceMetrics = FaceMetrics {
    width: PLAYER_CARD_WIDTH,
    height: PLAYER_CARD_HEIGHT,
    radius: 10.0,
    inset: 10.0,
    rank_size: 19.0,
    small_suit_size: 22.0,
    large_suit_size: 34.0,
    rank_y: 24.0,
    small_suit_y: 48.0,
    center_dx: 10.0,
    center_dy: 12.0,
};

const TABLE_METRICS: FaceMetrics = FaceMetrics {
    width: TABLE_CARD_WIDTH,
    height: TABLE_CARD_HEIGHT,
    radius: 8.0,
    inset: 8.0,
    rank_size: 16.0,
    small_suit_size: 18.0,
    large_suit_size: 28.0,
    rank_y: 20.0,
    small_suit_y: 40.0,
    center_dx: 8.0,
    center_dy: 10.0,
};

fn metrics(player_card: bool) -> &'static FaceMetrics {
    if player_card {
        &PLAYER_METRICS
    } else {
        &TABLE_METRICS
    }
}

/// Corner radius used for table-size cards and backs.
pub const TABLE_CARD_RADIUS: f32 = 8.0;

impl<C: Clock> CardRenderer<C> {
    /// Draws one face-up card and returns where it ended up.
    ///
    /// `(x, y)` is the top-left corner of the card at rest. Hovering scales
    /// the card about its center and lifts it; selection lifts it further
    /// without scaling. The returned rectangle is the final, post-effect
    /// footprint together with the card's logical index.
    pub fn draw_card_face(
        &self,
        surface: &mut dyn Surface,
        card: &Card,
        x: f32,
        y: f32,
        style: CardStyle,
    ) -> CardRect {
        let config = self.config();
        let m = metrics(style.player_card);

        let hover = style.hovered && !style.selected && !style.animating;
        let scale = if hover { config.hover_scale } else { 1.0 };
        let width = m.width * scale;
        let height = m.height * scale;
        let left = x - (width - m.width) / 2.0;
        let mut top = y - (height - m.height) / 2.0;
        if hover {
            top -= config.hover_lift;
        }
        if style.selected {
            top -= if style.player_card {
                config.player_selection_lift
            } else {
                config.table_selection_lift
            };
        }

        let now = self.now_ms();
        let is_three_spades = is_three_of_spades(Some(card));
        let highlight = self.should_highlight_three_spades(Some(card), style.player_card);
        let cue = if style.player_card {
            self.game_state().auto_win_cue(card)
        } else {
            None
        };

        surface.save();

        if let Some(cue) = cue {
            let intensity = pulse(
                now,
                config.glow.auto_win_period_ms,
                config.glow.min_intensity,
                config.glow.max_intensity,
            );
            let color = match cue {
                AutoWinCue::Two => palette::GOLD,
                AutoWinCue::OpeningThree => palette::GREEN,
            };
            self.draw_halo(surface, left, top, width, height, m.radius, color, intensity, 5.0);
        }

        let three_spades_intensity = highlight.then(|| {
            pulse(
                now,
                config.glow.three_spades_period_ms,
                config.glow.min_intensity,
                config.glow.max_intensity,
            )
        });
        if let Some(intensity) = three_spades_intensity {
            self.draw_halo(surface, left, top, width, height, m.radius, palette::GREEN, intensity, 3.0);
        }

        // Body
        if hover && config.enable_shadows {
            surface.set_shadow(Shadow::new(palette::TEAL_GLOW, 15.0, 0.0, config.hover_lift));
        }
        surface.set_fill_color(palette::CARD_FACE);
        rounded_rect_path(surface, left, top, width, height, m.radius);
        surface.fill();
        surface.clear_shadow();

        // Border
        let (border, border_width) = if style.selected {
            (palette::GOLD, 3.0)
        } else if let Some(intensity) = three_spades_intensity {
            (with_alpha(palette::GREEN, 0.6 + intensity * 0.4), 3.0)
        } else if style.hovered {
            if hover && config.enable_shadows {
                surface.set_shadow(Shadow::glow(palette::TEAL_GLOW, 8.0));
            }
            (palette::TEAL, 2.0)
        } else {
            (palette::CARD_BORDER, 1.0)
        };
        surface.set_stroke_color(border);
        surface.set_line_width(border_width);
        surface.stroke();
        surface.clear_shadow();

        // Glyphs, clipped to the card outline
        surface.save();
        rounded_rect_path(surface, left, top, width, height, m.radius);
        surface.clip();

        let ink = if card.suit().is_red() {
            palette::RED_SUIT
        } else {
            palette::BLACK_SUIT
        };
        surface.set_fill_color(ink);
        surface.set_text_align(TextAlign::Left);
        surface.set_text_baseline(TextBaseline::Alphabetic);

        let rank_font = FontSpec::bold((m.rank_size * scale).floor());
        let inset = m.inset * scale;

        surface.set_font(rank_font);
        surface.fill_text(card.rank_symbol(), left + inset, top + m.rank_y * scale);

        surface.set_font(FontSpec::regular((m.small_suit_size * scale).floor()));
        surface.fill_text(card.suit().symbol(), left + inset, top + m.small_suit_y * scale);

        surface.set_font(FontSpec::regular((m.large_suit_size * scale).floor()));
        surface.fill_text(
            card.suit().symbol(),
            left + width / 2.0 - m.center_dx * scale,
            top + height / 2.0 + m.center_dy * scale,
        );

        surface.save();
        surface.translate(left + width - inset, top + height - inset);
        surface.rotate(PI);
        surface.set_font(rank_font);
        surface.fill_text(card.rank_symbol(), 0.0, 0.0);
        surface.restore();

        surface.restore();
        surface.restore();

        CardRect {
            x: left,
            y: top,
            width,
            height,
            index: card.index().unwrap_or(0),
            is_three_spades,
            highlight_three_spades: highlight,
            is_special_card: cue.is_some(),
        }
    }

    /// Pulsing glow drawn just outside the card outline.
    #[allow(clippy::too_many_arguments)]
    fn draw_halo(
        &self,
        surface: &mut dyn Surface,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: Color,
        intensity: f32,
        spread: f32,
    ) {
        surface.save();
        if self.config().enable_shadows {
            surface.set_shadow(Shadow::glow(with_alpha(color, intensity), self.config().glow.blur));
        }
        surface.set_fill_color(with_alpha(color, intensity * 0.6));
        rounded_rect_path(
            surface,
            left - spread,
            top - spread,
            width + spread * 2.0,
            height + spread * 2.0,
            radius + spread,
        );
        surface.fill();
        surface.restore();
    }

    /// Draws a face-down card with the lotus motif.
    ///
    /// Backs carry no identity; `highlighted` switches the idle green
    /// gradient to gold (used for the bot whose turn it is).
    pub fn draw_card_back(
        &self,
        surface: &mut dyn Surface,
        x: f32,
        y: f32,
        highlighted: bool,
    ) {
        let (width, height) = (TABLE_CARD_WIDTH, TABLE_CARD_HEIGHT);
        let (top_color, bottom_color) = if highlighted {
            (palette::GOLD, palette::DARK_GOLD)
        } else {
            (palette::FELT_GREEN, palette::DEEP_GREEN)
        };

        surface.save();
        surface.set_fill_style(FillStyle::LinearGradient {
            x0: x,
            y0: y,
            x1: x,
            y1: y + height,
            stops: vec![
                ColorStop::new(0.0, top_color),
                ColorStop::new(1.0, bottom_color),
            ],
        });
        rounded_rect_path(surface, x, y, width, height, TABLE_CARD_RADIUS);
        surface.fill();

        if highlighted && self.config().enable_shadows {
            surface.set_shadow(Shadow::glow(with_alpha(palette::GOLD, 0.5), 10.0));
        }
        surface.set_stroke_color(if highlighted {
            palette::GOLD
        } else {
            palette::METALLIC_GOLD
        });
        surface.set_line_width(if highlighted { 3.0 } else { 2.0 });
        surface.stroke();
        surface.clear_shadow();

        let (cx, cy) = (x + width / 2.0, y + height / 2.0);

        // Eight-petal lotus
        surface.set_fill_color(with_alpha(palette::GOLD, 0.2));
        surface.begin_path();
        for petal in 0..8 {
            let angle = petal as f32 * PI / 4.0;
            let (px, py) = (cx + angle.cos() * 15.0, cy + angle.sin() * 15.0);
            if petal == 0 {
                surface.move_to(px, py);
            } else {
                surface.line_to(px, py);
            }
        }
        surface.close_path();
        surface.fill();

        circle_path(surface, cx, cy, 6.0);
        surface.set_fill_color(with_alpha(palette::METALLIC_GOLD, 0.4));
        surface.fill();

        surface.set_font(FontSpec::bold(12.0));
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.set_fill_color(with_alpha(palette::WHITE, 0.3));
        surface.fill_text("✿", x + 15.0, y + 15.0);
        surface.fill_text("★", x + width - 15.0, y + 15.0);
        surface.fill_text("★", x + 15.0, y + height - 15.0);
        surface.fill_text("✿", x + width - 15.0, y + height - 15.0);

        let pad = 12.0;
        surface.set_stroke_color(with_alpha(palette::METALLIC_GOLD, 0.3));
        surface.set_line_width(1.0);
        surface.begin_path();
        surface.move_to(x + pad, y + pad);
        surface.line_to(x + width - pad, y + pad);
        surface.line_to(x + width - pad, y + height - pad);
        surface.line_to(x + pad, y + height - pad);
        surface.close_path();
        surface.stroke();

        surface.restore();
    }
}
