//! # Table Overlays
//!
//! Small informational elements drawn over the table: the selection counter,
//! the round/turn panel and the automatic-win banner.

use crate::config::VIEWER_INDEX;
use crate::game::GameSnapshot;
use crate::rendering::renderer::CardRenderer;
use crate::rendering::surface::{
    circle_path, palette, rounded_rect_path, with_alpha, ColorStop, FillStyle, FontSpec, Shadow,
    Surface, TextAlign, TextBaseline,
};
use crate::utils::Clock;

/// Width of the round/turn panel.
pub const INFO_PANEL_WIDTH: f32 = 220.0;

/// Widest the automatic-win banner gets.
pub const BANNER_MAX_WIDTH: f32 = 520.0;

const BANNER_HEIGHT: f32 = 150.0;

/// How the viewer's seat is named on screen.
pub const VIEWER_LABEL: &str = "You";

/// Name shown for the seat whose turn it is.
pub fn turn_label(snapshot: &GameSnapshot) -> String {
    if let Some(name) = snapshot.current_player_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match snapshot.current_player_index {
        Some(VIEWER_INDEX) => VIEWER_LABEL.to_string(),
        Some(seat) => format!("Bot {}", seat),
        None => "Waiting...".to_string(),
    }
}

impl<C: Clock> CardRenderer<C> {
    /// Draws a gold disc holding the number of selected cards.
    ///
    /// Nothing is drawn when `count` is zero.
    pub fn draw_selected_indicator(&self, surface: &mut dyn Surface, count: usize, x: f32, y: f32) {
        if count == 0 {
            return;
        }
        surface.save();
        circle_path(surface, x, y, 15.0);
        surface.set_fill_color(palette::METALLIC_GOLD);
        surface.fill();
        surface.set_stroke_color(palette::GOLD);
        surface.set_line_width(2.0);
        surface.stroke();

        surface.set_fill_color(palette::BLACK);
        surface.set_font(FontSpec::bold(16.0));
        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);
        surface.fill_text(&count.to_string(), x, y);
        surface.restore();
    }

    /// Draws the round number, whose turn it is and the opening-rule notice.
    pub fn draw_game_info(&self, surface: &mut dyn Surface, snapshot: &GameSnapshot, x: f32, y: f32) {
        let show_rule = snapshot.is_first_round() && snapshot.requires_three_spades;
        let height = if show_rule { 78.0 } else { 56.0 };

        surface.save();
        surface.set_fill_color(with_alpha(palette::BLACK, 0.45));
        rounded_rect_path(surface, x, y, INFO_PANEL_WIDTH, height, 8.0);
        surface.fill();
        surface.set_stroke_color(with_alpha(palette::METALLIC_GOLD, 0.6));
        surface.set_line_width(1.0);
        surface.stroke();

        surface.set_text_align(TextAlign::Left);
        surface.set_text_baseline(TextBaseline::Top);

        surface.set_fill_color(palette::GOLD);
        surface.set_font(FontSpec::bold(16.0));
        surface.fill_text(&format!("Round {}", snapshot.round_number), x + 12.0, y + 8.0);

        surface.set_fill_color(palette::WHITE);
        surface.set_font(FontSpec::regular(14.0));
        surface.fill_text(&format!("Turn: {}", turn_label(snapshot)), x + 12.0, y + 32.0);

        if show_rule {
            surface.set_fill_color(palette::GREEN);
            surface.set_font(FontSpec::bold(13.0));
            surface.fill_text("First play must include 3♠", x + 12.0, y + 54.0);
        }
        surface.restore();
    }

    /// Draws the centered automatic-win banner over a dimmed table.
    pub fn draw_automatic_win_indicator(
        &self,
        surface: &mut dyn Surface,
        winner_name: &str,
        reason: &str,
        canvas_width: f32,
        canvas_height: f32,
    ) {
        let width = (canvas_width - 40.0).clamp(0.0, BANNER_MAX_WIDTH);
        let x = (canvas_width - width) / 2.0;
        let y = (canvas_height - BANNER_HEIGHT) / 2.0;
        let cx = canvas_width / 2.0;

        surface.save();

        surface.set_fill_color(with_alpha(palette::BLACK, 0.5));
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(canvas_width, 0.0);
        surface.line_to(canvas_width, canvas_height);
        surface.line_to(0.0, canvas_height);
        surface.close_path();
        surface.fill();

        if self.config().enable_shadows {
            surface.set_shadow(Shadow::glow(with_alpha(palette::GOLD, 0.6), self.config().glow.blur));
        }
        surface.set_fill_style(FillStyle::LinearGradient {
            x0: x,
            y0: y,
            x1: x,
            y1: y + BANNER_HEIGHT,
            stops: vec![
                ColorStop::new(0.0, palette::BANNER),
                ColorStop::new(1.0, with_alpha(palette::DARK_GOLD, 0.9)),
            ],
        });
        rounded_rect_path(surface, x, y, width, BANNER_HEIGHT, 16.0);
        surface.fill();
        surface.clear_shadow();
        surface.set_stroke_color(palette::GOLD);
        surface.set_line_width(3.0);
        surface.stroke();

        surface.set_text_align(TextAlign::Center);
        surface.set_text_baseline(TextBaseline::Middle);

        surface.set_fill_color(palette::GOLD);
        surface.set_font(FontSpec::bold(32.0));
        surface.fill_text("AUTOMATIC WIN!", cx, y + 40.0);

        surface.set_fill_color(palette::WHITE);
        surface.set_font(FontSpec::bold(22.0));
        surface.fill_text(&winner_line(winner_name), cx, y + 82.0);

        if !reason.is_empty() {
            surface.set_fill_color(with_alpha(palette::WHITE, 0.85));
            surface.set_font(FontSpec::regular(18.0));
            surface.fill_text(reason, cx, y + 118.0);
        }

        surface.restore();
    }
}

/// Banner line naming the winner; the viewer is addressed in the second person.
fn winner_line(winner_name: &str) -> String {
    if winner_name == VIEWER_LABEL {
        format!("{} win", winner_name)
    } else {
        format!("{} wins", winner_name)
    }
}
