//! # Layout Geometry
//!
//! Pure placement math for hands, bot rows and the play area, plus the
//! rectangles handed back to the controller for hit-testing.
//!
//! Nothing here touches a surface; every function is a pure function of its
//! arguments, so layouts can be computed (and tested) without drawing.

use crate::config::{
    HAND_MARGIN, PLAYER_CARD_HEIGHT, PLAYER_CARD_WIDTH, TABLE_CARD_HEIGHT, TABLE_CARD_WIDTH,
};
use crate::rendering::settings::{tier_step, RenderConfig};
use serde::{Deserialize, Serialize};

/// Distance between bot card-back origins.
pub const BOT_CARD_STEP: f32 = 45.0;

/// Share of the canvas width a bot row may occupy.
pub const BOT_ROW_WIDTH_SHARE: f32 = 0.3;

/// Final on-surface rectangle of a drawn card.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CardRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Logical index of the card (hand position, or bot index for bot rows)
    pub index: usize,
    /// The card is the three of spades
    pub is_three_spades: bool,
    /// The three-of-spades highlight was drawn
    pub highlight_three_spades: bool,
    /// An automatic-win glow was drawn
    pub is_special_card: bool,
}

impl CardRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
            ..Self::default()
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive point containment.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Finds the card under a point, honouring draw order.
///
/// Selected cards are drawn last, so they win over their neighbours; among
/// the rest, later (further right) cards sit on top of earlier ones.
///
/// # Examples
///
/// ```
/// use tienlen_render::{hit_test, CardRect};
///
/// let rects = vec![
///     CardRect::new(0.0, 0.0, 72.0, 101.0, 0),
///     CardRect::new(40.0, 0.0, 72.0, 101.0, 1),
/// ];
/// assert_eq!(hit_test(&rects, &[], 50.0, 50.0), Some(1));
/// assert_eq!(hit_test(&rects, &[0], 50.0, 50.0), Some(0));
/// assert_eq!(hit_test(&rects, &[], 500.0, 50.0), None);
/// ```
pub fn hit_test(rects: &[CardRect], selected: &[usize], px: f32, py: f32) -> Option<usize> {
    let on_top = rects
        .iter()
        .rev()
        .filter(|rect| selected.contains(&rect.index))
        .find(|rect| rect.contains(px, py));
    on_top
        .or_else(|| rects.iter().rev().find(|rect| rect.contains(px, py)))
        .map(|rect| rect.index)
}

/// Horizontal placement of the viewer's hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLayout {
    pub count: usize,
    pub card_width: f32,
    pub card_height: f32,
    /// Distance between neighbouring card origins
    pub spacing: f32,
    /// Distance from the left edge of the first card to the right edge of the last
    pub total_width: f32,
    pub start_x: f32,
}

impl HandLayout {
    /// Computes spacing and centering for a hand of `count` cards.
    ///
    /// The spacing tier comes from the hand size. If the row would overflow
    /// the available width the spacing is recomputed as an even division of
    /// it, floored at `card_width + hand_min_step` but never wider than the
    /// tier. The row is centered on its real width, so when the floor binds
    /// it spills past both margins by the same amount.
    pub fn compute(count: usize, canvas_width: f32, config: &RenderConfig) -> Self {
        let card_width = PLAYER_CARD_WIDTH;
        let available = (canvas_width - HAND_MARGIN).max(0.0);

        let (spacing, total_width) = match count {
            0 => (0.0, 0.0),
            1 => (0.0, card_width),
            n => {
                let gaps = (n - 1) as f32;
                let tier = card_width + tier_step(&config.hand_tiers, n);
                let mut spacing = tier;
                if gaps * spacing + card_width > available {
                    let even = (available - card_width) / gaps;
                    spacing = tier.min(even.max(card_width + config.hand_min_step));
                }
                (spacing, gaps * spacing + card_width)
            }
        };

        Self {
            count,
            card_width,
            card_height: PLAYER_CARD_HEIGHT,
            spacing,
            total_width,
            start_x: (canvas_width - total_width) / 2.0,
        }
    }

    /// Narrowest spacing a hand of `count` cards can be squeezed to.
    pub fn min_spacing(count: usize, config: &RenderConfig) -> f32 {
        let tier = PLAYER_CARD_WIDTH + tier_step(&config.hand_tiers, count);
        tier.min(PLAYER_CARD_WIDTH + config.hand_min_step)
    }

    /// Smallest canvas on which `count` cards fit inside the margins.
    pub fn min_canvas_width(count: usize, config: &RenderConfig) -> f32 {
        match count {
            0 => HAND_MARGIN,
            n => (n - 1) as f32 * Self::min_spacing(n, config) + PLAYER_CARD_WIDTH + HAND_MARGIN,
        }
    }

    /// Left edge of the unscaled card at `position`.
    pub fn card_x(&self, position: usize) -> f32 {
        self.start_x + position as f32 * self.spacing
    }
}

/// Placement of the cards in the play area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayAreaLayout {
    pub count: usize,
    pub step: f32,
    pub total_width: f32,
    pub start_x: f32,
    pub top_y: f32,
}

impl PlayAreaLayout {
    pub fn compute(
        count: usize,
        center_x: f32,
        center_y: f32,
        canvas_width: f32,
        config: &RenderConfig,
    ) -> Self {
        let card_width = TABLE_CARD_WIDTH;
        let available = (canvas_width - HAND_MARGIN).max(card_width);
        let mut step = card_width + tier_step(&config.play_area_tiers, count);
        if count > 1 {
            let gaps = (count - 1) as f32;
            if gaps * step + card_width > available {
                step = ((available - card_width) / gaps).max(1.0);
            }
        }
        let total_width = match count {
            0 => 0.0,
            n => (n - 1) as f32 * step + card_width,
        };
        Self {
            count,
            step,
            total_width,
            start_x: center_x - total_width / 2.0,
            top_y: center_y - TABLE_CARD_HEIGHT / 2.0,
        }
    }

    pub fn card_x(&self, position: usize) -> f32 {
        self.start_x + position as f32 * self.step
    }
}

/// Placement of a bot's face-down row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotHandLayout {
    pub card_count: usize,
    /// Card backs actually drawn
    pub shown: usize,
    pub x: f32,
    pub y: f32,
}

impl BotHandLayout {
    pub fn compute(card_count: usize, x: f32, y: f32, canvas_width: f32, cap: usize) -> Self {
        let fits = ((canvas_width * BOT_ROW_WIDTH_SHARE - TABLE_CARD_WIDTH) / BOT_CARD_STEP)
            .floor()
            .max(0.0) as usize
            + 1;
        Self {
            card_count,
            shown: card_count.min(cap).min(fits),
            x,
            y,
        }
    }

    /// Cards not drawn, reported by the "+N" badge.
    pub fn hidden(&self) -> usize {
        self.card_count - self.shown
    }

    pub fn card_x(&self, position: usize) -> f32 {
        self.x + position as f32 * BOT_CARD_STEP
    }

    /// Width of the drawn row of backs.
    pub fn row_width(&self) -> f32 {
        match self.shown {
            0 => 0.0,
            n => (n - 1) as f32 * BOT_CARD_STEP + TABLE_CARD_WIDTH,
        }
    }

    /// Box around the card backs.
    pub fn bounds(&self, bot_index: usize) -> CardRect {
        CardRect::new(self.x, self.y, self.row_width(), TABLE_CARD_HEIGHT, bot_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_cards_on_800_canvas() {
        let layout = HandLayout::compute(13, 800.0, &RenderConfig::default());
        assert!(layout.total_width <= 740.0 + 1e-3);
        assert!((layout.total_width - 740.0).abs() < 1e-3);
        assert!((layout.start_x - 30.0).abs() < 1e-3);
        assert!(layout.spacing >= 52.0 && layout.spacing < 72.0);
    }

    #[test]
    fn test_overflowing_large_hand_keeps_tier_spacing() {
        let config = RenderConfig::default();
        let roomy = HandLayout::compute(19, 1000.0, &config);
        assert_eq!(roomy.spacing, 47.0);
        assert!((roomy.start_x - 41.0).abs() < 1e-3);

        let squeezed = HandLayout::compute(19, 970.0, &config);
        assert_eq!(squeezed.spacing, 47.0);
        assert_eq!(squeezed.total_width, 18.0 * 47.0 + 72.0);
        assert!((squeezed.start_x - (970.0 - squeezed.total_width) / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_floor_bound_row_is_centered() {
        let layout = HandLayout::compute(13, 600.0, &RenderConfig::default());
        assert_eq!(layout.spacing, 52.0);
        assert_eq!(layout.total_width, 12.0 * 52.0 + 72.0);
        let right = layout.card_x(12) + layout.card_width;
        assert!((layout.card_x(0) - (600.0 - right)).abs() < 1e-3);
    }

    #[test]
    fn test_min_canvas_width() {
        let config = RenderConfig::default();
        assert_eq!(HandLayout::min_canvas_width(13, &config), 12.0 * 52.0 + 72.0 + 60.0);
        assert_eq!(HandLayout::min_canvas_width(20, &config), 19.0 * 47.0 + 72.0 + 60.0);
        assert_eq!(HandLayout::min_canvas_width(1, &config), 132.0);
    }

    #[test]
    fn test_compact_tier_without_overflow() {
        let layout = HandLayout::compute(13, 1400.0, &RenderConfig::default());
        assert_eq!(layout.spacing, 72.0);
        assert_eq!(layout.total_width, 12.0 * 72.0 + 72.0);
        assert_eq!(layout.start_x, (1400.0 - layout.total_width) / 2.0);
    }

    #[test]
    fn test_small_hands_use_generous_spacing() {
        let layout = HandLayout::compute(4, 1200.0, &RenderConfig::default());
        assert_eq!(layout.spacing, 92.0);
        let single = HandLayout::compute(1, 1200.0, &RenderConfig::default());
        assert_eq!(single.spacing, 0.0);
        assert_eq!(single.total_width, 72.0);
        assert_eq!(single.start_x, 564.0);
    }

    #[test]
    fn test_empty_hand() {
        let layout = HandLayout::compute(0, 800.0, &RenderConfig::default());
        assert_eq!(layout.total_width, 0.0);
        assert_eq!(layout.start_x, 400.0);
    }

    #[test]
    fn test_play_area_tiers() {
        let config = RenderConfig::default();
        assert_eq!(PlayAreaLayout::compute(3, 400.0, 300.0, 1200.0, &config).step, 40.0);
        assert_eq!(PlayAreaLayout::compute(10, 400.0, 300.0, 1200.0, &config).step, 30.0);
        assert_eq!(PlayAreaLayout::compute(13, 400.0, 300.0, 1200.0, &config).step, 22.0);

        let layout = PlayAreaLayout::compute(4, 400.0, 300.0, 1200.0, &config);
        assert_eq!(layout.total_width, 3.0 * 40.0 + 60.0);
        assert_eq!(layout.start_x, 400.0 - layout.total_width / 2.0);
        assert_eq!(layout.top_y, 258.0);
    }

    #[test]
    fn test_play_area_compresses_on_narrow_canvas() {
        let layout = PlayAreaLayout::compute(13, 150.0, 100.0, 300.0, &RenderConfig::default());
        assert!(layout.total_width <= 240.0 + 1e-3);
    }

    #[test]
    fn test_bot_row_cap_and_badge() {
        let layout = BotHandLayout::compute(13, 10.0, 10.0, 1600.0, 7);
        assert_eq!(layout.shown, 7);
        assert_eq!(layout.hidden(), 6);
        assert_eq!(layout.row_width(), 6.0 * 45.0 + 60.0);

        let narrow = BotHandLayout::compute(13, 10.0, 10.0, 400.0, 7);
        assert_eq!(narrow.shown, 2);

        let empty = BotHandLayout::compute(0, 10.0, 10.0, 1600.0, 7);
        assert_eq!(empty.shown, 0);
        assert_eq!(empty.bounds(2).width, 0.0);
        assert_eq!(empty.bounds(2).index, 2);
    }

    #[test]
    fn test_hit_test_prefers_selected() {
        let rects: Vec<CardRect> = (0..3)
            .map(|i| CardRect::new(i as f32 * 40.0, 0.0, 72.0, 101.0, i))
            .collect();
        assert_eq!(hit_test(&rects, &[], 45.0, 10.0), Some(1));
        assert_eq!(hit_test(&rects, &[0], 45.0, 10.0), Some(0));
        assert_eq!(hit_test(&rects, &[], 5.0, 10.0), Some(0));
        assert_eq!(hit_test(&rects, &[], 5.0, 200.0), None);
    }
}
