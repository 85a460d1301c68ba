//! # Drawing Surface
//!
//! The immediate-mode 2D drawing interface the renderer draws through.
//!
//! The model follows a canvas-style context: an implicit stack of style,
//! transform and clip state managed with [`Surface::save`] and
//! [`Surface::restore`], a current path built with move/line/curve/arc calls,
//! and fill, stroke, clip and text operations that consume it.

use macroquad::color::Color;
use std::f32::consts::PI;
use std::fmt;

/// Colors used on the card table.
pub mod palette {
    use macroquad::color::Color;

    pub const CARD_FACE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const CARD_BORDER: Color = Color::new(0.8, 0.8, 0.8, 1.0);
    pub const RED_SUIT: Color = Color::new(0.784, 0.0, 0.0, 1.0);
    pub const BLACK_SUIT: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const GOLD: Color = Color::new(1.0, 0.843, 0.0, 1.0);
    pub const METALLIC_GOLD: Color = Color::new(0.831, 0.686, 0.216, 1.0);
    pub const DARK_GOLD: Color = Color::new(0.545, 0.412, 0.078, 1.0);
    pub const TEAL: Color = Color::new(0.306, 0.804, 0.769, 1.0);
    pub const TEAL_GLOW: Color = Color::new(0.306, 0.804, 0.769, 0.5);
    pub const GREEN: Color = Color::new(0.0, 0.784, 0.325, 1.0);
    pub const FELT_GREEN: Color = Color::new(0.078, 0.353, 0.196, 1.0);
    pub const DEEP_GREEN: Color = Color::new(0.055, 0.302, 0.157, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const BANNER: Color = Color::new(0.102, 0.039, 0.0, 0.9);
    pub const SHADOW: Color = Color::new(0.0, 0.0, 0.0, 0.5);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
}

/// Returns `color` with its alpha replaced.
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha)
}

/// A color stop of a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How the interior of a path or a glyph is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    Solid(Color),
    LinearGradient {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        cx: f32,
        cy: f32,
        radius: f32,
        stops: Vec<ColorStop>,
    },
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Solid(color)
    }
}

impl FillStyle {
    /// Evaluates the style at a point, in the same coordinates as the style.
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        match self {
            FillStyle::Solid(color) => *color,
            FillStyle::LinearGradient {
                x0,
                y0,
                x1,
                y1,
                stops,
            } => {
                let (dx, dy) = (x1 - x0, y1 - y0);
                let length_sq = dx * dx + dy * dy;
                let t = if length_sq > 0.0 {
                    ((x - x0) * dx + (y - y0) * dy) / length_sq
                } else {
                    0.0
                };
                sample_stops(stops, t)
            }
            FillStyle::RadialGradient {
                cx,
                cy,
                radius,
                stops,
            } => {
                let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                let t = if *radius > 0.0 { distance / radius } else { 1.0 };
                sample_stops(stops, t)
            }
        }
    }
}

fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return palette::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let k = (t - a.offset) / span;
            return Color::new(
                a.color.r + (b.color.r - a.color.r) * k,
                a.color.g + (b.color.g - a.color.g) * k,
                a.color.b + (b.color.b - a.color.b) * k,
                a.color.a + (b.color.a - a.color.a) * k,
            );
        }
    }
    last.color
}

/// Drop shadow applied to subsequent fills, strokes and text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shadow {
    pub const NONE: Shadow = Shadow {
        color: palette::TRANSPARENT,
        blur: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub fn new(color: Color, blur: f32, offset_x: f32, offset_y: f32) -> Self {
        Self {
            color,
            blur,
            offset_x,
            offset_y,
        }
    }

    /// A centered glow.
    pub fn glow(color: Color, blur: f32) -> Self {
        Self::new(color, blur, 0.0, 0.0)
    }

    pub fn is_visible(&self) -> bool {
        self.color.a > 0.0 && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::NONE
    }
}

/// How new pixels combine with what is already drawn.
///
/// Only source-over is drawn; the selected-card pass resets to it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    #[default]
    SourceOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Top,
}

/// Font used by [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::regular(10.0)
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            write!(f, "bold {}px Arial", self.size)
        } else {
            write!(f, "{}px Arial", self.size)
        }
    }
}

/// A 2D immediate-mode drawing context.
pub trait Surface {
    /// Pushes the current style, transform and clip.
    fn save(&mut self);
    /// Pops the state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, sx: f32, sy: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32);
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn close_path(&mut self);

    /// Appends a rounded rectangle to the current path.
    ///
    /// Surfaces without a native primitive keep this default, which traces
    /// the outline with quadratic curves (see [`trace_rounded_rect`]).
    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
        trace_rounded_rect(self, x, y, width, height, radius);
    }

    fn fill(&mut self);
    fn stroke(&mut self);
    /// Intersects the clip region with the current path.
    fn clip(&mut self);

    fn set_fill_style(&mut self, style: FillStyle);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_shadow(&mut self, shadow: Shadow);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_composite(&mut self, mode: CompositeMode);

    fn set_font(&mut self, font: FontSpec);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    fn clear_shadow(&mut self) {
        self.set_shadow(Shadow::NONE);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.set_fill_style(FillStyle::Solid(color));
    }
}

/// Traces a rounded rectangle with lines and quadratic corner curves.
///
/// This is the path used when a surface has no native rounded-rectangle
/// primitive. The radius is clamped to half the shorter side.
pub fn trace_rounded_rect<S: Surface + ?Sized>(
    surface: &mut S,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
) {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    surface.move_to(x + r, y);
    surface.line_to(x + width - r, y);
    surface.quadratic_curve_to(x + width, y, x + width, y + r);
    surface.line_to(x + width, y + height - r);
    surface.quadratic_curve_to(x + width, y + height, x + width - r, y + height);
    surface.line_to(x + r, y + height);
    surface.quadratic_curve_to(x, y + height, x, y + height - r);
    surface.line_to(x, y + r);
    surface.quadratic_curve_to(x, y, x + r, y);
}

/// Starts a new path holding a single closed rounded rectangle.
pub fn rounded_rect_path<S: Surface + ?Sized>(
    surface: &mut S,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
) {
    surface.begin_path();
    surface.round_rect(x, y, width, height, radius);
    surface.close_path();
}

/// Starts a new path holding a full circle.
pub fn circle_path<S: Surface + ?Sized>(surface: &mut S, cx: f32, cy: f32, radius: f32) {
    surface.begin_path();
    surface.arc(cx, cy, radius, 0.0, PI * 2.0);
    surface.close_path();
}
