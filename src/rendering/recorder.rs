//! # Recording Surface
//!
//! A [`Surface`] that draws nothing and keeps a log of every operation.
//!
//! Fills, strokes and text are recorded together with the style state that
//! was active when they were issued, so a log can be inspected without
//! replaying the setter calls. Useful for tests and for dumping a frame when
//! chasing layout bugs.

use crate::rendering::surface::{
    trace_rounded_rect, CompositeMode, FillStyle, FontSpec, Shadow, Surface, TextAlign,
    TextBaseline,
};
use macroquad::color::Color;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    Rotate(f32),
    Scale { sx: f32, sy: f32 },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadraticCurveTo { cpx: f32, cpy: f32, x: f32, y: f32 },
    Arc { cx: f32, cy: f32, radius: f32, start: f32, end: f32 },
    RoundRect { x: f32, y: f32, width: f32, height: f32, radius: f32 },
    ClosePath,
    Fill(PaintState),
    Stroke(PaintState),
    Clip,
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        paint: PaintState,
    },
}

/// Style state captured with each paint operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    pub fill: FillStyle,
    pub stroke: Color,
    pub line_width: f32,
    pub shadow: Shadow,
    pub alpha: f32,
    pub composite: CompositeMode,
}

#[derive(Debug, Clone)]
struct RecorderState {
    paint: PaintState,
    font: FontSpec,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self {
            paint: PaintState {
                fill: FillStyle::Solid(Color::new(0.0, 0.0, 0.0, 1.0)),
                stroke: Color::new(0.0, 0.0, 0.0, 1.0),
                line_width: 1.0,
                shadow: Shadow::NONE,
                alpha: 1.0,
                composite: CompositeMode::SourceOver,
            },
            font: FontSpec::default(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Surface that records operations instead of drawing them.
///
/// # Examples
///
/// ```
/// use tienlen_render::{RecordingSurface, Surface};
///
/// let mut surface = RecordingSurface::new();
/// surface.save();
/// surface.fill_text("hello", 10.0, 20.0);
/// surface.restore();
/// assert_eq!(surface.texts(), vec!["hello"]);
/// assert!(surface.is_balanced());
/// ```
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    state: RecorderState,
    stack: Vec<RecorderState>,
    native_round_rect: bool,
    unmatched_restores: usize,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Creates a recorder that reports native rounded-rectangle support.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            state: RecorderState::default(),
            stack: Vec::new(),
            native_round_rect: true,
            unmatched_restores: 0,
        }
    }

    /// Creates a recorder without a rounded-rectangle primitive, so rounded
    /// outlines are traced with quadratic curves.
    pub fn without_round_rect() -> Self {
        Self {
            native_round_rect: false,
            ..Self::new()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Discards the log, keeping the current state.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Current save/restore nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// True when every save was restored and no restore was unmatched.
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty() && self.unmatched_restores == 0
    }

    /// Texts drawn so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Paint states of every fill, in order.
    pub fn fills(&self) -> Vec<&PaintState> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Fill(paint) => Some(paint),
                _ => None,
            })
            .collect()
    }

    /// Paint states of every stroke, in order.
    pub fn strokes(&self) -> Vec<&PaintState> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Stroke(paint) => Some(paint),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded commands matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => self.unmatched_restores += 1,
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        self.commands
            .push(DrawCommand::QuadraticCurveTo { cpx, cpy, x, y });
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.commands.push(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
        if self.native_round_rect {
            self.commands.push(DrawCommand::RoundRect {
                x,
                y,
                width,
                height,
                radius,
            });
        } else {
            trace_rounded_rect(self, x, y, width, height, radius);
        }
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill(self.state.paint.clone()));
    }

    fn stroke(&mut self) {
        self.commands
            .push(DrawCommand::Stroke(self.state.paint.clone()));
    }

    fn clip(&mut self) {
        self.commands.push(DrawCommand::Clip);
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.state.paint.fill = style;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.paint.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.paint.line_width = width;
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.paint.shadow = shadow;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.paint.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.paint.composite = mode;
    }

    fn set_font(&mut self, font: FontSpec) {
        self.state.font = font;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font: self.state.font,
            align: self.state.align,
            baseline: self.state.baseline,
            paint: self.state.paint.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::surface::{palette, rounded_rect_path};

    #[test]
    fn test_restore_returns_to_saved_style() {
        let mut surface = RecordingSurface::new();
        surface.set_fill_color(palette::GOLD);
        surface.save();
        surface.set_fill_color(palette::GREEN);
        surface.fill();
        surface.restore();
        surface.fill();

        let fills = surface.fills();
        assert_eq!(fills[0].fill, FillStyle::Solid(palette::GREEN));
        assert_eq!(fills[1].fill, FillStyle::Solid(palette::GOLD));
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_unmatched_restore_is_reported() {
        let mut surface = RecordingSurface::new();
        surface.restore();
        assert!(!surface.is_balanced());
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.save();
        assert_eq!(surface.depth(), 2);
        assert!(!surface.is_balanced());
        surface.restore();
        surface.restore();
        assert_eq!(surface.depth(), 0);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_round_rect_fallback_traces_curves() {
        let mut native = RecordingSurface::new();
        rounded_rect_path(&mut native, 0.0, 0.0, 72.0, 101.0, 10.0);
        assert_eq!(native.count(|c| matches!(c, DrawCommand::RoundRect { .. })), 1);
        assert_eq!(native.count(|c| matches!(c, DrawCommand::QuadraticCurveTo { .. })), 0);

        let mut fallback = RecordingSurface::without_round_rect();
        rounded_rect_path(&mut fallback, 0.0, 0.0, 72.0, 101.0, 10.0);
        assert_eq!(fallback.count(|c| matches!(c, DrawCommand::RoundRect { .. })), 0);
        assert_eq!(fallback.count(|c| matches!(c, DrawCommand::QuadraticCurveTo { .. })), 4);
        assert_eq!(fallback.count(|c| matches!(c, DrawCommand::LineTo { .. })), 4);
        assert_eq!(
            fallback.commands().get(1),
            Some(&DrawCommand::MoveTo { x: 10.0, y: 0.0 })
        );
    }
}
