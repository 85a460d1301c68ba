//! # Macroquad Display
//!
//! [`Surface`] implementation that draws into the macroquad window.
//!
//! Paths are flattened into polylines in screen space as they are built.
//! Fills are triangulated as fans (every outline the renderer produces is
//! convex or star-shaped around its centroid), strokes become line segments,
//! and clipping is approximated by the scissor rectangle around the clip
//! path. Blurred shadows are approximated with a soft outline; composite
//! modes other than source-over are drawn as source-over.

use crate::rendering::surface::{
    CompositeMode, FillStyle, FontSpec, Shadow, Surface, TextAlign, TextBaseline,
};
use macroquad::color::Color;
use macroquad::math::{vec2, Affine2, Vec2};
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::shapes::draw_line;
use macroquad::text::{draw_text_ex, measure_text, TextParams};
use macroquad::window::{get_internal_gl, screen_height, screen_width};
use std::f32::consts::TAU;

/// Segments used per quadratic curve.
const CURVE_SEGMENTS: usize = 6;

/// Screen-space clip rectangle `(x, y, width, height)`.
type ClipRect = (f32, f32, f32, f32);

#[derive(Debug, Clone)]
struct SubPath {
    points: Vec<Vec2>,
    closed: bool,
}

#[derive(Debug, Clone)]
struct DisplayState {
    transform: Affine2,
    fill: FillStyle,
    stroke: Color,
    line_width: f32,
    shadow: Shadow,
    alpha: f32,
    font: FontSpec,
    align: TextAlign,
    baseline: TextBaseline,
    clip: Option<ClipRect>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            fill: FillStyle::Solid(Color::new(0.0, 0.0, 0.0, 1.0)),
            stroke: Color::new(0.0, 0.0, 0.0, 1.0),
            line_width: 1.0,
            shadow: Shadow::NONE,
            alpha: 1.0,
            font: FontSpec::default(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            clip: None,
        }
    }
}

/// Canvas-style drawing into the current macroquad frame.
///
/// Create one per window and call [`MacroquadSurface::begin_frame`] before
/// drawing each frame.
#[derive(Debug, Default)]
pub struct MacroquadSurface {
    state: DisplayState,
    stack: Vec<DisplayState>,
    paths: Vec<SubPath>,
}

impl MacroquadSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets transform, style and clipping for a new frame.
    pub fn begin_frame(&mut self) {
        if !self.stack.is_empty() {
            log::warn!("{} unrestored surface states at end of frame", self.stack.len());
        }
        self.state = DisplayState::default();
        self.stack.clear();
        self.paths.clear();
        self.apply_clip();
    }

    pub fn width(&self) -> f32 {
        screen_width()
    }

    pub fn height(&self) -> f32 {
        screen_height()
    }

    fn to_screen(&self, x: f32, y: f32) -> Vec2 {
        self.state.transform.transform_point2(vec2(x, y))
    }

    fn to_user(&self, point: Vec2) -> Vec2 {
        self.state.transform.inverse().transform_point2(point)
    }

    /// Uniform scale of the current transform.
    fn scale_factor(&self) -> f32 {
        self.state.transform.matrix2.determinant().abs().sqrt()
    }

    fn current_point(&self) -> Option<Vec2> {
        self.paths.last().and_then(|path| path.points.last().copied())
    }

    fn push_point(&mut self, point: Vec2) {
        match self.paths.last_mut() {
            Some(path) if !path.closed => path.points.push(point),
            _ => self.paths.push(SubPath {
                points: vec![point],
                closed: false,
            }),
        }
    }

    fn paint(&self, color: Color) -> Color {
        Color::new(color.r, color.g, color.b, color.a * self.state.alpha)
    }

    fn apply_clip(&self) {
        // Macroquad exposes scissor rectangles only through `QuadGl`, which is
        // reached through the unsafe `get_internal_gl`; the safe drawing API
        // has no clipping call.
        // SAFETY: the surface lives on the macroquad main loop and the returned
        // context is dropped before any other drawing call runs.
        let mut gl = unsafe { get_internal_gl() };
        gl.quad_gl.scissor(
            self.state
                .clip
                .map(|(x, y, w, h)| (x as i32, y as i32, w.ceil() as i32, h.ceil() as i32)),
        );
    }

    fn fill_polygon(&self, points: &[Vec2], offset: Vec2, color_of: &dyn Fn(Vec2) -> Color) {
        if points.len() < 3 {
            return;
        }
        let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
        let vertex = |p: Vec2| {
            let q = p + offset;
            Vertex::new(q.x, q.y, 0.0, 0.0, 0.0, color_of(p))
        };

        let mut vertices = Vec::with_capacity(points.len() + 1);
        vertices.push(vertex(centroid));
        vertices.extend(points.iter().map(|p| vertex(*p)));

        let n = points.len() as u16;
        let indices = (1..=n)
            .flat_map(|i| [0, i, if i == n { 1 } else { i + 1 }])
            .collect();

        draw_mesh(&Mesh {
            vertices,
            indices,
            texture: None,
        });
    }

    fn stroke_polyline(&self, path: &SubPath, offset: Vec2, thickness: f32, color: Color) {
        for pair in path.points.windows(2) {
            let (a, b) = (pair[0] + offset, pair[1] + offset);
            draw_line(a.x, a.y, b.x, b.y, thickness, color);
        }
        if path.closed && path.points.len() > 2 {
            if let (Some(first), Some(last)) = (path.points.first(), path.points.last()) {
                let (a, b) = (*last + offset, *first + offset);
                draw_line(a.x, a.y, b.x, b.y, thickness, color);
            }
        }
    }

    fn draw_shadow_outline(&self, path: &SubPath, shadow: &Shadow) {
        let offset = vec2(shadow.offset_x, shadow.offset_y);
        let color = self.paint(shadow.color);
        if shadow.blur > 0.0 {
            let soft = Color::new(color.r, color.g, color.b, color.a * 0.35);
            self.stroke_polyline(path, offset, shadow.blur * 0.5, soft);
        }
    }
}

impl Surface for MacroquadSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            let clip_changed = state.clip != self.state.clip;
            self.state = state;
            if clip_changed {
                self.apply_clip();
            }
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.transform = self.state.transform * Affine2::from_translation(vec2(dx, dy));
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform * Affine2::from_scale(vec2(sx, sy));
    }

    fn begin_path(&mut self) {
        self.paths.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let point = self.to_screen(x, y);
        self.paths.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let point = self.to_screen(x, y);
        self.push_point(point);
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        let control = self.to_screen(cpx, cpy);
        let end = self.to_screen(x, y);
        let Some(start) = self.current_point() else {
            self.push_point(end);
            return;
        };
        for step in 1..=CURVE_SEGMENTS {
            let t = step as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            self.push_point(start * (u * u) + control * (2.0 * u * t) + end * (t * t));
        }
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) {
        let sweep = (end_angle - start_angle).clamp(-TAU, TAU);
        let segments = ((radius * self.scale_factor() * sweep.abs() / 4.0).ceil() as usize).clamp(8, 64);
        for step in 0..=segments {
            let angle = start_angle + sweep * step as f32 / segments as f32;
            let point = self.to_screen(cx + radius * angle.cos(), cy + radius * angle.sin());
            self.push_point(point);
        }
    }

    fn close_path(&mut self) {
        if let Some(path) = self.paths.last_mut() {
            path.closed = true;
        }
    }

    fn fill(&mut self) {
        let shadow = self.state.shadow;
        for path in &self.paths {
            if shadow.is_visible() {
                let color = self.paint(shadow.color);
                self.fill_polygon(&path.points, vec2(shadow.offset_x, shadow.offset_y), &|_| color);
                self.draw_shadow_outline(path, &shadow);
            }
            let fill = &self.state.fill;
            self.fill_polygon(&path.points, Vec2::ZERO, &|p| {
                let user = self.to_user(p);
                self.paint(fill.color_at(user.x, user.y))
            });
        }
    }

    fn stroke(&mut self) {
        let thickness = self.state.line_width * self.scale_factor();
        let color = self.paint(self.state.stroke);
        let shadow = self.state.shadow;
        for path in &self.paths {
            if shadow.is_visible() {
                self.draw_shadow_outline(path, &shadow);
            }
            self.stroke_polyline(path, Vec2::ZERO, thickness, color);
        }
    }

    fn clip(&mut self) {
        let mut points = self.paths.iter().flat_map(|path| path.points.iter());
        let Some(first) = points.next() else {
            return;
        };
        let (min, max) = points.fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        let mut rect = (min.x, min.y, max.x - min.x, max.y - min.y);
        if let Some((x, y, w, h)) = self.state.clip {
            let left = rect.0.max(x);
            let top = rect.1.max(y);
            let right = (rect.0 + rect.2).min(x + w);
            let bottom = (rect.1 + rect.3).min(y + h);
            rect = (left, top, (right - left).max(0.0), (bottom - top).max(0.0));
        }
        self.state.clip = Some(rect);
        self.apply_clip();
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.state.fill = style;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = shadow;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    // Macroquad's default pipeline already blends source-over.
    fn set_composite(&mut self, _mode: CompositeMode) {}

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
        let scale = self.scale_factor();
        let font_size = (self.state.font.size * scale).round().max(1.0) as u16;
        let axis = self.state.transform.matrix2.x_axis;
        let rotation = axis.y.atan2(axis.x);

        let dims = measure_text(text, None, font_size, 1.0);
        let dx = match self.state.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -dims.width / 2.0,
            TextAlign::Right => -dims.width,
        };
        let dy = match self.state.baseline {
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Middle => dims.offset_y / 2.0,
            TextBaseline::Top => dims.offset_y,
        };
        let (sin, cos) = rotation.sin_cos();
        let origin = self.to_screen(x, y) + vec2(dx * cos - dy * sin, dx * sin + dy * cos);

        let color = self.paint(self.state.fill.color_at(x, y));
        let draw = |at: Vec2, color: Color| {
            draw_text_ex(
                text,
                at.x,
                at.y,
                TextParams {
                    font_size,
                    rotation,
                    color,
                    ..Default::default()
                },
            );
        };

        let shadow = self.state.shadow;
        if shadow.is_visible() {
            draw(origin + vec2(shadow.offset_x, shadow.offset_y), self.paint(shadow.color));
        }
        draw(origin, color);
        if self.state.font.bold {
            draw(origin + vec2(0.6 * cos, 0.6 * sin), color);
        }
    }
}
