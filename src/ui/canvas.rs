use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line};
use ratatui::widgets::Widget;

use crate::surface::{Stroke, StrokeCap, Surface, Transform};

/// A line resolved into surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: Stroke,
}

/// [`Surface`] that records world-space segments for a later paint pass.
///
/// Terminal cells cannot be drawn into directly while the frame is being
/// built, so drawing is split in two: render code draws into the recorder,
/// then [`TickCanvas`] paints the recorded segments with a braille marker.
#[derive(Debug, Clone)]
pub struct SegmentRecorder {
    width: f64,
    height: f64,
    background: Option<Color>,
    transform: Transform,
    stack: Vec<Transform>,
    segments: Vec<Segment>,
}

impl SegmentRecorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Recorder sized to the braille dot grid of `area` (2x4 dots per cell)
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width as f64 * 2.0, area.height as f64 * 4.0)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn canvas(&self) -> TickCanvas<'_> {
        TickCanvas { recorder: self }
    }
}

impl Surface for SegmentRecorder {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.background = Some(color);
        self.segments.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        // Unbalanced restore keeps the current transform
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.transform.rotate(degrees);
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        let (x1, y1) = self.transform.apply(x1, y1);
        let (x2, y2) = self.transform.apply(x2, y2);
        self.segments.push(Segment {
            x1,
            y1,
            x2,
            y2,
            stroke: *stroke,
        });
    }
}

/// Paints a [`SegmentRecorder`] onto the terminal
pub struct TickCanvas<'a> {
    recorder: &'a SegmentRecorder,
}

impl Widget for TickCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rec = self.recorder;
        let height = rec.height;
        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, rec.width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for seg in &rec.segments {
                    for line in stroke_lines(seg, height) {
                        ctx.draw(&line);
                    }
                }
            });
        if let Some(bg) = rec.background {
            canvas = canvas.background_color(bg);
        }
        canvas.render(area, buf);
    }
}

/// Approximate a wide stroke with parallel one-dot lines, flipping into the
/// canvas' y-up space. Round caps push both ends out by half the width.
fn stroke_lines(seg: &Segment, height: f64) -> Vec<Line> {
    let (dx, dy) = (seg.x2 - seg.x1, seg.y2 - seg.y1);
    let len = (dx * dx + dy * dy).sqrt();
    let passes = seg.stroke.width.round().max(1.0) as usize;
    let (ux, uy) = if len > f64::EPSILON {
        (dx / len, dy / len)
    } else {
        (0.0, 0.0)
    };
    let (nx, ny) = (-uy, ux);
    let ext = match seg.stroke.cap {
        StrokeCap::Round => seg.stroke.width / 2.0,
        StrokeCap::Butt => 0.0,
    };
    let (x1, y1) = (seg.x1 - ux * ext, seg.y1 - uy * ext);
    let (x2, y2) = (seg.x2 + ux * ext, seg.y2 + uy * ext);

    (0..passes)
        .map(|k| {
            let offset = k as f64 - (passes - 1) as f64 / 2.0;
            let (ox, oy) = (nx * offset, ny * offset);
            Line {
                x1: x1 + ox,
                y1: height - (y1 + oy),
                x2: x2 + ox,
                y2: height - (y2 + oy),
                color: seg.stroke.color,
            }
        })
        .collect()
}
