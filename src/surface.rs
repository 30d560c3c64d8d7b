use ratatui::style::Color;
use serde::Deserialize;

/// Stroke end style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    /// Ends flush with the endpoints
    Butt,
    /// Ends extend half the stroke width past the endpoints
    #[default]
    Round,
}

/// Line styling passed to [`Surface::draw_line`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub cap: StrokeCap,
    pub color: Color,
}

/// A 2D drawing context with a save/restore transform stack.
///
/// Coordinates are y-down with the origin at the top-left corner; positive
/// rotation turns clockwise on screen.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Fill the whole surface, discarding anything drawn so far
    fn clear(&mut self, color: Color);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, degrees: f64);

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke);
}

/// Affine transform `[a c e; b d f]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    pub fn rotate(&mut self, degrees: f64) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}
