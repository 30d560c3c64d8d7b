use crate::surface::{Stroke, Surface};
use crate::ui::theme::Theme;

use super::NODES;

/// Draw the tick icon for node `index` at animation progress `scale`.
///
/// Icons sit on the horizontal midline, `width / (NODES + 1)` apart. Each is
/// two strokes hinged at the icon centre: the short one swings out during
/// the first half of the sweep, the long one during the second.
pub fn draw_tick<S: Surface + ?Sized>(surface: &mut S, index: usize, scale: f32, theme: &Theme) {
    let w = surface.width();
    let h = surface.height();
    let gap = w / (NODES as f64 + 1.0);
    let size = gap / 3.0;
    let stroke = Stroke {
        width: w.min(h) / 60.0,
        cap: theme.cap,
        color: theme.tick,
    };
    let scale = scale as f64;

    surface.save();
    surface.translate(gap + index as f64 * gap, h / 2.0);
    for j in 0..2 {
        let jf = j as f64;
        let sf = 1.0 - 2.0 * jf;
        let sc = (scale - 0.5 * jf).clamp(0.0, 0.5) * 2.0;
        surface.save();
        surface.rotate(-(45.0 + 15.0 * jf) * sc * sf);
        surface.draw_line(0.0, 0.0, 0.0, -size / 2.0 * (1.0 + jf), &stroke);
        surface.restore();
    }
    surface.restore();
}
