pub mod canvas;
pub mod hints;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::animation::Invalidate;
use crate::app::App;
use canvas::SegmentRecorder;

/// Top-level draw: tick row on top, hint bar underneath.
///
/// Drawing is also what advances the animation, one frame per call.
pub fn draw<I: Invalidate>(f: &mut Frame, app: &mut App<I>) {
    let hint_height = if app.show_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(hint_height)])
        .split(f.area());

    let mut surface = SegmentRecorder::for_area(chunks[0]);
    app.controller.render(&mut surface);
    f.render_widget(surface.canvas(), chunks[0]);

    if app.show_hints {
        hints::render(f, app, chunks[1]);
    }
}
