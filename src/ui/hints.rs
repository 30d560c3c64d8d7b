use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::animation::Invalidate;
use crate::app::App;

/// Render the bottom bar: keybindings on the left, chain cursor on the right
pub fn render<I: Invalidate>(f: &mut Frame, app: &App<I>, area: Rect) {
    let theme = app.controller.theme();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut keys = vec![(app.keys.tap_label(), "Tap"), (app.keys.quit.as_str(), "Quit")];
    if app.mouse_support {
        keys.insert(1, ("click", "Tap"));
    }
    let key_spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), theme.hint_key),
                Span::styled(format!("{} ", desc), theme.hint_desc),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(key_spans)).style(theme.hint_desc),
        chunks[0],
    );

    let chain = app.controller.chain();
    let status = Line::from(vec![
        Span::styled(
            format!(" tick {}/{} ", chain.current().index() + 1, chain.len()),
            theme.hint_desc,
        ),
        Span::styled(format!("{} ", chain.direction()), theme.hint_key),
    ]);
    f.render_widget(
        Paragraph::new(status)
            .style(theme.hint_desc)
            .alignment(Alignment::Right),
        chunks[1],
    );
}
