use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::animation::{AnimationDriver, Invalidate};
use crate::config::{Config, KeysConfig};
use crate::event::Event;
use crate::renderer::TickController;
use crate::ui::theme::Theme;

// ── Application State ─────────────────────────────────────────────────

pub struct App<I> {
    pub controller: TickController<I>,
    pub keys: KeysConfig,
    pub show_hints: bool,
    pub mouse_support: bool,
    pub should_quit: bool,

    /// Set by anything that needs a repaint; cleared when the main loop draws
    needs_redraw: bool,
}

impl<I: Invalidate> App<I> {
    pub fn new(target: I, config: &Config) -> Self {
        let driver = AnimationDriver::new(target, config.frame_interval());
        Self {
            controller: TickController::new(driver, Theme::from_config(&config.appearance)),
            keys: config.keys.clone(),
            show_hints: config.appearance.show_hints,
            mouse_support: config.mouse_support,
            should_quit: false,
            // First frame
            needs_redraw: true,
        }
    }

    /// Handle an event from the main loop
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Press(column, row) => {
                if self.mouse_support {
                    debug!(column, row, "pointer press");
                    self.tap();
                }
            }
            Event::Frame => {
                self.controller.frame_due();
                self.needs_redraw = true;
            }
            Event::Redraw => {
                self.needs_redraw = true;
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.needs_redraw = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ if self.keys.is_quit(&key) => self.should_quit = true,
            _ if self.keys.is_tap(&key) => self.tap(),
            _ => {}
        }
    }

    /// Start the next sweep. The driver posts its own redraw when it wakes.
    fn tap(&mut self) {
        self.controller.handle_tap();
    }

    /// Returns whether a draw is pending and clears the flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::driver::tests::CountingInvalidate;
    use crate::tick::Direction;
    use crate::ui;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> App<CountingInvalidate> {
        App::new(CountingInvalidate::default(), &Config::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_first_frame_is_pending() {
        let mut app = app();
        assert!(app.take_redraw());
        assert!(!app.take_redraw());
    }

    #[test]
    fn test_tap_key_wakes_driver() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char(' ')));
        assert!(app.controller.driver().is_active());
        assert_eq!(app.controller.driver().target().immediate.get(), 1);
    }

    #[test]
    fn test_mouse_press_respects_config() {
        let mut config = Config::default();
        config.mouse_support = false;
        let mut app = App::new(CountingInvalidate::default(), &config);
        app.handle_event(Event::Press(3, 3));
        assert!(!app.controller.driver().is_active());

        let mut app = self::app();
        app.handle_event(Event::Press(3, 3));
        assert!(app.controller.driver().is_active());
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            app.handle_event(key(code));
            assert!(app.should_quit);
        }
        let mut app = app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[test]
    fn test_redraw_and_resize_mark_dirty() {
        let mut app = app();
        app.take_redraw();
        app.handle_event(Event::Redraw);
        assert!(app.take_redraw());
        app.handle_event(Event::Resize(80, 24));
        assert!(app.take_redraw());
        app.handle_event(Event::Frame);
        assert!(app.take_redraw());
    }

    #[test]
    fn test_draw_loop_runs_one_sweep() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");

        app.handle_event(key(KeyCode::Enter));
        let mut draws = 0;
        while app.controller.driver().is_active() {
            terminal
                .draw(|f| ui::draw(f, &mut app))
                .expect("draw");
            app.handle_event(Event::Frame);
            draws += 1;
            assert!(draws < 100);
        }

        assert_eq!(draws, 21);
        assert_eq!(app.controller.chain().current().index(), 1);
        assert_eq!(app.controller.chain().direction(), Direction::Forward);
    }

    /// One pass of the main loop's draw step. Returns whether the draw
    /// advanced the animation.
    fn draw_if_pending(
        app: &mut App<CountingInvalidate>,
        terminal: &mut Terminal<TestBackend>,
    ) -> bool {
        if !app.take_redraw() {
            return false;
        }
        let scheduled = app.controller.driver().target().delayed.borrow().len();
        terminal.draw(|f| ui::draw(f, app)).expect("draw");
        app.controller.driver().target().delayed.borrow().len() > scheduled
    }

    #[test]
    fn test_quick_retap_keeps_one_frame_in_flight() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
        let delayed = app.controller.driver().target().delayed.clone();
        let mut delivered = 0;

        for sweep in 0..3 {
            // tap lands while the previous sweep's trailing frame is in flight
            app.handle_event(key(KeyCode::Enter));
            app.handle_event(Event::Resize(60, 20));
            let mut frames = 0;
            if draw_if_pending(&mut app, &mut terminal) {
                frames += 1;
            }

            while app.controller.driver().is_active() {
                assert!(delayed.borrow().len() - delivered <= 1);
                app.handle_event(Event::Frame);
                delivered += 1;
                if draw_if_pending(&mut app, &mut terminal) {
                    frames += 1;
                }
                assert!(delivered < 200);
            }

            assert_eq!(frames, 21, "sweep {sweep}");
            assert_eq!(delayed.borrow().len() - delivered, 1);
        }
        assert_eq!(app.controller.chain().current().index(), 3);
    }

    #[test]
    fn test_hint_bar_shows_cursor() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).expect("terminal");
        terminal.draw(|f| ui::draw(f, &mut app)).expect("draw");

        let buffer = terminal.backend().buffer();
        let last_row: String = (0..60u16)
            .map(|x| buffer[(x, 9u16)].symbol().to_string())
            .collect();
        assert!(last_row.contains("tick 1/5"));
        assert!(last_row.contains("Tap"));
    }
}
