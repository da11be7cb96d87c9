use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::sampler::RenderSink;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::{Theme, ThemeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub sample_now: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            sample_now: parse_key(&kb.sample_now).unwrap_or(KeyCode::Char('r')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }
}

/// Terminal presentation state. Receives snapshots as a [`RenderSink`] and is
/// drawn by [`crate::ui::draw`].
pub struct App {
    pub running: bool,
    pub snapshot: Arc<Snapshot>,
    pub input_mode: InputMode,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    pub interval_ms: u64,
    pub history_capacity: usize,
    pub disk_path: PathBuf,
    sample_requested: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let theme_kind = ThemeKind::from_config_str(&config.ui.theme);
        App {
            running: true,
            snapshot: Arc::new(Snapshot::empty()),
            input_mode: InputMode::Normal,
            theme_kind,
            theme: Theme::new(theme_kind),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            interval_ms: config.sampler.interval_ms,
            history_capacity: config.sampler.history_capacity,
            disk_path: config.sampler.disk_path.clone(),
            sample_requested: false,
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        let kb = &self.keybinds;
        match self.input_mode {
            InputMode::Help => {
                if key.code == kb.help || key.code == KeyCode::Esc {
                    Action::ToggleHelp
                } else if key.code == kb.quit {
                    Action::Quit
                } else {
                    Action::None
                }
            }
            InputMode::Normal => {
                let code = key.code;
                if code == kb.quit {
                    Action::Quit
                } else if code == kb.sample_now {
                    Action::SampleNow
                } else if code == kb.cycle_theme {
                    Action::CycleTheme
                } else if code == kb.help {
                    Action::ToggleHelp
                } else {
                    Action::None
                }
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SampleNow => self.sample_requested = true,
            Action::CycleTheme => {
                self.theme_kind = self.theme_kind.next();
                self.theme = Theme::new(self.theme_kind);
            }
            Action::ToggleHelp => {
                self.input_mode = match self.input_mode {
                    InputMode::Normal => InputMode::Help,
                    InputMode::Help => InputMode::Normal,
                };
            }
            Action::None => {}
        }
    }

    /// Returns and clears a pending "sample now" request.
    pub fn take_sample_request(&mut self) -> bool {
        std::mem::take(&mut self.sample_requested)
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let kb = &self.keybinds;
        vec![
            (key_label(kb.quit), "Quit"),
            (key_label(kb.sample_now), "Sample now"),
            (key_label(kb.cycle_theme), "Cycle theme"),
            (key_label(kb.help), "Toggle help"),
            ("Ctrl+C".to_string(), "Quit"),
        ]
    }
}

impl RenderSink for App {
    fn render(&mut self, snapshot: Arc<Snapshot>) {
        self.snapshot = snapshot;
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Sampler;
    use crate::system::metric::Metric;
    use crate::system::source::MetricReading;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_keys_map_to_actions() {
        let app = App::new(&Config::default());
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.map_key(press(KeyCode::Char('r'))), Action::SampleNow);
        assert_eq!(app.map_key(press(KeyCode::Char('t'))), Action::CycleTheme);
        assert_eq!(app.map_key(press(KeyCode::Char('?'))), Action::ToggleHelp);
        assert_eq!(app.map_key(press(KeyCode::Char('z'))), Action::None);
        assert_eq!(
            app.map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn configured_keybinds_override_defaults() {
        let mut config = Config::default();
        config.keybinds.quit = "x".to_string();
        config.keybinds.sample_now = "F5".to_string();
        let app = App::new(&config);
        assert_eq!(app.map_key(press(KeyCode::Char('x'))), Action::Quit);
        assert_eq!(app.map_key(press(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.map_key(press(KeyCode::F(5))), Action::SampleNow);
    }

    #[test]
    fn help_mode_only_closes_or_quits() {
        let mut app = App::new(&Config::default());
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help());
        assert_eq!(app.map_key(press(KeyCode::Char('r'))), Action::None);
        assert_eq!(app.map_key(press(KeyCode::Esc)), Action::ToggleHelp);
        app.dispatch(Action::ToggleHelp);
        assert!(!app.show_help());
    }

    #[test]
    fn sample_request_is_taken_once() {
        let mut app = App::new(&Config::default());
        assert!(!app.take_sample_request());
        app.dispatch(Action::SampleNow);
        assert!(app.take_sample_request());
        assert!(!app.take_sample_request());
    }

    #[test]
    fn quit_and_theme_actions() {
        let mut app = App::new(&Config::default());
        app.dispatch(Action::CycleTheme);
        assert_eq!(app.theme.name, "light");
        app.dispatch(Action::Quit);
        assert!(!app.running);
    }

    #[test]
    fn render_replaces_snapshot() {
        let mut app = App::new(&Config::default());
        let mut sampler = Sampler::new(4);
        sampler.try_begin();
        let snapshot = sampler.complete(MetricReading {
            cpu_percent: Ok(42.0),
            ram_percent: Ok(10.0),
            net_bytes_total: Ok(1),
            disk_percent: Ok(55.0),
        });
        app.render(snapshot);
        assert_eq!(app.snapshot.tick(), 1);
        assert_eq!(app.snapshot.latest(Metric::Cpu), 42.0);
    }

    #[test]
    fn help_entries_show_configured_keys() {
        let app = App::new(&Config::default());
        let entries = app.help_entries();
        assert_eq!(entries[0], ("q".to_string(), "Quit"));
        assert_eq!(entries[1], ("r".to_string(), "Sample now"));
    }
}
