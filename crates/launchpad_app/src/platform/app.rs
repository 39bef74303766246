use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use launchpad_core::{update, AppState, AppViewModel, Msg};
use launchpad_engine::EngineHandle;
use launchpad_logging::{launch_debug, launch_info};
use ratatui::DefaultTerminal;

use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::persistence::{RonThemeStore, ThemeStore};
use super::ui::constants::{CARD_HEIGHT, STAR_COUNT, TICK_RATE};
use super::ui::layout::visible_ratio;
use super::ui::render::{self, InputMode, Screen};
use super::ui::starfield::Starfield;

const PAGE_JUMP: isize = 5;

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILENAME))?
        .with_env(|key| std::env::var(key).ok());
    logging::initialize(&config.log_file, config.level());
    launch_info!("launchpad starting against {}", config.api_url);

    let store = RonThemeStore::new(config.state_dir.clone());
    let theme = store.load();
    let engine = EngineHandle::new(config.fetch_settings()).context("starting fetch engine")?;
    let runner = EffectRunner::new(engine, Box::new(store));

    let mut app = App::new(AppState::with_theme(theme), runner);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    launch_info!("launchpad stopped");
    result
}

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Send(Msg),
    MoveBy(isize),
    Top,
    Bottom,
    StartSearch,
    StopSearch,
    Quit,
    Nothing,
}

struct App {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    screen: Screen,
    /// Last `(generation, ratio)` reported for the sentinel card.
    last_sentinel: Option<(u64, f32)>,
    needs_redraw: bool,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        let view = state.view();
        Self {
            state,
            view,
            runner,
            screen: Screen {
                starfield: Starfield::new(STAR_COUNT, &mut rand::rng()),
                ..Screen::default()
            },
            last_sentinel: None,
            needs_redraw: true,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        self.dispatch(Msg::Mounted);
        let result = self.event_loop(terminal);
        self.dispatch(Msg::SessionEnded);
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();
        while !self.should_quit {
            for msg in self.runner.poll() {
                self.dispatch(msg);
            }

            if self.needs_redraw {
                terminal
                    .draw(|frame| render::draw(frame, &self.view, &mut self.screen))
                    .context("drawing frame")?;
                self.needs_redraw = false;
                self.report_sentinel();
            }

            let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(..) => self.needs_redraw = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                self.on_tick();
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.run(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let selected = self.screen.list_state.selected();
        match map_key(self.screen.mode, &self.view, selected, key) {
            Action::Send(msg) => self.dispatch(msg),
            Action::MoveBy(delta) => self.select(step(selected, delta, self.view.cards.len())),
            Action::Top => self.select(step(None, 0, self.view.cards.len())),
            Action::Bottom => self.select(self.view.cards.len().checked_sub(1)),
            Action::StartSearch => self.set_mode(InputMode::Search),
            Action::StopSearch => self.set_mode(InputMode::Browse),
            Action::Quit => self.should_quit = true,
            Action::Nothing => {}
        }
    }

    fn select(&mut self, index: Option<usize>) {
        self.screen.list_state.select(index);
        self.needs_redraw = true;
    }

    fn set_mode(&mut self, mode: InputMode) {
        self.screen.mode = mode;
        self.needs_redraw = true;
    }

    fn on_tick(&mut self) {
        self.screen.frame_count = self.screen.frame_count.wrapping_add(1);
        if self.view.theme.is_dark() {
            self.screen.starfield.advance();
            self.needs_redraw = true;
        }
        if self.view.show_spinner {
            self.needs_redraw = true;
        }
    }

    /// Tells the core how much of the sentinel card the last frame showed.
    fn report_sentinel(&mut self) {
        let (last, msg) = sentinel_report(
            &self.view,
            self.screen.list_state.offset(),
            self.screen.list_viewport.height,
            self.last_sentinel,
        );
        self.last_sentinel = last;
        if let Some(msg) = msg {
            launch_debug!("sentinel report {:?} for {:?}", msg, last);
            self.dispatch(msg);
        }
    }
}

/// Visibility of the bound sentinel card in a list scrolled to `offset`.
///
/// Returns the `(generation, ratio)` pair to remember and, when that pair
/// differs from `last`, the message to send.
fn sentinel_report(
    view: &AppViewModel,
    offset: usize,
    viewport_height: u16,
    last: Option<(u64, f32)>,
) -> (Option<(u64, f32)>, Option<Msg>) {
    let Some(sentinel) = view.sentinel else {
        return (None, None);
    };
    let ratio = view
        .cards
        .iter()
        .position(|card| card.flight_number == sentinel.flight_number)
        .map_or(0.0, |index| visible_ratio(index, offset, CARD_HEIGHT, viewport_height));

    let report = (sentinel.generation, ratio);
    if last == Some(report) {
        return (last, None);
    }
    let msg = Msg::SentinelVisibility {
        flight_number: sentinel.flight_number,
        ratio,
    };
    (Some(report), Some(msg))
}

fn map_key(mode: InputMode, view: &AppViewModel, selected: Option<usize>, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if view.detail.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::Send(Msg::DetailClosed),
            _ => Action::Nothing,
        };
    }

    match mode {
        InputMode::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::StopSearch,
            KeyCode::Backspace => {
                let mut term = view.search_term.clone();
                match term.pop() {
                    Some(_) => Action::Send(Msg::SearchChanged(term)),
                    None => Action::Nothing,
                }
            }
            KeyCode::Char(c) => {
                let mut term = view.search_term.clone();
                term.push(c);
                Action::Send(Msg::SearchChanged(term))
            }
            _ => Action::Nothing,
        },
        InputMode::Browse => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveBy(1),
            KeyCode::Char('k') | KeyCode::Up => Action::MoveBy(-1),
            KeyCode::PageDown => Action::MoveBy(PAGE_JUMP),
            KeyCode::PageUp => Action::MoveBy(-PAGE_JUMP),
            KeyCode::Char('g') | KeyCode::Home => Action::Top,
            KeyCode::Char('G') | KeyCode::End => Action::Bottom,
            KeyCode::Enter => selected
                .and_then(|index| view.cards.get(index))
                .map_or(Action::Nothing, |card| {
                    Action::Send(Msg::RecordSelected {
                        flight_number: card.flight_number,
                    })
                }),
            KeyCode::Char('/') => Action::StartSearch,
            KeyCode::Esc if !view.search_term.is_empty() => {
                Action::Send(Msg::SearchChanged(String::new()))
            }
            KeyCode::Char('f') => Action::Send(Msg::SuccessFilterCycled),
            KeyCode::Char('t') => Action::Send(Msg::ThemeToggled),
            KeyCode::Char('r') => Action::Send(Msg::RetryRequested),
            _ => Action::Nothing,
        },
    }
}

/// Moves a list selection by `delta`, clamped to `len` entries.
fn step(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let from = current.unwrap_or(0).min(len - 1);
    Some(from.saturating_add_signed(delta).min(len - 1))
}
