use std::time::Duration;

use launchpad_core::Theme;
use ratatui::style::Color;

pub const APP_TITLE: &str = "SpaceX Launches";
pub const SEARCH_PLACEHOLDER: &str = "Search missions...";
pub const LOADING_TEXT: &str = "Loading launches...";
pub const RETRY_HINT: &str = "press r to retry";

/// Lines per card in the launch list; every card has the same height.
pub const CARD_HEIGHT: u16 = 4;
pub const TICK_RATE: Duration = Duration::from_millis(100);
pub const STAR_COUNT: usize = 120;
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const KEY_HELP: &str =
    "j/k move  Enter details  / search  f filter  t theme  r retry  q quit";
pub const SEARCH_KEY_HELP: &str = "type to search  Enter/Esc done  Backspace delete";
pub const DETAIL_KEY_HELP: &str = "Esc/Enter close";

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight: Color,
    pub success: Color,
    pub failure: Color,
    pub star: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(255, 255, 255),
    text: Color::Rgb(17, 24, 39),
    muted: Color::Rgb(107, 114, 128),
    accent: Color::Rgb(37, 99, 235),
    border: Color::Rgb(209, 213, 219),
    highlight: Color::Rgb(229, 231, 235),
    success: Color::Rgb(34, 197, 94),
    failure: Color::Rgb(239, 68, 68),
    star: Color::Rgb(0, 0, 0),
};

const DARK: Palette = Palette {
    background: Color::Rgb(17, 24, 39),
    text: Color::Rgb(243, 244, 246),
    muted: Color::Rgb(156, 163, 175),
    accent: Color::Rgb(96, 165, 250),
    border: Color::Rgb(55, 65, 81),
    highlight: Color::Rgb(31, 41, 55),
    success: Color::Rgb(34, 197, 94),
    failure: Color::Rgb(248, 113, 113),
    star: Color::Rgb(255, 255, 255),
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}
