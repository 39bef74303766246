use std::borrow::Cow;

use ratatui::layout::{Constraint, Flex, Layout, Rect};

const CARD_ROWS_MIN: u16 = 3;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub search: Rect,
    pub filter: Rect,
    pub error: Option<Rect>,
    pub list: Rect,
    pub status: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect, show_error: bool) -> AppLayout {
    let error_height = u16::from(show_error);
    let [header, controls, error, list, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(error_height),
        Constraint::Min(CARD_ROWS_MIN),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let [search, filter] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(26)]).areas(controls);

    AppLayout {
        header,
        search,
        filter,
        error: show_error.then_some(error),
        list,
        status,
        footer,
    }
}

/// Centered rectangle taking the given percentages of `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Visible fraction of the card at `index` in a list scrolled to `offset`
/// whose viewport is `viewport_height` lines tall.
pub fn visible_ratio(index: usize, offset: usize, card_height: u16, viewport_height: u16) -> f32 {
    if index < offset || card_height == 0 {
        return 0.0;
    }
    let top = (index - offset) as u64 * u64::from(card_height);
    let viewport = u64::from(viewport_height);
    if top >= viewport {
        return 0.0;
    }
    let shown = (viewport - top).min(u64::from(card_height));
    shown as f32 / f32::from(card_height)
}

/// Cuts `text` to at most `width` characters, ending in `…` when shortened.
pub fn fit_width(text: &str, width: usize) -> Cow<'_, str> {
    if text.chars().count() <= width {
        return Cow::Borrowed(text);
    }
    let Some(keep) = width.checked_sub(1) else {
        return Cow::Borrowed("");
    };
    let mut cut: String = text.chars().take(keep).collect();
    cut.push('…');
    Cow::Owned(cut)
}
