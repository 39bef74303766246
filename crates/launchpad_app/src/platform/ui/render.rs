use launchpad_core::{
    AppViewModel, LaunchCardView, LaunchDetailView, Theme, END_OF_LIST_TEXT, NO_MATCHES_TEXT,
    NO_VIDEO_TEXT,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::constants::*;
use super::layout::{self, fit_width, AppLayout};
use super::starfield::Starfield;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
}

/// UI-local state the renderer reads and updates.
#[derive(Debug, Default)]
pub struct Screen {
    pub mode: InputMode,
    pub list_state: ListState,
    /// Inner list area from the last draw; used for sentinel geometry.
    pub list_viewport: Rect,
    pub starfield: Starfield,
    pub frame_count: usize,
}

pub fn draw(frame: &mut Frame<'_>, view: &AppViewModel, screen: &mut Screen) {
    let palette = palette(view.theme);
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(palette.background).fg(palette.text)),
        area,
    );

    let regions = layout::split(area, view.error.is_some());
    draw_header(frame, view, regions.header, &palette);
    draw_controls(frame, view, screen, &regions, &palette);
    if let (Some(error_area), Some(error)) = (regions.error, view.error.as_deref()) {
        let line = Line::from(vec![
            Span::styled(error, Style::new().fg(palette.failure)),
            Span::styled(format!(" ({RETRY_HINT})"), Style::new().fg(palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), error_area);
    }
    draw_cards(frame, view, screen, regions.list, &palette);
    draw_status(frame, view, screen, regions.status, &palette);

    let help = if view.detail.is_some() {
        DETAIL_KEY_HELP
    } else if screen.mode == InputMode::Search {
        SEARCH_KEY_HELP
    } else {
        KEY_HELP
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::new().fg(palette.muted)),
        regions.footer,
    );

    if let Some(detail) = &view.detail {
        draw_detail(frame, detail, area, &palette);
    }
}

fn draw_header(frame: &mut Frame<'_>, view: &AppViewModel, area: Rect, palette: &Palette) {
    let title = Paragraph::new(Span::styled(
        APP_TITLE,
        Style::new().fg(palette.text).add_modifier(Modifier::BOLD),
    ));
    let indicator = match view.theme {
        Theme::Light => "☾ light [t]",
        Theme::Dark => "☀ dark [t]",
    };
    frame.render_widget(title, area);
    frame.render_widget(
        Paragraph::new(indicator)
            .style(Style::new().fg(palette.muted))
            .alignment(Alignment::Right),
        area,
    );
}

fn draw_controls(
    frame: &mut Frame<'_>,
    view: &AppViewModel,
    screen: &Screen,
    regions: &AppLayout,
    palette: &Palette,
) {
    let searching = screen.mode == InputMode::Search;
    let border = if searching { palette.accent } else { palette.border };
    let search_text = if view.search_term.is_empty() && !searching {
        Span::styled(SEARCH_PLACEHOLDER, Style::new().fg(palette.muted))
    } else {
        Span::raw(view.search_term.as_str())
    };
    frame.render_widget(
        Paragraph::new(search_text).block(
            Block::new()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(border))
                .title(" Search [/] "),
        ),
        regions.search,
    );
    if searching {
        let typed = view.search_term.chars().count() as u16;
        let max_x = regions.search.right().saturating_sub(2);
        frame.set_cursor_position(((regions.search.x + 1 + typed).min(max_x), regions.search.y + 1));
    }

    frame.render_widget(
        Paragraph::new(format!("◂ {} ▸", view.success_filter.label()))
            .alignment(Alignment::Center)
            .block(
                Block::new()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(palette.border))
                    .title(" Filter [f] "),
            ),
        regions.filter,
    );
}

fn draw_cards(
    frame: &mut Frame<'_>,
    view: &AppViewModel,
    screen: &mut Screen,
    area: Rect,
    palette: &Palette,
) {
    let block = Block::new()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(palette.border))
        .title(format!(" Launches {}/{} ", view.cards.len(), view.total_loaded));
    screen.list_viewport = block.inner(area);

    match screen.list_state.selected() {
        _ if view.cards.is_empty() => screen.list_state.select(None),
        None => screen.list_state.select(Some(0)),
        Some(index) if index >= view.cards.len() => {
            screen.list_state.select(Some(view.cards.len() - 1))
        }
        Some(_) => {}
    }

    // Room left after the highlight symbol.
    let text_width = usize::from(screen.list_viewport.width.saturating_sub(2));
    let items: Vec<ListItem<'_>> = view
        .cards
        .iter()
        .map(|card| card_item(card, text_width, palette))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(palette.highlight))
        .highlight_symbol("▌ ");
    frame.render_stateful_widget(list, area, &mut screen.list_state);

    if view.theme == Theme::Dark {
        screen
            .starfield
            .render(screen.list_viewport, frame.buffer_mut(), palette.star);
    }
}

fn card_item<'a>(card: &'a LaunchCardView, width: usize, palette: &Palette) -> ListItem<'a> {
    let status = if card.launch_success {
        Span::styled("Success", Style::new().fg(palette.success))
    } else {
        Span::styled("Failure", Style::new().fg(palette.failure))
    };
    let patch = match &card.mission_patch_small {
        Some(url) => Span::styled(format!("Patch: {url}"), Style::new().fg(palette.muted)),
        None => Span::styled("No image", Style::new().fg(palette.muted)),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                card.mission_name.as_str(),
                Style::new().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{}", card.flight_number), Style::new().fg(palette.muted)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("Launch Year: {}   Status: ", card.launch_year),
                Style::new().fg(palette.muted),
            ),
            status,
        ]),
        Line::from(fit_width(&card.summary, width)),
        Line::from(patch),
    ];
    debug_assert_eq!(lines.len(), usize::from(CARD_HEIGHT));
    ListItem::new(Text::from(lines))
}

fn draw_status(frame: &mut Frame<'_>, view: &AppViewModel, screen: &Screen, area: Rect, palette: &Palette) {
    let line = if view.show_spinner {
        let spinner = SPINNER_FRAMES[screen.frame_count % SPINNER_FRAMES.len()];
        Line::from(vec![
            Span::styled(spinner, Style::new().fg(palette.accent)),
            Span::raw(" "),
            Span::styled(LOADING_TEXT, Style::new().fg(palette.muted)),
        ])
    } else if view.show_no_matches {
        Line::styled(NO_MATCHES_TEXT, Style::new().fg(palette.muted))
    } else if view.show_end_of_list {
        Line::styled(END_OF_LIST_TEXT, Style::new().fg(palette.muted))
    } else {
        Line::styled(
            format!(
                "Showing {} of {} launches · next page {}",
                view.cards.len(),
                view.total_loaded,
                view.page
            ),
            Style::new().fg(palette.muted),
        )
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_detail(frame: &mut Frame<'_>, detail: &LaunchDetailView, area: Rect, palette: &Palette) {
    let modal = layout::centered(area, 70, 70);
    frame.render_widget(Clear, modal);

    let video = match &detail.video_embed_url {
        Some(url) => Line::from(vec![
            Span::styled("Video: ", Style::new().fg(palette.muted)),
            Span::styled(url.as_str(), Style::new().fg(palette.accent)),
        ]),
        None => Line::styled(NO_VIDEO_TEXT, Style::new().fg(palette.muted)),
    };
    let status = if detail.launch_success {
        Span::styled("✔ Success", Style::new().fg(palette.success))
    } else {
        Span::styled("✘ Failure", Style::new().fg(palette.failure))
    };
    let text = Text::from(vec![
        video,
        Line::raw(""),
        Line::styled(
            format!("Launch Year: {}", detail.launch_year),
            Style::new().fg(palette.muted),
        ),
        Line::from(vec![
            Span::styled("Launch Status: ", Style::new().fg(palette.muted)),
            status,
        ]),
        Line::raw(""),
        Line::raw(detail.details.as_str()),
    ]);

    let block = Block::new()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(palette.accent))
        .style(Style::new().bg(palette.background).fg(palette.text))
        .title(Span::styled(
            format!(" {} ", detail.mission_name),
            Style::new().add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Close [Esc] ").right_aligned());
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        modal,
    );
}
