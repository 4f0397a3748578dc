use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_BASE, BG_PANEL, NOT_FOUND, TEXT_DIM,
    TEXT_MAIN,
};
use crate::action::Action;
use crate::format;
use crate::state::{AppState, DetailState, PokemonDetail, Route};

/// Props for PokemonDetailView - read-only view of state
pub struct PokemonDetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Detail page for one Pokémon; renders nothing while the list route is active
#[derive(Default)]
pub struct PokemonDetailView;

impl Component<Action> for PokemonDetailView {
    type Props<'a> = PokemonDetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.state.is_detail_open() {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        let page = i16::try_from(props.state.detail_viewport().1).unwrap_or(i16::MAX);
        let scrollable = props.state.current_detail().is_some();
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => Some(Action::DetailClose),
            KeyCode::Down | KeyCode::Char('j') if scrollable => Some(Action::DetailScroll(1)),
            KeyCode::Up | KeyCode::Char('k') if scrollable => Some(Action::DetailScroll(-1)),
            KeyCode::PageDown if scrollable => Some(Action::DetailScroll(page)),
            KeyCode::PageUp if scrollable => Some(Action::DetailScroll(-page)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: PokemonDetailViewProps<'_>) {
        let Route::Detail { id, view } = &props.state.route else {
            return;
        };
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let title = match view {
            DetailState::Loaded(detail) => format::format_name(&detail.name).to_uppercase(),
            _ => format!("#{id}"),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let paragraph = match view {
            DetailState::Loading => Paragraph::new(format!("Loading Pokémon {id}..."))
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM)),
            DetailState::NotFound => Paragraph::new(not_found_text(id)).alignment(Alignment::Center),
            DetailState::Loaded(detail) => {
                let limit = detail_rows(detail, inner.width).saturating_sub(inner.height);
                Paragraph::new(detail_text(detail))
                    .wrap(Wrap { trim: false })
                    .scroll((props.state.detail_scroll.min(limit), 0))
            }
        };
        frame.render_widget(paragraph, inner);

        let mut hints = Vec::with_capacity(3);
        if matches!(view, DetailState::Loaded(_)) {
            hints.push(StatusBarHint::new("j/k", "scroll"));
        }
        hints.push(StatusBarHint::new("Esc", "back"));
        hints.push(StatusBarHint::new("q", "quit"));
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn not_found_text(id: &str) -> Text<'static> {
    Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            NOT_FOUND,
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Nothing matches \"{id}\"."),
            Style::default().fg(TEXT_DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to go back",
            Style::default().fg(TEXT_DIM),
        )),
    ])
}

fn label(name: &str) -> Span<'static> {
    Span::styled(
        format!("{name}: "),
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
    )
}

fn heading(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        name.to_string(),
        Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
    ))
}

fn reference(value: Option<&String>) -> Span<'static> {
    match value {
        Some(url) => Span::raw(url.clone()),
        None => Span::styled("--", Style::default().fg(TEXT_DIM)),
    }
}

pub fn detail_text(detail: &PokemonDetail) -> Text<'static> {
    let mut lines = vec![
        Line::from(vec![label("Pokédex ID"), Span::raw(detail.id.to_string())]),
        Line::from(vec![
            label("Base Experience"),
            Span::raw(format::base_experience(detail.base_experience)),
        ]),
        Line::from(vec![
            label("Height"),
            Span::raw(format::format_height(detail.height)),
        ]),
        Line::from(""),
        heading("Abilities"),
    ];

    lines.extend(detail.abilities.iter().map(|ability| {
        let style = if ability.is_hidden {
            Style::default()
                .fg(TEXT_DIM)
                .add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(ACCENT_GOLD)
        };
        Line::from(Span::styled(
            format!("  {}", format::ability_label(ability)),
            style,
        ))
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        label("Types"),
        Span::raw(detail.types.join(" / ")),
    ]));

    lines.push(Line::from(""));
    lines.push(heading("Stats"));
    lines.extend(
        detail
            .stats
            .iter()
            .map(|stat| Line::from(format!("  {}", format::stat_line(stat)))),
    );

    lines.push(Line::from(""));
    lines.push(heading("Moves"));
    lines.push(Line::from(format!("  {}", format::moves_preview(&detail.moves))));

    lines.push(Line::from(""));
    lines.push(heading("Media"));
    lines.push(Line::from(vec![
        label("  Sprite"),
        reference(detail.sprites.front_default.as_ref()),
    ]));
    lines.push(Line::from(vec![
        label("  Shiny"),
        reference(detail.sprites.front_shiny.as_ref()),
    ]));
    lines.push(Line::from(vec![
        label("  Cry"),
        reference(detail.cries.latest.as_ref()),
    ]));
    if detail.cries.legacy.is_some() {
        lines.push(Line::from(vec![
            label("  Legacy cry"),
            reference(detail.cries.legacy.as_ref()),
        ]));
    }

    Text::from(lines)
}

/// Rows `detail_text` occupies when word-wrapped to `width` columns
///
/// Every word is counted with a trailing space, so the estimate errs on the
/// tall side and the last line stays reachable.
pub fn detail_rows(detail: &PokemonDetail, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = detail_text(detail)
        .lines
        .iter()
        .map(|line| wrapped_rows(line, width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn wrapped_rows(line: &Line<'_>, width: usize) -> usize {
    let content: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
    let mut rows = 1;
    let mut used = 0;
    for word in content.split(' ') {
        let len = word.chars().count();
        if used > 0 && used + len > width {
            rows += 1;
            used = 0;
        }
        if len > width {
            rows += (len - 1) / width;
            used = len % width;
        } else {
            used += len;
        }
        used += 1;
    }
    rows
}
