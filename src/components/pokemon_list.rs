use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use super::{
    Component, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_BASE, BG_HIGHLIGHT, BG_PANEL,
    EMPTY_STATE, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, PokemonSummary};

pub struct PokemonListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root catalog view: title, search line, filtered list and status bar
pub struct PokemonList {
    list: SelectList,
    status_bar: StatusBar,
}

impl Default for PokemonList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl PokemonList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for PokemonList {
    type Props<'a> = PokemonListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Enter => vec![Action::DetailOpenSelected],
            KeyCode::Char('/') => vec![Action::SearchStart],
            KeyCode::Char('r') if props.state.list.is_failed() => vec![Action::ListRetry],
            KeyCode::PageDown => vec![Action::ListPage(1)],
            KeyCode::PageUp => vec![Action::ListPage(-1)],
            _ => {
                let items = list_items(props.state);
                if items.is_empty() {
                    return Vec::new();
                }
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: list_behavior(),
                    on_select: Action::ListSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Length(4), // Title + search
            Constraint::Min(3),    // List
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        render_header(frame, chunks[0], state);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEMON")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(if props.is_focused {
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT_DIM)
            });
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        match &state.list {
            DataResource::Empty | DataResource::Loading => {
                render_message(frame, inner, Text::from("Loading Pokémon..."), TEXT_DIM);
            }
            DataResource::Failed(error) => {
                let text = Text::from(vec![
                    Line::from(Span::styled(
                        "Failed to load Pokémon",
                        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(error.clone()),
                    Line::from(""),
                    Line::from("Press r to retry"),
                ]);
                render_message(frame, inner, text, TEXT_MAIN);
            }
            DataResource::Loaded(_) if state.filtered_len() == 0 => {
                render_message(frame, inner, Text::from(EMPTY_STATE), TEXT_DIM);
            }
            DataResource::Loaded(_) => {
                let items = list_items(state);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: props.is_focused,
                    style: list_style(),
                    behavior: list_behavior(),
                    on_select: Action::ListSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.render(frame, inner, list_props);
            }
        }

        render_status(&mut self.status_bar, frame, chunks[2], state);
    }
}

/// Key handling while the search line is active
pub fn search_input_action(event: &EventKind) -> Option<Action> {
    let EventKind::Key(key) = event else {
        return None;
    };
    match key.code {
        KeyCode::Esc => Some(Action::SearchCancel),
        KeyCode::Enter => Some(Action::SearchSubmit),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::SearchInput(ch))
        }
        _ => None,
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let search_style = if state.search.active {
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT_TEAL)
    };
    let text = Text::from(vec![
        Line::from(Span::styled(
            "Pokédex Explorer",
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(TEXT_DIM)),
            Span::styled(search, search_style),
        ]),
    ]);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(TEXT_DIM))
        .style(Style::default().bg(BG_BASE).fg(TEXT_MAIN));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_message(frame: &mut Frame, area: Rect, text: Text<'static>, color: ratatui::style::Color) {
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color));
    frame.render_widget(paragraph, area);
}

fn render_status(status_bar: &mut StatusBar, frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.search.active {
        vec![
            StatusBarHint::new("Enter", "apply"),
            StatusBarHint::new("Esc", "clear"),
            StatusBarHint::new("Bksp", "delete"),
        ]
    } else if state.list.is_failed() {
        vec![
            StatusBarHint::new("r", "retry"),
            StatusBarHint::new("q", "quit"),
        ]
    } else {
        vec![
            StatusBarHint::new("j/k", "move"),
            StatusBarHint::new("Enter", "open"),
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("q", "quit"),
        ]
    };
    let count = match &state.list {
        DataResource::Loaded(entries) => format!("{}/{}", state.filtered_len(), entries.len()),
        DataResource::Failed(_) => "error".to_string(),
        DataResource::Empty | DataResource::Loading => "loading".to_string(),
    };
    let status_items = [StatusBarItem::span(Span::styled(
        count,
        Style::default().fg(ACCENT_GOLD),
    ))];

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items),
        style: StatusBarStyle::default(),
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn list_items(state: &AppState) -> Vec<Line<'static>> {
    state.filtered().map(list_line).collect()
}

fn list_line(entry: &PokemonSummary) -> Line<'static> {
    let number = match entry.id {
        Some(id) => format!("#{id:04}"),
        None => "  -- ".to_string(),
    };
    Line::from(vec![
        Span::styled(number, Style::default().fg(TEXT_DIM)),
        Span::raw(" "),
        Span::raw(entry.name.clone()),
    ])
}

fn list_behavior() -> SelectListBehavior {
    SelectListBehavior {
        show_scrollbar: true,
        wrap_navigation: false,
    }
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}
