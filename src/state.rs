//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::components::pokemon_detail::detail_rows;
use crate::config::DEFAULT_LIST_LIMIT;
use crate::filter;

/// One row of the catalog list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
    /// Upstream identifier parsed from `url`
    pub id: Option<u32>,
}

impl PokemonSummary {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: name.into(),
            id: resource_id(&url),
            url,
        }
    }

    /// Key used to request the detail record (id, or name when the URL has none)
    pub fn nav_key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}

/// Extract the numeric id from a resource URL such as `.../pokemon/25/`
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonAbility {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub base_value: u16,
    pub effort: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteRefs {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CryRefs {
    pub latest: Option<String>,
    pub legacy: Option<String>,
}

/// Full record for one Pokémon
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub base_experience: Option<u32>,
    /// Decimetres
    pub height: u16,
    pub abilities: Vec<PokemonAbility>,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub moves: Vec<String>,
    pub sprites: SpriteRefs,
    pub cries: CryRefs,
}

/// Outcome of a detail request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DetailState {
    Loading,
    Loaded(PokemonDetail),
    NotFound,
}

/// Which view is on screen
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Route {
    #[default]
    List,
    Detail { id: String, view: DetailState },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub list_limit: u32,

    /// List lifecycle: Empty → Loading → Loaded/Failed
    pub list: DataResource<Vec<PokemonSummary>>,
    /// Indices into the loaded list that match the search query
    pub filtered_indices: Vec<usize>,
    /// Position within `filtered_indices`
    pub selected_index: usize,
    pub search: SearchState,

    pub route: Route,
    /// First visible row of the detail page
    pub detail_scroll: u16,
    /// Detail identifier to open once on `Init`
    pub start_id: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_LIMIT)
    }
}

impl AppState {
    pub fn new(list_limit: u32) -> Self {
        Self {
            terminal_size: (80, 24),
            list_limit,
            list: DataResource::Empty,
            filtered_indices: Vec::new(),
            selected_index: 0,
            search: SearchState::default(),
            route: Route::List,
            detail_scroll: 0,
            start_id: None,
        }
    }

    /// Loaded entries, or an empty slice while the list is not available
    pub fn entries(&self) -> &[PokemonSummary] {
        self.list.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn filtered(&self) -> impl Iterator<Item = &PokemonSummary> {
        let entries = self.entries();
        self.filtered_indices
            .iter()
            .filter_map(move |idx| entries.get(*idx))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn selected_entry(&self) -> Option<&PokemonSummary> {
        self.filtered_indices
            .get(self.selected_index)
            .and_then(|idx| self.entries().get(*idx))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.filtered_indices.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.filtered_indices.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    pub fn rebuild_filtered(&mut self) {
        self.filtered_indices = filter::matching_indices(self.entries(), &self.search.query);
        if self.selected_index >= self.filtered_indices.len() {
            self.selected_index = 0;
        }
    }

    /// Rows that fit in the list panel
    pub fn page_size(&self) -> usize {
        (self.terminal_size.1.saturating_sub(8) as usize).max(1)
    }

    pub fn detail_id(&self) -> Option<&str> {
        match &self.route {
            Route::Detail { id, .. } => Some(id),
            Route::List => None,
        }
    }

    pub fn current_detail(&self) -> Option<&PokemonDetail> {
        match &self.route {
            Route::Detail {
                view: DetailState::Loaded(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self.route, Route::Detail { .. })
    }

    /// Width and height of the detail page body (inside the border, above the help bar)
    pub fn detail_viewport(&self) -> (u16, u16) {
        let (width, height) = self.terminal_size;
        (width.saturating_sub(2).max(1), height.saturating_sub(3).max(1))
    }

    /// Largest scroll offset that still fills the detail body
    pub fn detail_scroll_limit(&self) -> u16 {
        let Some(detail) = self.current_detail() else {
            return 0;
        };
        let (width, height) = self.detail_viewport();
        detail_rows(detail, width).saturating_sub(height)
    }

    /// Whether a result for `id` should still be applied
    pub fn awaiting_detail(&self, id: &str) -> bool {
        matches!(
            &self.route,
            Route::Detail { id: current, view: DetailState::Loading } if current == id
        )
    }

    fn list_status(&self) -> String {
        match &self.list {
            DataResource::Empty => "idle".to_string(),
            DataResource::Loading => "loading".to_string(),
            DataResource::Loaded(entries) => format!("loaded ({})", entries.len()),
            DataResource::Failed(error) => format!("failed: {error}"),
        }
    }

    fn route_label(&self) -> String {
        match &self.route {
            Route::List => "list".to_string(),
            Route::Detail { id, view } => {
                let view = match view {
                    DetailState::Loading => "loading",
                    DetailState::Loaded(_) => "loaded",
                    DetailState::NotFound => "not found",
                };
                format!("detail {id} ({view})")
            }
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("List")
                .entry("status", ron_string(&self.list_status()))
                .entry("limit", ron_string(&self.list_limit))
                .entry("filtered", ron_string(&self.filtered_indices.len()))
                .entry("selected", ron_string(&self.selected_index)),
            DebugSection::new("Search")
                .entry("query", ron_string(&self.search.query))
                .entry("active", ron_string(&self.search.active)),
            DebugSection::new("Route")
                .entry("view", ron_string(&self.route_label()))
                .entry("scroll", ron_string(&self.detail_scroll))
                .entry(
                    "detail",
                    ron_string(&self.current_detail().map(|detail| detail.name.clone())),
                ),
        ]
    }
}
