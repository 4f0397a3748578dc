//! Actions - intents from input and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{PokemonDetail, PokemonSummary};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: load the list, optionally open a detail view
    Init,

    // ===== List category =====
    /// Re-issue the list request after a failure
    ListRetry,
    ListDidLoad(Vec<PokemonSummary>),
    ListDidError(String),
    /// Select a row of the filtered list (by position)
    ListSelect(usize),
    /// Move selection by whole pages
    ListPage(i16),

    // ===== Search category =====
    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    // ===== Detail category =====
    /// Navigate to the detail view of an identifier
    DetailOpen(String),
    /// Open the detail view of the selected row
    DetailOpenSelected,
    DetailDidLoad { id: String, detail: PokemonDetail },
    /// Fetch failed or returned a non-success status
    DetailNotFound { id: String },
    /// Scroll the detail page by rows (negative scrolls up)
    DetailScroll(i16),
    /// Back to the list
    DetailClose,

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    Quit,
}
