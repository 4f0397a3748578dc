//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, DetailState, Route};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = vec![begin_list_load(state)];
            if let Some(id) = state.start_id.take() {
                effects.extend(open_detail(state, &id));
            }
            DispatchResult::changed_with_many(effects)
        }

        // ===== List actions =====
        Action::ListRetry => {
            if !state.list.is_failed() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(begin_list_load(state))
        }

        Action::ListDidLoad(entries) => {
            state.list = DataResource::Loaded(entries);
            state.selected_index = 0;
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::ListDidError(error) => {
            state.list = DataResource::Failed(error);
            state.filtered_indices.clear();
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::ListSelect(index) => {
            if state.set_selected_index(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ListPage(delta) => {
            let page = state.page_size() as i64;
            let index = (state.selected_index as i64 + i64::from(delta) * page).max(0);
            if state.set_selected_index(index as usize) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Search actions =====
        Action::SearchStart => {
            state.search.active = true;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.rebuild_filtered();
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailOpen(id) => {
            let effects = open_detail(state, &id);
            if effects.is_empty() {
                DispatchResult::unchanged()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        Action::DetailOpenSelected => {
            let Some(id) = state.selected_entry().map(|entry| entry.nav_key()) else {
                return DispatchResult::unchanged();
            };
            DispatchResult::changed_with_many(open_detail(state, &id))
        }

        Action::DetailDidLoad { id, detail } => {
            if !state.awaiting_detail(&id) {
                tracing::debug!(id, "discarding stale detail result");
                return DispatchResult::unchanged();
            }
            state.route = Route::Detail {
                id,
                view: DetailState::Loaded(detail),
            };
            DispatchResult::changed()
        }

        Action::DetailNotFound { id } => {
            if !state.awaiting_detail(&id) {
                tracing::debug!(id, "discarding stale not-found result");
                return DispatchResult::unchanged();
            }
            state.route = Route::Detail {
                id,
                view: DetailState::NotFound,
            };
            DispatchResult::changed()
        }

        Action::DetailScroll(delta) => {
            let limit = i32::from(state.detail_scroll_limit());
            let next = (i32::from(state.detail_scroll) + i32::from(delta)).clamp(0, limit);
            let next = next as u16;
            if next == state.detail_scroll {
                return DispatchResult::unchanged();
            }
            state.detail_scroll = next;
            DispatchResult::changed()
        }

        Action::DetailClose => {
            let Route::Detail { view, .. } = &state.route else {
                return DispatchResult::unchanged();
            };
            let in_flight = matches!(view, DetailState::Loading);
            state.route = Route::List;
            state.detail_scroll = 0;
            if in_flight {
                DispatchResult::changed_with(Effect::CancelPokemon)
            } else {
                DispatchResult::changed()
            }
        }

        // ===== UI actions =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            state.detail_scroll = state.detail_scroll.min(state.detail_scroll_limit());
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn begin_list_load(state: &mut AppState) -> Effect {
    state.list = DataResource::Loading;
    state.filtered_indices.clear();
    state.selected_index = 0;
    Effect::LoadPokemonList {
        limit: state.list_limit,
    }
}

fn open_detail(state: &mut AppState, id: &str) -> Vec<Effect> {
    let id = id.trim();
    if id.is_empty() {
        return Vec::new();
    }
    state.route = Route::Detail {
        id: id.to_string(),
        view: DetailState::Loading,
    };
    state.detail_scroll = 0;
    vec![Effect::LoadPokemon { id: id.to_string() }]
}
