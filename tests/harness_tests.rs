//! Store, component, and render flows driven through EffectStoreTestHarness

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, EffectStore, EventKind, NumericComponentId};
use pokedex_explorer::{
    action::Action,
    components::{
        pokemon_list::search_input_action, Component, PokemonDetailView, PokemonDetailViewProps,
        PokemonList, PokemonListProps,
    },
    effect::Effect,
    reducer::reducer,
    state::{AppState, PokemonAbility, PokemonDetail, PokemonSummary},
};

fn summaries() -> Vec<PokemonSummary> {
    vec![
        PokemonSummary::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
        PokemonSummary::new("ivysaur", "https://pokeapi.co/api/v2/pokemon/2/"),
        PokemonSummary::new("charmander", "https://pokeapi.co/api/v2/pokemon/4/"),
    ]
}

fn state_with_list() -> AppState {
    let mut state = AppState {
        list: DataResource::Loaded(summaries()),
        ..Default::default()
    };
    state.rebuild_filtered();
    state
}

fn ivysaur() -> PokemonDetail {
    PokemonDetail {
        id: 2,
        name: "ivysaur".into(),
        base_experience: Some(142),
        height: 10,
        abilities: vec![
            PokemonAbility {
                name: "overgrow".into(),
                is_hidden: false,
            },
            PokemonAbility {
                name: "chlorophyll".into(),
                is_hidden: true,
            },
        ],
        types: vec!["grass".into(), "poison".into()],
        ..Default::default()
    }
}

fn key_event(code: KeyCode) -> EventKind {
    EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn list_actions(component: &mut PokemonList, state: &AppState, event: &EventKind) -> Vec<Action> {
    let props = PokemonListProps {
        state,
        is_focused: true,
    };
    component.handle_event(event, props).into_iter().collect()
}

// ============================================================================
// Async flows
// ============================================================================

#[test]
fn test_list_load_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.list.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadPokemonList { limit: 500 }));

    harness.complete_action(Action::ListDidLoad(summaries()));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.filtered_len() == 3);
    harness.assert_state(|s| s.selected_entry().map(|e| e.name.as_str()) == Some("bulbasaur"));
}

#[test]
fn test_list_error_then_retry() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.drain_effects();
    harness.complete_action(Action::ListDidError("connection refused".into()));
    harness.process_emitted();
    harness.assert_state(|s| s.list.error() == Some("connection refused"));

    harness.dispatch_collect(Action::ListRetry);
    harness.assert_state(|s| s.list.is_loading());
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_all_match(|e| matches!(e, Effect::LoadPokemonList { .. }));
}

#[test]
fn test_start_id_opens_detail_alongside_list() {
    let mut state = AppState::default();
    state.start_id = Some("25".into());
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.detail_id() == Some("25"));
    harness.assert_state(|s| s.start_id.is_none());

    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadPokemonList { .. }));
    effects.effects_all_match(|e| match e {
        Effect::LoadPokemonList { .. } => true,
        Effect::LoadPokemon { id } => id == "25",
        Effect::CancelPokemon => false,
    });
}

#[test]
fn test_stale_detail_result_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(state_with_list(), reducer);

    harness.dispatch_collect(Action::DetailOpen("2".into()));
    harness.dispatch_collect(Action::DetailClose);
    let effects = harness.drain_effects();
    effects.effects_count(2);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadPokemon { id } if id == "2"));
    effects.effects_all_match(|e| {
        matches!(e, Effect::LoadPokemon { .. } | Effect::CancelPokemon)
    });

    harness.complete_action(Action::DetailDidLoad {
        id: "2".into(),
        detail: ivysaur(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 0);
    harness.assert_state(|s| !s.is_detail_open());
}

// ============================================================================
// Key-driven flows
// ============================================================================

#[test]
fn test_search_keys_filter_list() {
    let mut harness = EffectStoreTestHarness::new(state_with_list(), reducer);
    let mut component = PokemonList::new();

    let slash = key_event(KeyCode::Char('/'));
    let actions = list_actions(&mut component, &state_with_list(), &slash);
    assert_eq!(actions, vec![Action::SearchStart]);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.search.active);

    let actions = harness.send_keys::<NumericComponentId, _, _>("s a u r", |_state, event| {
        search_input_action(&event.kind).into_iter().collect::<Vec<_>>()
    });
    actions.assert_count(4);
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.assert_state(|s| s.search.query == "saur");
    harness.assert_state(|s| {
        s.filtered().map(|e| e.nav_key()).collect::<Vec<_>>() == vec!["1", "2"]
    });
}

#[test]
fn test_enter_opens_selected_row() {
    let mut store = EffectStore::new(state_with_list(), reducer);
    let mut component = PokemonList::new();

    store.dispatch(Action::ListSelect(1));
    let actions = list_actions(&mut component, store.state(), &key_event(KeyCode::Enter));
    assert_eq!(actions, vec![Action::DetailOpenSelected]);

    let result = store.dispatch(Action::DetailOpenSelected);
    assert_eq!(store.state().detail_id(), Some("2"));
    assert_eq!(result.effects, vec![Effect::LoadPokemon { id: "2".into() }]);
}

#[test]
fn test_retry_key_only_when_failed() {
    let mut component = PokemonList::new();
    let retry = key_event(KeyCode::Char('r'));

    let loaded = state_with_list();
    assert!(!list_actions(&mut component, &loaded, &retry).contains(&Action::ListRetry));

    let failed = AppState {
        list: DataResource::Failed("timeout".into()),
        ..Default::default()
    };
    assert_eq!(
        list_actions(&mut component, &failed, &retry),
        vec![Action::ListRetry]
    );
}

#[test]
fn test_escape_leaves_detail() {
    let mut store = EffectStore::new(state_with_list(), reducer);
    let mut component = PokemonDetailView;

    store.dispatch(Action::SearchStart);
    store.dispatch(Action::SearchInput('y'));
    store.dispatch(Action::SearchSubmit);
    store.dispatch(Action::DetailOpen("2".into()));
    store.dispatch(Action::DetailDidLoad {
        id: "2".into(),
        detail: ivysaur(),
    });

    let props = PokemonDetailViewProps {
        state: store.state(),
        is_focused: true,
    };
    let actions: Vec<Action> = component
        .handle_event(&key_event(KeyCode::Esc), props)
        .into_iter()
        .collect();
    assert_eq!(actions, vec![Action::DetailClose]);

    let result = store.dispatch(Action::DetailClose);
    assert!(result.effects.is_empty());
    assert!(!store.state().is_detail_open());
    assert_eq!(store.state().search.query, "y");
    assert_eq!(store.state().filtered_len(), 1);
}

// ============================================================================
// Render checks
// ============================================================================

#[test]
fn test_render_empty_search_result() {
    let mut harness = EffectStoreTestHarness::new(state_with_list(), reducer);
    let mut component = PokemonList::new();

    harness.dispatch_collect(Action::SearchStart);
    for ch in "zzz".chars() {
        harness.dispatch_collect(Action::SearchInput(ch));
    }

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = PokemonListProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("No Pokémon found"),
        "Empty state should be visible in output:\n{}",
        output
    );
}

#[test]
fn test_render_not_found_after_404() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = PokemonDetailView;

    harness.dispatch_collect(Action::DetailOpen("9999".into()));
    harness.complete_action(Action::DetailNotFound { id: "9999".into() });
    harness.process_emitted();

    let output = harness.render_plain(60, 20, |frame, area, state| {
        let props = PokemonDetailViewProps {
            state,
            is_focused: true,
        };
        component.render(frame, area, props);
    });

    assert!(
        output.contains("Pokémon not found"),
        "Not-found message should be visible in output:\n{}",
        output
    );
    assert!(output.contains("9999"));
}
