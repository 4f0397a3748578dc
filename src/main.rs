//! Pokédex Explorer - PokéAPI catalog TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex_explorer::action::Action;
use pokedex_explorer::api::PokeClient;
use pokedex_explorer::components::pokemon_list::search_input_action;
use pokedex_explorer::components::{
    Component, PokemonDetailView, PokemonDetailViewProps, PokemonList, PokemonListProps,
};
use pokedex_explorer::config::{ExplorerConfig, DEFAULT_API_BASE, DEFAULT_LIST_LIMIT};
use pokedex_explorer::effect::Effect;
use pokedex_explorer::logging;
use pokedex_explorer::reducer::reducer;
use pokedex_explorer::state::AppState;

const LIST_TASK: &str = "pokemon_list";
const DETAIL_TASK: &str = "pokemon";

/// Browse the PokéAPI catalog in the terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex-explorer")]
#[command(about = "Searchable Pokémon list with per-Pokémon detail pages")]
struct Args {
    /// PokéAPI root URL
    #[arg(long, env = "POKEDEX_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Number of Pokémon to load into the list
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT, value_parser = clap::value_parser!(u32).range(1..=2000))]
    limit: u32,

    /// Open the detail page of this id (or name) on start
    #[arg(long)]
    id: Option<String>,

    /// Do not write a log file
    #[arg(long)]
    no_log: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ExplorerComponentId {
    List,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ExplorerContext {
    List,
    Search,
    Detail,
}

impl EventRoutingState<ExplorerComponentId, ExplorerContext> for AppState {
    fn focused(&self) -> Option<ExplorerComponentId> {
        if self.is_detail_open() {
            Some(ExplorerComponentId::Detail)
        } else if self.search.active {
            Some(ExplorerComponentId::Search)
        } else {
            Some(ExplorerComponentId::List)
        }
    }

    fn modal(&self) -> Option<ExplorerComponentId> {
        if self.is_detail_open() {
            Some(ExplorerComponentId::Detail)
        } else if self.search.active {
            Some(ExplorerComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ExplorerComponentId) -> ExplorerContext {
        match id {
            ExplorerComponentId::List => ExplorerContext::List,
            ExplorerComponentId::Search => ExplorerContext::Search,
            ExplorerComponentId::Detail => ExplorerContext::Detail,
        }
    }

    fn default_context(&self) -> ExplorerContext {
        ExplorerContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        limit,
        id,
        no_log,
        debug: debug_args,
    } = Args::parse();

    let config = ExplorerConfig::new(&api_base, limit, id).map_err(io::Error::other)?;
    if !no_log {
        if let Err(err) = logging::init() {
            eprintln!("Warning: file logging disabled: {err}");
        }
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut initial = AppState::new(config.list_limit);
    initial.start_id = config.start_id.clone();
    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);
    let client = PokeClient::from_config(&config);
    tracing::info!(api = client.base(), limit = config.list_limit, "configured");

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("pokedex explorer exiting");
    Ok(())
}

struct ExplorerUi {
    list: PokemonList,
    detail: PokemonDetailView,
}

impl ExplorerUi {
    fn new() -> Self {
        Self {
            list: PokemonList::new(),
            detail: PokemonDetailView,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ExplorerComponentId>,
    ) {
        if state.is_detail_open() {
            event_ctx
                .component_areas
                .remove(&ExplorerComponentId::List);
            event_ctx
                .component_areas
                .remove(&ExplorerComponentId::Search);
            event_ctx.set_component_area(ExplorerComponentId::Detail, area);
            let props = PokemonDetailViewProps {
                state,
                is_focused: render_ctx.is_focused(),
            };
            self.detail.render(frame, area, props);
            return;
        }

        event_ctx
            .component_areas
            .remove(&ExplorerComponentId::Detail);
        event_ctx.set_component_area(ExplorerComponentId::List, area);
        if state.search.active {
            event_ctx.set_component_area(ExplorerComponentId::Search, area);
        } else {
            event_ctx
                .component_areas
                .remove(&ExplorerComponentId::Search);
        }
        let props = PokemonListProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search.active,
        };
        self.list.render(frame, area, props);
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = PokemonListProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = PokemonDetailViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: PokeClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ExplorerUi::new()));
    let mut bus: EventBus<AppState, Action, ExplorerComponentId, ExplorerContext> =
        EventBus::new();
    let keybindings: Keybindings<ExplorerContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(ExplorerComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    bus.register(ExplorerComponentId::Search, |event, _state| {
        handler_response(search_input_action(&event.kind).into_iter().collect())
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(ExplorerComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                HandlerResponse::action(Action::Quit)
            }
            KeyCode::Char('q') if !state.search.active => HandlerResponse::action(Action::Quit),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&client, effect, ctx),
        )
        .await
}

/// Handle effects by spawning keyed tasks
fn handle_effect(client: &PokeClient, effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadPokemonList { limit } => {
            let client = client.clone();
            ctx.tasks().spawn(TaskKey::new(LIST_TASK), async move {
                match client.fetch_pokemon_list(limit).await {
                    Ok(entries) => Action::ListDidLoad(entries),
                    Err(err) => {
                        tracing::warn!(error = %err, "pokemon list fetch failed");
                        Action::ListDidError(err.to_string())
                    }
                }
            });
        }
        Effect::LoadPokemon { id } => {
            let client = client.clone();
            ctx.tasks().spawn(TaskKey::new(DETAIL_TASK), async move {
                match client.fetch_pokemon(&id).await {
                    Some(detail) => Action::DetailDidLoad { id, detail },
                    None => Action::DetailNotFound { id },
                }
            });
        }
        Effect::CancelPokemon => {
            tracing::debug!("cancelling in-flight detail request");
            ctx.tasks().cancel(&TaskKey::new(DETAIL_TASK));
        }
    }
}
