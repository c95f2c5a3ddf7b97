//! minidash - a four-widget dashboard in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::info;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use minidash::action::Action;
use minidash::api::{ApiClient, Endpoints};
use minidash::components::{Component, PageView, PageViewProps};
use minidash::effect::Effect;
use minidash::logging;
use minidash::reducer::reducer;
use minidash::state::AppState;
use minidash::theme::{DEFAULT_THEMES, SOLARIZED_THEMES, ThemeState};

/// Random dog, random cat, current weather and currency conversion
#[derive(Parser, Debug)]
#[command(name = "minidash")]
#[command(about = "A small dashboard of public APIs")]
struct Args {
    /// Comma-separated theme cycle
    #[arg(long, value_delimiter = ',', conflicts_with = "solarized")]
    themes: Option<Vec<String>>,

    /// Cycle light, dark and solarized
    #[arg(long)]
    solarized: bool,

    /// Prefill the city input
    #[arg(long, default_value = "")]
    city: String,

    /// Prefill the source currency code
    #[arg(long, default_value = "")]
    from: String,

    /// Prefill the target currency code
    #[arg(long, default_value = "")]
    to: String,

    /// Prefill the amount
    #[arg(long, default_value = "")]
    amount: String,

    #[arg(long)]
    dog_url: Option<String>,

    #[arg(long)]
    cat_url: Option<String>,

    #[arg(long)]
    geocode_url: Option<String>,

    #[arg(long)]
    forecast_url: Option<String>,

    #[arg(long)]
    rates_url: Option<String>,

    /// Where diagnostics go (filtered by RUST_LOG)
    #[arg(long, default_value = "minidash.log")]
    log_file: PathBuf,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::default();
        let overrides = [
            (&mut endpoints.dog, &self.dog_url),
            (&mut endpoints.cat, &self.cat_url),
            (&mut endpoints.geocode, &self.geocode_url),
            (&mut endpoints.forecast, &self.forecast_url),
            (&mut endpoints.rates, &self.rates_url),
        ];
        for (slot, url) in overrides {
            if let Some(url) = url {
                *slot = url.clone();
            }
        }
        endpoints
    }

    fn theme(&self) -> io::Result<ThemeState> {
        let theme = match (&self.themes, self.solarized) {
            (Some(names), _) => ThemeState::new(names.iter().cloned()),
            (None, true) => ThemeState::new(SOLARIZED_THEMES),
            (None, false) => ThemeState::new(DEFAULT_THEMES),
        };
        theme.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    fn initial_state(&self) -> io::Result<AppState> {
        let mut state = AppState::new(self.theme()?);
        state.city_input = self.city.clone();
        state.from_input = self.from.clone();
        state.to_input = self.to.clone();
        state.amount_input = self.amount.clone();
        Ok(state)
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DashComponentId {
    Page,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DashContext {
    Main,
}

impl EventRoutingState<DashComponentId, DashContext> for AppState {
    fn focused(&self) -> Option<DashComponentId> {
        Some(DashComponentId::Page)
    }

    fn modal(&self) -> Option<DashComponentId> {
        None
    }

    fn binding_context(&self, _id: DashComponentId) -> DashContext {
        DashContext::Main
    }

    fn default_context(&self) -> DashContext {
        DashContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_file)?;

    let endpoints = args.endpoints();
    let initial = args.initial_state()?;
    let client = ApiClient::new(endpoints).map_err(io::Error::other)?;
    info!(themes = ?initial.theme.names(), "starting");

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, client).await;

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
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    info!("exiting");
    Ok(())
}

struct DashUi {
    page: PageView,
}

impl DashUi {
    fn new() -> Self {
        Self {
            page: PageView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DashComponentId>,
    ) {
        event_ctx.set_component_area(DashComponentId::Page, area);
        let props = PageViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.page.render(frame, area, props);
    }

    fn handle_page_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = PageViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.page.handle_event(event, props).into_iter().collect();
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
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    client: ApiClient,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DashUi::new()));
    let mut bus: EventBus<AppState, Action, DashComponentId, DashContext> = EventBus::new();
    let keybindings: Keybindings<DashContext> = Keybindings::new();

    let ui_page = Rc::clone(&ui);
    bus.register(DashComponentId::Page, move |event, state| {
        ui_page.borrow_mut().handle_page_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Render),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, client.clone()),
        )
        .await
}

/// Handle effects by spawning one task per request
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: ApiClient) {
    let key = effect.task_key();
    ctx.tasks().spawn(TaskKey::new(key), effect.run(client));
}
