use std::io;
use std::sync::Arc;

use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;
use tracing::info;

use crate::api::TicketApi;
use crate::api::http::HttpTicketApi;
use crate::intake::{Acknowledgement, IntakeController, IntakeEvent};
use crate::model::{DeskConfig, Ticket, TicketId};
use crate::store::{CollectionEvent, CollectionStore, RefreshCoordinator, StatsLoaded, StatsPanel};

use super::input;
use super::render;
use super::theme::Theme;

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Form,
    Filters,
    List,
}

impl Pane {
    pub fn next(self) -> Pane {
        match self {
            Pane::Form => Pane::Filters,
            Pane::Filters => Pane::List,
            Pane::List => Pane::Form,
        }
    }

    pub fn prev(self) -> Pane {
        match self {
            Pane::Form => Pane::List,
            Pane::Filters => Pane::Form,
            Pane::List => Pane::Filters,
        }
    }
}

/// Row of the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    Priority,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Priority,
        FormField::Submit,
    ];
}

/// Slot of the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Priority,
    Status,
    Search,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Category,
        FilterField::Priority,
        FilterField::Status,
        FilterField::Search,
    ];
}

/// Step to the neighbouring entry of `all`, clamped at both ends
pub fn step<T: Copy + PartialEq>(current: T, all: &[T], forward: bool) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (pos + 1).min(all.len().saturating_sub(1))
    } else {
        pos.saturating_sub(1)
    };
    all.get(next).copied().unwrap_or(current)
}

/// Receivers the event loop selects over
pub struct Channels {
    pub intake: UnboundedReceiver<IntakeEvent>,
    pub collection: UnboundedReceiver<CollectionEvent>,
    pub stats: UnboundedReceiver<StatsLoaded>,
    pub refresh: watch::Receiver<u64>,
}

/// Main application state
pub struct App {
    pub intake: IntakeController,
    pub collection: CollectionStore,
    pub stats: StatsPanel,
    pub refresh: RefreshCoordinator,
    pub theme: Theme,
    pub pane: Pane,
    pub form_field: FormField,
    pub filter_field: FilterField,
    /// Search text being typed; applied to the filters on Enter
    pub search_input: String,
    pub list_cursor: usize,
    pub list_scroll: usize,
    pub expanded: Option<TicketId>,
    pub should_quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn TicketApi>, config: &DeskConfig) -> (Self, Channels) {
        let refresh = RefreshCoordinator::new();
        let (intake, intake_rx) =
            IntakeController::new(Arc::clone(&api), refresh.clone(), config.intake.clone());
        let (collection, collection_rx) = CollectionStore::new(Arc::clone(&api), refresh.clone());
        let (stats, stats_rx) = StatsPanel::new(api);
        let channels = Channels {
            intake: intake_rx,
            collection: collection_rx,
            stats: stats_rx,
            refresh: refresh.subscribe(),
        };

        let app = App {
            intake,
            collection,
            stats,
            refresh,
            theme: Theme::from_config(&config.ui),
            pane: Pane::Form,
            form_field: FormField::Title,
            filter_field: FilterField::Category,
            search_input: String::new(),
            list_cursor: 0,
            list_scroll: 0,
            expanded: None,
            should_quit: false,
        };
        (app, channels)
    }

    /// Kick off the initial list and stats fetches
    pub fn start(&mut self) {
        self.collection.refresh();
        self.stats.observe(self.refresh.current());
    }

    pub fn on_intake(&mut self, event: IntakeEvent) {
        match self.intake.handle(event) {
            Some(Acknowledgement::Created(ticket)) => {
                self.collection.create(ticket);
                self.list_cursor = 0;
            }
            Some(Acknowledgement::Updated(ticket)) => {
                self.collection.replace(ticket);
            }
            None => {}
        }
    }

    pub fn on_collection(&mut self, event: CollectionEvent) {
        self.collection.handle(event);
        self.clamp_cursor();
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.collection.tickets().get(self.list_cursor)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.collection.tickets().len();
        self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
    }

    pub fn shutdown(&mut self) {
        self.intake.shutdown();
    }
}

/// Run the dashboard until the user quits
pub async fn run(config: DeskConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api: Arc<dyn TicketApi> = Arc::new(HttpTicketApi::new(&config.api)?);
    let (mut app, channels) = App::new(api, &config);
    info!(base_url = %config.api.base_url, "starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, channels).await;
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut channels: Channels,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStream::new();
    app.start();

    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Some(Ok(Event::Paste(text))) => input::handle_paste(app, &text),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = channels.intake.recv() => app.on_intake(event),
            Some(event) = channels.collection.recv() => app.on_collection(event),
            Some(loaded) = channels.stats.recv() => app.stats.handle(loaded),
            Ok(()) = channels.refresh.changed() => {
                let counter = *channels.refresh.borrow_and_update();
                app.stats.observe(counter);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
