//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s to `inbox_tx` when their call completes
//! - The runtime drains `inbox_rx` each frame and feeds the reducer
//! - Navigation is also delivered through the inbox, so a route change is
//!   applied after the event that requested it has been fully processed
//!
//! Structure:
//! - `mod.rs`: `Dispatcher` (state + effect execution) and `TuiRuntime`
//!   (terminal + event loop around a dispatcher)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Collaborator calls as pure async functions

mod handlers;
mod inbox;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use userdeck_core::config::Config;
use userdeck_core::{AuthProvider, Collaborators, DocumentStore, Route};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, TuiTerminal};
use crate::{render, update};

/// Target frame interval while calls are in flight or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// State plus effect execution, without a terminal.
///
/// `TuiRuntime` drives one of these from the terminal event loop; tests
/// drive it directly.
pub struct Dispatcher {
    pub state: AppState,
    collaborators: Collaborators,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
}

impl Dispatcher {
    pub fn new(state: AppState, collaborators: Collaborators) -> Self {
        let (inbox_tx, inbox_rx) = inbox::channel();
        Self {
            state,
            collaborators,
            inbox_tx,
            inbox_rx,
        }
    }

    /// Queues navigation to the first screen.
    pub fn start(&mut self, route: Route) {
        self.execute_effect(UiEffect::Navigate { route });
    }

    /// Runs one event through the reducer and executes its effects.
    pub fn dispatch(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Dispatches everything already in the inbox, including events queued
    /// while dispatching. Returns how many events were processed.
    pub fn drain_inbox(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Dispatches inbox events until no collaborator call is in flight.
    pub async fn settle(&mut self) {
        loop {
            self.drain_inbox();
            if self.state.pending == 0 || self.state.should_quit {
                return;
            }
            match self.inbox_rx.recv().await {
                Some(event) => self.dispatch(event),
                None => return,
            }
        }
    }

    /// Spawns an async effect and sends its result event to the inbox.
    ///
    /// Handlers are pure async functions that return `UiEvent`; spawning and
    /// delivery live here.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes one effect. Collaborator calls are stamped with the current
    /// mount so their results can be matched to the screen that issued them.
    fn execute_effect(&mut self, effect: UiEffect) {
        let mount = self.state.mount;
        let collection = self.state.collection.clone();

        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Navigate { route } => {
                let _ = self.inbox_tx.send(UiEvent::Navigated { route });
            }
            UiEffect::CreateAccount { email, password } => {
                let auth: Arc<dyn AuthProvider> = Arc::clone(&self.collaborators.auth);
                self.spawn_effect(move || handlers::create_account(auth, mount, email, password));
            }
            UiEffect::VerifyCredentials { email, password } => {
                let auth: Arc<dyn AuthProvider> = Arc::clone(&self.collaborators.auth);
                self.spawn_effect(move || {
                    handlers::verify_credentials(auth, mount, email, password)
                });
            }
            UiEffect::ListRecords => {
                let store: Arc<dyn DocumentStore> = Arc::clone(&self.collaborators.store);
                self.spawn_effect(move || handlers::list_records(store, collection, mount));
            }
            UiEffect::InsertRecord { name } => {
                let store: Arc<dyn DocumentStore> = Arc::clone(&self.collaborators.store);
                self.spawn_effect(move || handlers::insert_record(store, collection, mount, name));
            }
            UiEffect::UpdateRecord { id, name } => {
                let store: Arc<dyn DocumentStore> = Arc::clone(&self.collaborators.store);
                self.spawn_effect(move || {
                    handlers::update_record(store, collection, mount, id, name)
                });
            }
            UiEffect::RemoveRecord { id } => {
                let store: Arc<dyn DocumentStore> = Arc::clone(&self.collaborators.store);
                self.spawn_effect(move || handlers::remove_record(store, collection, mount, id));
            }
        }
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and a dispatcher. Terminal state is restored on drop
/// and on panic.
pub struct TuiRuntime {
    terminal: TuiTerminal,
    dispatcher: Dispatcher,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a terminal event was received (keeps ticks fast while typing).
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and builds the initial state.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: &Config, collaborators: Collaborators) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let dispatcher = Dispatcher::new(AppState::new(config), collaborators);

        let now = Instant::now();
        Ok(Self {
            terminal,
            dispatcher,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.dispatcher.state
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal events or drawing fails.
    pub fn run(&mut self, start: Route) -> Result<()> {
        self.dispatcher.start(start);
        let mut dirty = true;

        while !self.dispatcher.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                if matches!(event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                self.dispatcher.dispatch(event);
            }

            if dirty {
                let state = &self.dispatcher.state;
                self.terminal.draw(|frame| render::render(state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.dispatcher.state.pending > 0 || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(event) = self.dispatcher.inbox_rx.try_recv() {
            events.push(event);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

#[cfg(test)]
mod tests;
