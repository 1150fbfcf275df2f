//! Driver: serializes ticks and player intents into one engine.
//!
//! A single task owns the [`GameState`]. Player input, redraw requests and shutdown arrive as
//! [`Event`]s on one channel; gravity comes from a deadline the driver keeps
//! itself. After every event the presenter gets a fresh snapshot.
//!
//! Tick scheduling:
//! - entering `Running` (start or resume) arms a deadline one drop interval out
//! - each fired tick re-arms using the interval in effect after that tick
//! - a level-up does not move a deadline that is already armed
//! - leaving `Running` (pause, game over, reset) disarms it

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::core::{GameSnapshot, GameState, RandomSource, SimpleRng};
use crate::types::{GameAction, RunState};

/// Input to the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Gravity step. The driver produces these itself; an external one is applied the same way.
    Tick,
    Intent(GameAction),
    /// Present the current state again without touching the game (e.g. after a resize).
    Redraw,
    Quit,
}

/// Receives a snapshot after every processed event.
pub trait Presenter {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        (**self).present(snapshot)
    }
}

pub struct Driver<P, R = SimpleRng> {
    game: GameState<R>,
    presenter: P,
    snapshot: GameSnapshot,
    deadline: Option<Instant>,
    events_handled: u64,
}

impl<P: Presenter, R: RandomSource> Driver<P, R> {
    pub fn new(game: GameState<R>, presenter: P) -> Self {
        let mut driver = Self {
            game,
            presenter,
            snapshot: GameSnapshot::default(),
            deadline: None,
            events_handled: 0,
        };
        if driver.game.is_running() {
            driver.arm();
        }
        driver
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// When the next gravity tick is due, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn events_handled(&self) -> u64 {
        self.events_handled
    }

    /// Run until [`Event::Quit`] arrives or every sender is dropped.
    ///
    /// Presents the initial state before waiting for the first event.
    pub async fn run(mut self, mut events: UnboundedReceiver<Event>) -> Result<Self> {
        self.present()?;

        loop {
            let next = match self.deadline {
                Some(at) => tokio::select! {
                    biased;
                    event = events.recv() => event,
                    _ = time::sleep_until(at) => Some(Event::Tick),
                },
                None => events.recv().await,
            };

            let Some(event) = next else {
                debug!("event channel closed");
                break;
            };
            if !self.handle(event) {
                break;
            }
            self.present()?;
        }

        info!(
            score = self.game.score(),
            events = self.events_handled,
            "driver stopped"
        );
        Ok(self)
    }

    /// Apply one event. Returns false when the loop should stop.
    pub fn handle(&mut self, event: Event) -> bool {
        self.events_handled += 1;
        let before = self.game.run_state();

        match event {
            Event::Quit => {
                info!("quit requested");
                return false;
            }
            Event::Tick => {
                self.game.tick();
                self.deadline = None;
            }
            Event::Intent(action) => {
                let changed = self.game.apply_action(action);
                debug!(action = action.as_str(), changed, "intent");
            }
            Event::Redraw => return true,
        }

        if let Some(lock) = self.game.take_last_event() {
            if lock.lines_cleared > 0 {
                info!(
                    lines = lock.lines_cleared,
                    points = lock.points,
                    level_up = lock.level_up,
                    "lines cleared"
                );
            }
        }

        self.reschedule(before, event);
        true
    }

    fn reschedule(&mut self, before: RunState, event: Event) {
        let after = self.game.run_state();
        if after != RunState::Running {
            self.deadline = None;
        } else if before != RunState::Running || event == Event::Tick || self.deadline.is_none() {
            self.arm();
        }
    }

    fn arm(&mut self) {
        let at = Instant::now() + self.game.drop_interval();
        self.deadline = Some(at);
    }

    fn present(&mut self) -> Result<()> {
        self.game.snapshot_into(&mut self.snapshot);
        self.presenter.present(&self.snapshot)
    }
}
