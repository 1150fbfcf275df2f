//! Terminal blockfall runner (default binary).
//!
//! Keys are read on a plain thread and forwarded to the driver task, which
//! owns the game and redraws the terminal after every event.

use std::thread;

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

use blockfall::config::{Config, USAGE};
use blockfall::core::{GameSnapshot, GameState};
use blockfall::driver::{Driver, Event, Presenter};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::logging;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

struct TerminalPresenter {
    view: GameView,
    renderer: TerminalRenderer,
    fb: FrameBuffer,
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(snapshot, Viewport::new(w, h), &mut self.fb);
        self.renderer.draw(&self.fb)?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    if config.help {
        print!("{}", USAGE);
        return Ok(());
    }
    logging::init(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");

    let mut presenter = TerminalPresenter {
        view: GameView::default(),
        renderer: TerminalRenderer::new(),
        fb: FrameBuffer::new(0, 0),
    };
    presenter.renderer.enter()?;

    let result = run(seed, &mut presenter).await;

    // Always try to restore terminal state.
    if let Err(e) = presenter.renderer.exit() {
        warn!(error = %e, "terminal restore failed");
    }
    result
}

async fn run(seed: u32, presenter: &mut TerminalPresenter) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_thread(tx);

    let driver = Driver::new(GameState::new(seed), presenter);
    let driver = driver.run(rx).await?;
    info!(
        score = driver.game().score(),
        level = driver.game().level(),
        lines = driver.game().lines(),
        "session ended"
    );
    Ok(())
}

/// Forward key presses and resizes until quit or until the driver goes away.
fn spawn_input_thread(tx: UnboundedSender<Event>) {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    Event::Quit
                } else if let Some(action) = handle_key_event(key) {
                    Event::Intent(action)
                } else {
                    continue;
                }
            }
            Ok(TermEvent::Resize(..)) => Event::Redraw,
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "terminal input failed");
                let _ = tx.send(Event::Quit);
                return;
            }
        };

        if tx.send(event).is_err() || event == Event::Quit {
            return;
        }
    });
}
