//! Driver loop tests on tokio's paused clock

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use blockfall::core::{GameSnapshot, GameState, ScriptedRng};
use blockfall::driver::{Driver, Event, Presenter};
use blockfall::types::{GameAction, PieceKind, RunState};

#[derive(Default)]
struct Recorder {
    frames: Vec<GameSnapshot>,
}

impl Presenter for Recorder {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.frames.push(*snapshot);
        Ok(())
    }
}

fn o_game() -> GameState<ScriptedRng> {
    GameState::with_rng(ScriptedRng::new([PieceKind::O]))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Start a driver task; returns the sender and the join handle.
fn spawn_driver(
    game: GameState<ScriptedRng>,
) -> (
    mpsc::UnboundedSender<Event>,
    tokio::task::JoinHandle<Result<Driver<Recorder, ScriptedRng>>>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let driver = Driver::new(game, Recorder::default());
    (tx, tokio::spawn(driver.run(rx)))
}

#[tokio::test(start_paused = true)]
async fn ticks_follow_the_drop_interval() {
    let (tx, handle) = spawn_driver(o_game());
    tx.send(Event::Intent(GameAction::Start)).unwrap();

    time::sleep(ms(2500)).await;
    tx.send(Event::Quit).unwrap();

    let driver = handle.await.unwrap().unwrap();
    let game = driver.game();
    assert_eq!(game.run_state(), RunState::Running);
    assert_eq!(game.active().unwrap().y, 2);

    // Initial frame, start, two ticks.
    let frames = &driver.presenter().frames;
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0].run_state, RunState::Idle);
    assert_eq!(frames[3].active.unwrap().y, 2);
}

#[tokio::test(start_paused = true)]
async fn resume_restarts_a_full_interval() {
    let (tx, handle) = spawn_driver(o_game());
    tx.send(Event::Intent(GameAction::Start)).unwrap();

    time::sleep(ms(500)).await;
    tx.send(Event::Intent(GameAction::Pause)).unwrap();
    time::sleep(ms(1300)).await;
    tx.send(Event::Intent(GameAction::Pause)).unwrap();

    // 2700ms: the first tick after resuming is due at 2800ms.
    time::sleep(ms(900)).await;
    tx.send(Event::Quit).unwrap();

    let driver = handle.await.unwrap().unwrap();
    assert_eq!(driver.game().active().unwrap().y, 0);
}

#[tokio::test(start_paused = true)]
async fn first_tick_after_resume_lands_one_interval_later() {
    let (tx, handle) = spawn_driver(o_game());
    tx.send(Event::Intent(GameAction::Start)).unwrap();

    time::sleep(ms(500)).await;
    tx.send(Event::Intent(GameAction::Pause)).unwrap();
    time::sleep(ms(1300)).await;
    tx.send(Event::Intent(GameAction::Pause)).unwrap();

    time::sleep(ms(1100)).await;
    tx.send(Event::Quit).unwrap();

    let driver = handle.await.unwrap().unwrap();
    assert_eq!(driver.game().active().unwrap().y, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_gravity() {
    let (tx, handle) = spawn_driver(o_game());
    tx.send(Event::Intent(GameAction::Start)).unwrap();
    time::sleep(ms(500)).await;
    tx.send(Event::Intent(GameAction::Reset)).unwrap();

    time::sleep(ms(5000)).await;
    tx.send(Event::Quit).unwrap();

    let driver = handle.await.unwrap().unwrap();
    assert_eq!(driver.game().run_state(), RunState::Idle);
    // Initial frame, start, reset; no ticks.
    assert_eq!(driver.presenter().frames.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn closing_the_channel_stops_the_loop() {
    let (tx, handle) = spawn_driver(o_game());
    tx.send(Event::Intent(GameAction::Start)).unwrap();
    time::sleep(ms(1500)).await;
    drop(tx);

    let driver = handle.await.unwrap().unwrap();
    assert_eq!(driver.game().active().unwrap().y, 1);
    assert_eq!(driver.events_handled(), 2);
}

#[tokio::test(start_paused = true)]
async fn intents_do_not_move_an_armed_deadline() {
    let mut driver = Driver::new(o_game(), Recorder::default());
    assert_eq!(driver.deadline(), None);

    let t0 = Instant::now();
    assert!(driver.handle(Event::Intent(GameAction::Start)));
    assert_eq!(driver.deadline(), Some(t0 + ms(1000)));

    time::advance(ms(600)).await;
    driver.handle(Event::Intent(GameAction::MoveLeft));
    driver.handle(Event::Intent(GameAction::Rotate));
    assert_eq!(driver.deadline(), Some(t0 + ms(1000)));

    driver.handle(Event::Intent(GameAction::Pause));
    assert_eq!(driver.deadline(), None);

    time::advance(ms(400)).await;
    driver.handle(Event::Intent(GameAction::Pause));
    assert_eq!(driver.deadline(), Some(t0 + ms(2000)));

    time::advance(ms(1000)).await;
    driver.handle(Event::Tick);
    assert_eq!(driver.deadline(), Some(t0 + ms(3000)));

    assert!(!driver.handle(Event::Quit));
}

#[tokio::test(start_paused = true)]
async fn game_over_disarms_the_tick() {
    let mut driver = Driver::new(o_game(), Recorder::default());
    driver.handle(Event::Intent(GameAction::Start));

    while driver.game().is_running() {
        driver.handle(Event::Intent(GameAction::SoftDrop));
    }

    assert_eq!(driver.game().run_state(), RunState::GameOver);
    assert_eq!(driver.deadline(), None);

    driver.handle(Event::Tick);
    assert_eq!(driver.deadline(), None);
    assert_eq!(driver.game().run_state(), RunState::GameOver);
}

#[tokio::test(start_paused = true)]
async fn a_started_game_is_armed_on_construction() {
    let mut game = o_game();
    game.start();
    let t0 = Instant::now();
    let driver = Driver::new(game, Recorder::default());
    assert_eq!(driver.deadline(), Some(t0 + ms(1000)));
}

/// Soft-drop the active piece until the next one spawns.
fn drop_piece(game: &mut GameState<ScriptedRng>) {
    let spawned = game.pieces_spawned();
    while game.is_running() && game.pieces_spawned() == spawned {
        game.soft_drop();
    }
}

/// Stack four rows with I pieces: horizontals over columns 0-7, then a
/// vertical in column 8. Leaves a vertical I in column 9 hovering above its
/// landing spot, so one more step down locks it and clears the four rows.
fn stack_four_rows(game: &mut GameState<ScriptedRng>) {
    for _ in 0..4 {
        for _ in 0..3 {
            assert!(game.move_left());
        }
        drop_piece(game);
    }
    for _ in 0..4 {
        assert!(game.move_right());
        drop_piece(game);
    }

    assert!(game.rotate());
    for _ in 0..5 {
        assert!(game.move_right());
    }
    drop_piece(game);

    assert!(game.rotate());
    for _ in 0..6 {
        assert!(game.move_right());
    }
    for _ in 0..16 {
        assert!(game.soft_drop());
    }
    assert_eq!(game.active().unwrap().y, 16);
}

#[tokio::test(start_paused = true)]
async fn level_up_interval_applies_from_the_next_rearm() {
    let mut game = GameState::with_rng(ScriptedRng::new([PieceKind::I]));
    game.start();
    for _ in 0..2 {
        stack_four_rows(&mut game);
        drop_piece(&mut game);
    }
    assert_eq!((game.lines(), game.level()), (8, 1));
    stack_four_rows(&mut game);

    let t0 = Instant::now();
    let mut driver = Driver::new(game, Recorder::default());
    assert_eq!(driver.deadline(), Some(t0 + ms(1000)));

    time::advance(ms(1000)).await;
    assert!(driver.handle(Event::Tick));

    let game = driver.game();
    assert_eq!((game.lines(), game.level()), (12, 2));
    assert_eq!(game.drop_interval_ms(), 900);
    assert!(game.is_running());
    assert_eq!(driver.deadline(), Some(t0 + ms(1000) + ms(900)));

    time::advance(ms(900)).await;
    driver.handle(Event::Tick);
    assert_eq!(driver.deadline(), Some(t0 + ms(1000) + ms(1800)));
}

#[tokio::test(start_paused = true)]
async fn redraw_presents_without_touching_the_game() {
    let (tx, handle) = spawn_driver(o_game());
    tx.send(Event::Intent(GameAction::Start)).unwrap();
    time::sleep(ms(300)).await;
    tx.send(Event::Intent(GameAction::Pause)).unwrap();
    tx.send(Event::Redraw).unwrap();
    tx.send(Event::Redraw).unwrap();

    time::sleep(ms(3000)).await;
    tx.send(Event::Quit).unwrap();

    let driver = handle.await.unwrap().unwrap();
    assert_eq!(driver.game().run_state(), RunState::Paused);
    assert_eq!(driver.game().active().unwrap().y, 0);
    assert_eq!(driver.deadline(), None);

    // Initial frame, start, pause, two redraws.
    let frames = &driver.presenter().frames;
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[3], frames[4]);
    assert_eq!(frames[2], frames[4]);
}

#[tokio::test(start_paused = true)]
async fn redraw_keeps_an_armed_deadline() {
    let mut driver = Driver::new(o_game(), Recorder::default());
    let t0 = Instant::now();
    driver.handle(Event::Intent(GameAction::Start));

    time::advance(ms(700)).await;
    assert!(driver.handle(Event::Redraw));
    assert_eq!(driver.deadline(), Some(t0 + ms(1000)));
}
