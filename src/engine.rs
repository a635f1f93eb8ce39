use crate::audio::Audio;
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::game::Game;
use crate::input::TapEvent;
use crate::render::{Canvas, FrameOutcome, Renderer};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug)]
struct Status {
    running: AtomicBool,
    paused: AtomicBool,
    score: AtomicU32,
}

#[derive(Clone, Debug)]
pub struct LoopHandle {
    taps: Sender<TapEvent>,
    status: Arc<Status>,
}

impl LoopHandle {
    pub fn tap(&self, tap: TapEvent) {
        // The receiver lives as long as the GameLoop that handed out this handle
        if self.taps.send(tap).is_err() {
            debug!("Tap {:?} dropped, game loop is gone", tap);
        }
    }

    pub fn is_running(&self) -> bool {
        self.status.running.load(Ordering::Acquire)
    }

    pub fn is_paused(&self) -> bool {
        self.status.paused.load(Ordering::Acquire)
    }

    pub fn score(&self) -> u32 {
        self.status.score.load(Ordering::Acquire)
    }
}

struct Engine<Rd, A, C, R = StdRng> {
    game: Game<R>,
    renderer: Rd,
    audio: A,
    clock: C,
    taps: Receiver<TapEvent>,
    status: Arc<Status>,
    render_failing: bool,
}

impl<Rd, A, C, R> Engine<Rd, A, C, R>
where
    Rd: Renderer,
    A: Audio,
    C: Clock,
    R: Rng,
{
    fn new(game: Game<R>, renderer: Rd, audio: A, clock: C) -> (Self, LoopHandle) {
        let (tx, rx) = mpsc::channel();
        let status = Arc::new(Status {
            running: AtomicBool::new(false),
            paused: AtomicBool::new(game.is_paused()),
            score: AtomicU32::new(game.score()),
        });

        let engine = Engine {
            game,
            renderer,
            audio,
            clock,
            taps: rx,
            status: status.clone(),
            render_failing: false,
        };
        (engine, LoopHandle { taps: tx, status })
    }

    fn game(&self) -> &Game<R> {
        &self.game
    }

    fn step(&mut self) -> bool {
        let now = self.clock.now_millis();

        while let Ok(tap) = self.taps.try_recv() {
            self.game.handle_tap(tap, now);
        }

        let updated = self.game.tick(now, &mut self.audio);

        self.status
            .paused
            .store(self.game.is_paused(), Ordering::Release);
        self.status.score.store(self.game.score(), Ordering::Release);

        self.draw();
        updated
    }

    fn draw(&mut self) {
        let game = &self.game;
        match self.renderer.render(&mut |canvas: &mut dyn Canvas| game.draw(canvas)) {
            Ok(FrameOutcome::Presented) => {
                if self.render_failing {
                    info!("Rendering recovered");
                    self.render_failing = false;
                }
            }
            Ok(FrameOutcome::Skipped) => {}
            Err(e) => {
                // Only the first of a run of failures is worth a log line
                if !self.render_failing {
                    warn!("Frame dropped: {}", e);
                    self.render_failing = true;
                }
            }
        }
    }

    // A step in progress always finishes before the flag is seen
    fn run(&mut self) {
        info!("Game loop started");
        while self.status.running.load(Ordering::Acquire) {
            self.step();
            thread::yield_now();
        }
        info!("Game loop stopped");
    }
}

pub struct GameLoop<Rd, A, C, R = StdRng>
where
    Rd: Renderer + Send + 'static,
    A: Audio + Send + 'static,
    C: Clock + Send + 'static,
    R: Rng + Send + 'static,
{
    handle: LoopHandle,
    idle: Option<Engine<Rd, A, C, R>>,
    thread: Option<JoinHandle<Engine<Rd, A, C, R>>>,
}

impl<Rd, A, C, R> GameLoop<Rd, A, C, R>
where
    Rd: Renderer + Send + 'static,
    A: Audio + Send + 'static,
    C: Clock + Send + 'static,
    R: Rng + Send + 'static,
{
    pub fn new(game: Game<R>, renderer: Rd, audio: A, clock: C) -> Self {
        let (engine, handle) = Engine::new(game, renderer, audio, clock);
        GameLoop {
            handle,
            idle: Some(engine),
            thread: None,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    pub fn game(&self) -> Option<&Game<R>> {
        self.idle.as_ref().map(Engine::game)
    }

    pub fn resume(&mut self) -> Result<()> {
        if self.thread.is_some() {
            warn!("Game loop already running");
            return Ok(());
        }

        let Some(mut engine) = self.idle.take() else {
            return Err(Error::LoopPanicked(
                "game state was lost in an earlier crash".to_string(),
            ));
        };

        self.handle.status.running.store(true, Ordering::Release);
        let thread = thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || {
                engine.run();
                engine
            });

        match thread {
            Ok(thread) => {
                self.thread = Some(thread);
                Ok(())
            }
            Err(e) => {
                self.handle.status.running.store(false, Ordering::Release);
                Err(e.into())
            }
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        self.handle.status.running.store(false, Ordering::Release);
        match thread.join() {
            Ok(engine) => {
                self.idle = Some(engine);
                Ok(())
            }
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!("Game loop thread panicked: {}", reason);
                Err(Error::LoopPanicked(reason))
            }
        }
    }
}

impl<Rd, A, C, R> Drop for GameLoop<Rd, A, C, R>
where
    Rd: Renderer + Send + 'static,
    A: Audio + Send + 'static,
    C: Clock + Send + 'static,
    R: Rng + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(e) = self.pause() {
            error!("Game loop did not shut down cleanly: {}", e);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Sound;
    use crate::consts::BANNER_TEXT;
    use crate::game::GameState;
    use crate::grid::{GridLayout, GridSize, Position};
    use crate::heading::Heading;
    use crate::testing::{ManualClock, RecordingAudio, RecordingRenderer};
    use rand::SeedableRng;
    use std::io;
    use std::time::{Duration, Instant};

    fn layout() -> GridLayout {
        GridLayout {
            grid: GridSize::new(20, 20),
            cell_size: 10,
        }
    }

    fn engine() -> (
        Engine<RecordingRenderer, RecordingAudio, ManualClock>,
        LoopHandle,
        RecordingRenderer,
        ManualClock,
    ) {
        let renderer = RecordingRenderer::new();
        let clock = ManualClock::at(1_000);
        let game = Game::with_rng(layout(), StdRng::seed_from_u64(11));
        let (engine, handle) = Engine::new(
            game,
            renderer.clone(),
            RecordingAudio::default(),
            clock.clone(),
        );
        (engine, handle, renderer, clock)
    }

    fn wait_for(what: &str, mut done: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done() {
            assert!(Instant::now() < deadline, "timed out waiting for {what}");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_renders_every_iteration_while_not_started() {
        let (mut engine, handle, renderer, _clock) = engine();

        for _ in 0..5 {
            assert!(!engine.step());
        }

        assert_eq!(renderer.frame_count(), 5);
        assert!(handle.is_paused());
    }

    #[test]
    fn test_one_update_per_tick_period() {
        let (mut engine, handle, renderer, clock) = engine();
        handle.tap(TapEvent { x: 0 });

        let mut updates = 0;
        // 30 render iterations per 100ms for half a second
        for _ in 0..150 {
            if engine.step() {
                updates += 1;
            }
            clock.advance(3);
        }

        // 450ms elapsed: ticks at 0, 102, 204, 306, 408
        assert_eq!(updates, 5);
        assert_eq!(renderer.frame_count(), 150);
        assert_eq!(engine.game().snake().head(), Some(Position::new(15, 10)));
    }

    #[test]
    fn test_starting_tap_does_not_steer() {
        let (mut engine, handle, _renderer, _clock) = engine();

        handle.tap(TapEvent { x: 199 });
        engine.step();

        assert_eq!(engine.game().state(), GameState::Playing);
        assert_eq!(engine.game().snake().heading(), Heading::Right);
        assert!(!handle.is_paused());
    }

    #[test]
    fn test_taps_between_ticks_steer() {
        let (mut engine, handle, _renderer, clock) = engine();
        handle.tap(TapEvent { x: 0 });
        assert!(engine.step());

        handle.tap(TapEvent { x: 150 });
        clock.advance(50);
        assert!(!engine.step(), "not due yet");
        assert_eq!(engine.game().snake().heading(), Heading::Down);

        clock.advance(50);
        assert!(engine.step());
        assert_eq!(engine.game().snake().head(), Some(Position::new(11, 11)));
    }

    #[test]
    fn test_no_updates_after_death() {
        let (mut engine, handle, renderer, clock) = engine();
        handle.tap(TapEvent { x: 0 });

        let mut steps = 0;
        while !handle.is_paused() || steps == 0 {
            engine.step();
            clock.advance(100);
            steps += 1;
            assert!(steps < 100, "snake never died");
        }
        let head = engine.game().snake().head();

        for _ in 0..10 {
            assert!(!engine.step());
            clock.advance(100);
        }

        assert_eq!(engine.game().snake().head(), head);
        assert_eq!(engine.game().state(), GameState::Paused);
        assert!(engine.audio.sounds().contains(&Sound::Crash));

        let last = renderer.last_frame.lock().unwrap();
        let texts = last.as_ref().expect("a frame was presented").texts();
        assert_eq!(texts.last().map(String::as_str), Some(BANNER_TEXT));
        assert_eq!(texts[0], handle.score().to_string());
    }

    #[test]
    fn test_skipped_and_failed_frames_keep_the_game_going() {
        let (mut engine, handle, renderer, clock) = engine();
        handle.tap(TapEvent { x: 0 });

        *renderer.surface_ready.lock().unwrap() = false;
        assert!(engine.step());
        clock.advance(100);

        *renderer.surface_ready.lock().unwrap() = true;
        *renderer.fail.lock().unwrap() = true;
        assert!(engine.step());
        assert!(engine.render_failing);
        clock.advance(100);

        *renderer.fail.lock().unwrap() = false;
        assert!(engine.step());
        assert!(!engine.render_failing);

        assert_eq!(renderer.frame_count(), 1);
        assert_eq!(engine.game().snake().head(), Some(Position::new(13, 10)));
    }

    #[test]
    fn test_resume_and_pause_keep_game() {
        let renderer = RecordingRenderer::new();
        let game = Game::with_rng(layout(), StdRng::seed_from_u64(5));
        let mut game_loop = GameLoop::new(
            game,
            renderer.clone(),
            RecordingAudio::default(),
            crate::clock::SystemClock::new(),
        );
        let handle = game_loop.handle();

        game_loop.resume().unwrap();
        assert!(game_loop.is_running());
        assert!(handle.is_running());
        assert!(game_loop.game().is_none());

        handle.tap(TapEvent { x: 0 });
        wait_for("the game to start", || !handle.is_paused());

        game_loop.pause().unwrap();
        assert!(!game_loop.is_running());
        assert!(!handle.is_running());

        let frames = renderer.frame_count();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(renderer.frame_count(), frames, "nothing drawn after pause");

        let game = game_loop.game().expect("game kept after pause");
        assert_ne!(game.state(), GameState::NotStarted);

        game_loop.resume().unwrap();
        wait_for("another frame", || renderer.frame_count() > frames);
        game_loop.pause().unwrap();
    }

    #[test]
    fn test_pause_when_stopped_is_noop() {
        let game = Game::with_rng(layout(), StdRng::seed_from_u64(5));
        let mut game_loop = GameLoop::new(
            game,
            RecordingRenderer::new(),
            RecordingAudio::default(),
            ManualClock::default(),
        );

        assert!(game_loop.pause().is_ok());
        assert!(game_loop.game().is_some());
    }

    struct PanickingRenderer {
        entered: Arc<AtomicBool>,
    }

    impl Renderer for PanickingRenderer {
        fn render(
            &mut self,
            _draw: &mut dyn FnMut(&mut dyn Canvas),
        ) -> io::Result<FrameOutcome> {
            self.entered.store(true, Ordering::SeqCst);
            panic!("surface exploded");
        }
    }

    #[test]
    fn test_loop_panic_surfaces_on_pause() {
        let game = Game::with_rng(layout(), StdRng::seed_from_u64(5));
        let entered = Arc::new(AtomicBool::new(false));
        let mut game_loop = GameLoop::new(
            game,
            PanickingRenderer {
                entered: entered.clone(),
            },
            RecordingAudio::default(),
            ManualClock::default(),
        );

        game_loop.resume().unwrap();
        wait_for("the first frame", || entered.load(Ordering::SeqCst));
        let result = game_loop.pause();

        match result {
            Err(Error::LoopPanicked(msg)) => assert_eq!(msg, "surface exploded"),
            other => panic!("expected a loop panic, got {other:?}"),
        }
        assert!(game_loop.resume().is_err(), "cannot resume a lost game");
    }
}
