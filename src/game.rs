use crate::audio::{Audio, Sound};
use crate::consts::{BANNER_TEXT, TEXT_COLOR, TICK_PERIOD_MS};
use crate::food::Food;
use crate::grid::{GridLayout, Pixel};
use crate::input::{TapEvent, TapMapper};
use crate::render::{Canvas, TextSize, TextStyle};
use crate::snake::Snake;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Paused,
    Playing,
}

#[derive(Debug)]
pub struct Game<R = StdRng> {
    layout: GridLayout,
    taps: TapMapper,
    snake: Snake,
    food: Food,
    score: u32,
    state: GameState,
    next_tick_deadline: u64,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(layout: GridLayout) -> Self {
        Game::with_rng(layout, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(layout: GridLayout, rng: R) -> Self {
        Game {
            layout,
            taps: TapMapper::new(&layout),
            snake: Snake::new(layout.grid),
            food: Food::new(layout.grid),
            score: 0,
            state: GameState::NotStarted,
            next_tick_deadline: 0,
            rng,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state != GameState::Playing
    }

    pub fn new_game(&mut self, now: u64) {
        self.snake.reset(self.layout.grid.width, self.layout.grid.height);
        self.food.spawn(&mut self.rng);
        self.score = 0;
        self.next_tick_deadline = now;
        self.state = GameState::Playing;

        info!(
            "New game on a {}x{} grid, food at {:?}",
            self.layout.grid.width,
            self.layout.grid.height,
            self.food.location()
        );
    }

    pub fn handle_tap(&mut self, tap: TapEvent, now: u64) {
        if self.is_paused() {
            self.new_game(now);
            return;
        }

        self.snake.switch_heading(self.taps.turn_for(tap));
    }

    // Scheduled from now, so late ticks are never caught up
    pub fn update_required(&mut self, now: u64) -> bool {
        if self.next_tick_deadline <= now {
            self.next_tick_deadline = now + TICK_PERIOD_MS;
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self, now: u64, audio: &mut dyn Audio) -> bool {
        if self.is_paused() || !self.update_required(now) {
            return false;
        }
        self.update(audio);
        true
    }

    pub fn update(&mut self, audio: &mut dyn Audio) {
        self.snake.slither();

        if self.snake.check_dinner(self.food.location()) {
            self.food.spawn(&mut self.rng);
            self.score += 1;
            audio.play(Sound::Eat);
            debug!(
                "Dinner! score {} length {}, food respawned at {:?}",
                self.score,
                self.snake.len(),
                self.food.location()
            );
        }

        if self.snake.detect_death() {
            audio.play(Sound::Crash);
            self.state = GameState::Paused;
            info!(
                "Snake died at {:?} with score {}",
                self.snake.head(),
                self.score
            );
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_background();

        canvas.draw_text(
            &self.score.to_string(),
            Pixel::new(0, 0),
            TextStyle {
                size: TextSize::Normal,
                color: TEXT_COLOR,
                centered: false,
            },
        );

        self.food.draw(canvas);
        self.snake.draw(canvas);

        if self.is_paused() {
            canvas.draw_text(
                BANNER_TEXT,
                Pixel::new(self.layout.pixel_width() / 2, self.layout.pixel_height() / 2),
                TextStyle {
                    size: TextSize::Large,
                    color: TEXT_COLOR,
                    centered: true,
                },
            );
        }
    }
}
