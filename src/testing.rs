//! Fakes for the drawing, sound and time collaborators.
use crate::audio::{Audio, Sound};
use crate::clock::Clock;
use crate::grid::{Pixel, Position};
use crate::render::{Canvas, FrameOutcome, Renderer, Sprite, TextStyle};
use std::io;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Background,
    Sprite(Sprite, Position),
    Text(String, Pixel, TextStyle),
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn sprites(&self) -> Vec<(Sprite, Position)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Sprite(sprite, pos) => Some((*sprite, *pos)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text, _, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_background(&mut self) {
        self.calls.push(DrawCall::Background);
    }

    fn draw_sprite(&mut self, sprite: Sprite, cell: Position) {
        self.calls.push(DrawCall::Sprite(sprite, cell));
    }

    fn draw_text(&mut self, text: &str, at: Pixel, style: TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), at, style));
    }
}

/// Counts presented frames and keeps the latest one; can be told to report
/// the surface as unavailable or broken.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub presented: Arc<AtomicUsize>,
    pub last_frame: Arc<Mutex<Option<RecordingCanvas>>>,
    pub surface_ready: Arc<Mutex<bool>>,
    pub fail: Arc<Mutex<bool>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer {
            surface_ready: Arc::new(Mutex::new(true)),
            ..Default::default()
        }
    }

    pub fn frame_count(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, draw: &mut dyn FnMut(&mut dyn Canvas)) -> io::Result<FrameOutcome> {
        if *self.fail.lock().unwrap() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "surface lost"));
        }
        if !*self.surface_ready.lock().unwrap() {
            return Ok(FrameOutcome::Skipped);
        }
        let mut canvas = RecordingCanvas::default();
        draw(&mut canvas);
        *self.last_frame.lock().unwrap() = Some(canvas);
        self.presented.fetch_add(1, Ordering::SeqCst);
        Ok(FrameOutcome::Presented)
    }
}

#[derive(Clone, Default)]
pub struct RecordingAudio {
    pub played: Arc<Mutex<Vec<Sound>>>,
}

impl RecordingAudio {
    pub fn sounds(&self) -> Vec<Sound> {
        self.played.lock().unwrap().clone()
    }
}

impl Audio for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.lock().unwrap().push(sound);
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn at(millis: u64) -> Self {
        ManualClock {
            now: Arc::new(AtomicU64::new(millis)),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
