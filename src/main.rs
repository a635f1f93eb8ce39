use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::io;
use tapsnake::audio::{Audio, Mute};
use tapsnake::clock::SystemClock;
use tapsnake::config::Args;
use tapsnake::engine::GameLoop;
use tapsnake::game::Game;
use tapsnake::grid::GridLayout;
use tapsnake::tui::{
    host_action, screen_pixels, with_terminal, HostAction, TerminalBell, TerminalRenderer,
};
use tapsnake::Result;

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging before anything else
    WriteLogger::init(args.log_level, Config::default(), File::create(&args.log_file)?)
        .expect("Failed to initialize logger");

    info!("Starting tapsnake");

    let result = with_terminal(
        || {
            // Setup terminal
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)
        },
        || run(&args),
        || {
            // Cleanup terminal
            let raw = disable_raw_mode();
            let mut stdout = io::stdout();
            execute!(
                stdout,
                LeaveAlternateScreen,
                DisableMouseCapture,
                cursor::Show
            )?;
            raw
        },
    );
    if let Err(e) = &result {
        error!("Exiting on error: {}", e);
    }

    info!("Goodbye");
    result
}

fn run(args: &Args) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let (width, height) = screen_pixels(cols, rows);
    let layout = GridLayout::from_screen(width, height, args.blocks_wide)?;
    info!(
        "Terminal {}x{}: {}x{} grid of {}px cells",
        cols, rows, layout.grid.width, layout.grid.height, layout.cell_size
    );

    let audio: Box<dyn Audio + Send> = if args.mute {
        Box::new(Mute)
    } else {
        Box::new(TerminalBell::new())
    };

    let mut game_loop = GameLoop::new(
        Game::new(layout),
        TerminalRenderer::new(layout)?,
        audio,
        SystemClock::new(),
    );
    let handle = game_loop.handle();
    game_loop.resume()?;

    loop {
        let event = event::read()?;
        match host_action(&event, &layout, handle.is_paused()) {
            Some(HostAction::Tap(tap)) if game_loop.is_running() => handle.tap(tap),
            Some(HostAction::ToggleLoop) => {
                if game_loop.is_running() {
                    game_loop.pause()?;
                    info!("Loop paused at score {}", handle.score());
                } else {
                    game_loop.resume()?;
                    info!("Loop resumed");
                }
            }
            Some(HostAction::Quit) => break,
            _ => {}
        }
    }

    game_loop.pause()
}
