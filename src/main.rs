use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use dino_dash::compute::{apply_command, init_state, tick, FPS};
use dino_dash::display;
use dino_dash::entities::{Command, Phase};
use dino_dash::score::HighScoreStore;

const TICK: Duration = Duration::from_millis(1000 / FPS as u64); // ≈24 ticks/sec

/// Minimum terminal size for the sprites and HUD to fit.
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 20;

// ── Input mapping ─────────────────────────────────────────────────────────────

fn map_key(key: &KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => Command::Jump,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        _ => Command::Other,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-tick loop: consume at most one buffered input event, simulate,
/// render, then sleep out the remainder of the tick budget. A slow tick
/// simply runs the next tick late rather than compensating.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &HighScoreStore,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    let (width, height) = terminal::size()?;
    let mut state = init_state(width, height, store.load());

    loop {
        let tick_start = Instant::now();

        if let Ok(Event::Key(key)) = rx.try_recv() {
            if key.kind == KeyEventKind::Press {
                let cmd = map_key(&key);
                if cmd == Command::Quit {
                    break;
                }
                state = apply_command(&state, cmd);
            }
        }

        let was_playing = state.phase == Phase::Playing;
        state = tick(&state, &mut rng);
        if was_playing && state.phase == Phase::GameOver {
            store.save(state.high_score);
        }

        display::render(out, &state)?;

        let elapsed = tick_start.elapsed();
        if elapsed < TICK {
            thread::sleep(TICK - elapsed);
        }
    }

    // Safety net: persist whatever this session reached, beaten or not.
    store.save(state.high_score);
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        eprintln!(
            "Terminal too small ({}x{}). Need at least {}x{}.",
            width, height, MIN_WIDTH, MIN_HEIGHT
        );
        eprintln!("Please resize and run again.");
        return Ok(());
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let store = HighScoreStore::new();
    let result = game_loop(&mut out, &rx, &store);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
