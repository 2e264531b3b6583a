use std::fs::File;
use std::io::{stdout, BufWriter, IsTerminal, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{error, info, warn};

use fireworks::display::TerminalCanvas;
use fireworks::{Config, FireworksError, FrameDriver, FrameRequest, Simulation};

const CONFIG_ENV: &str = "FIREWORKS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "fireworks.toml";
const LOG_ENV: &str = "FIREWORKS_LOG";
const DEFAULT_LOG_PATH: &str = "fireworks.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file: stdout is the drawing surface.
fn init_tracing() {
    let path = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string());
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("cannot open log file {path}: {e}; logging disabled");
            return;
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

/// Leave the terminal usable if a frame panics, whether or not logging is on.
fn install_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        error!(%panic_info, "panic");
        default_hook(panic_info);
    }));
}

// ── Terminal setup ────────────────────────────────────────────────────────────

fn restore_terminal<W: Write>(out: &mut W) {
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Apply one input event between frames.  Returns `false` on a quit key.
fn handle_event(driver: &mut FrameDriver, ev: Event) -> bool {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return false,
            _ => {}
        },
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let at = TerminalCanvas::cell_to_pixel(column, row);
            let sim = driver.simulation_mut();
            match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => sim.pointer_moved(at.x, at.y),
                MouseEventKind::Down(_) => {
                    sim.pointer_moved(at.x, at.y);
                    sim.pointer_down();
                }
                MouseEventKind::Up(_) => sim.pointer_up(),
                _ => {}
            }
        }
        Event::Resize(cols, rows) => {
            warn!(cols, rows, "terminal resized; surface keeps its startup size");
        }
        _ => {}
    }
    true
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Drive frames at a fixed interval until a quit key stops the driver.
///
/// Input events are drained between frames, never during one, so pointer
/// state only changes at frame boundaries.
fn frame_loop<W: Write>(
    out: &mut W,
    driver: &mut FrameDriver,
    canvas: &mut TerminalCanvas,
    rx: &mpsc::Receiver<Event>,
    interval: Duration,
) -> fireworks::Result<()> {
    let mut rng = thread_rng();
    driver.start();

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            if !handle_event(driver, ev) {
                driver.stop();
            }
        }

        if driver.advance(canvas, &mut rng) == FrameRequest::Halt {
            return Ok(());
        }
        canvas.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> fireworks::Result<()> {
    install_panic_hook(|| restore_terminal(&mut stdout()));
    init_tracing();

    let config_path =
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load_or_default(&config_path)?;

    if !std::io::stdout().is_terminal() {
        return Err(FireworksError::SurfaceUnavailable(
            "stdout is not a terminal".to_string(),
        ));
    }
    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(cols, rows)?;
    let interval = Duration::from_millis(config.frame_interval_ms);
    let mut driver = FrameDriver::new(Simulation::for_surface(config, &canvas)?);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    // Capturing the mouse also keeps the terminal from starting a text
    // selection on click.
    out.execute(EnableMouseCapture)?;

    // Blocking event reads live on their own thread so a frame never waits
    // on input.
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

    info!(cols, rows, "starting display");
    let result = frame_loop(&mut out, &mut driver, &mut canvas, &rx, interval);

    // Always restore the terminal
    restore_terminal(&mut out);

    if let Err(e) = &result {
        error!(error = %e, "display stopped with an error");
    }
    result
}
