use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use sky_battle::display;
use sky_battle::entities::{LevelOutcome, Snapshot};
use sky_battle::levels::Sequencer;

/// One simulation tick per frame, 20 Hz.
const FRAME: Duration = Duration::from_millis(50);

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min frames between shots while Space is held.
/// 6 frames @ 20 FPS ≈ 3.3 shots/sec.
const FIRE_COOLDOWN: u32 = 6;

/// A key counts as held while its last press/repeat event is at most this
/// many frames old.  On terminals without key-release events the OS repeat
/// (≥ 15 Hz) refreshes the timestamp well inside the 150 ms window.
const HOLD_WINDOW: u64 = 3;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  SKY  BATTLE  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let lines: &[(&str, Color)] = &[
        ("Shoot down ten enemy planes to reach the boss.", Color::White),
        ("Don't let enemies slip past your line!", Color::White),
        ("", Color::White),
        ("ENTER - Start   Q - Quit", Color::DarkGrey),
        ("↑ ↓ / W S : Move   SPACE : Fire", Color::DarkGrey),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(msg.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Blocking read until a choice arrives
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('1') => {
                    return Ok(MenuResult::Start);
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: `key_frame` records the frame of the last press/repeat
/// event per key; every frame the still-fresh keys (see `HOLD_WINDOW`)
/// act together, so Space and a direction key can be held at once.  On
/// keyboard-enhancement terminals (kitty protocol) releases remove keys
/// immediately; elsewhere a key expires once its OS repeats stop.
fn game_loop<W: Write>(
    out: &mut W,
    seq: &mut Sequencer,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut fire_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let finished = run_over(seq.engine().snapshot());

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record the key and handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if finished => {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                // Repeat: keep the key fresh
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: drop the key at once (enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        let up = is_held(&key_frame, &KeyCode::Up, frame)
            || is_held(&key_frame, &KeyCode::Char('w'), frame)
            || is_held(&key_frame, &KeyCode::Char('W'), frame);
        let down = is_held(&key_frame, &KeyCode::Down, frame)
            || is_held(&key_frame, &KeyCode::Char('s'), frame)
            || is_held(&key_frame, &KeyCode::Char('S'), frame);
        let fire = is_held(&key_frame, &KeyCode::Char(' '), frame);

        {
            let engine = seq.engine_mut();
            if up && !down {
                engine.user_move_up();
            } else if down && !up {
                engine.user_move_down();
            } else {
                engine.user_halt();
            }

            // Firing is throttled so holding Space doesn't flood the screen
            if fire_cooldown == 0 && fire {
                engine.user_fire();
                fire_cooldown = FIRE_COOLDOWN;
            }
        }
        fire_cooldown = fire_cooldown.saturating_sub(1);

        if let Some(LevelOutcome::Advance(next)) = seq.engine_mut().tick(&mut rng) {
            seq.request(next);
        }
        seq.apply_pending();

        display::render(out, seq.engine().snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

/// True once the current level has ended the whole run.
fn run_over(snap: &Snapshot) -> bool {
    matches!(
        snap.outcome,
        Some(LevelOutcome::Win) | Some(LevelOutcome::Lose)
    )
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask the terminal for key-release and key-repeat events; terminals
    // without the kitty protocol simply refuse and we fall back.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads happen on their own thread; the game loop only
    // ever drains the channel, so a frame never waits on input I/O.
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

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut seq = Sequencer::new();
                let quit = game_loop(out, &mut seq, rx)?;
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
