// src/driver/prompt.rs

//! Blocking waits for the user between driver stages.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::trace;
use std::io::{self, BufRead, IsTerminal};

/// Something the driver blocks on until the user acknowledges a prompt.
pub trait Acknowledge {
    /// Returns once an input event has been received. Must block; a timed
    /// delay is not an acknowledgment.
    fn acknowledge(&mut self) -> io::Result<()>;
}

/// Waits for a single key press on the controlling terminal.
///
/// The key itself is ignored, except Ctrl+C, which aborts the wait with
/// [`io::ErrorKind::Interrupted`]. When stdin is not a terminal (piped
/// input), one line of input counts as the key press, and end of input
/// releases every remaining wait.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyPress;

impl Acknowledge for KeyPress {
    fn acknowledge(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return acknowledge_line(&mut stdin.lock());
        }

        terminal::enable_raw_mode()?;
        let waited = wait_for_key_press();
        // restore cooked mode even when reading failed
        terminal::disable_raw_mode()?;
        waited
    }
}

/// Consumes one line of `input` as an acknowledgment. End of input counts too.
fn acknowledge_line<R: BufRead>(input: &mut R) -> io::Result<()> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    trace!("acknowledged by line input ({} bytes)", read);
    Ok(())
}

fn wait_for_key_press() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()?
            && acknowledges(&key)?
        {
            trace!("acknowledged by key {:?}", key.code);
            return Ok(());
        }
    }
}

/// Decides whether a key event acknowledges the prompt.
///
/// Raw mode delivers Ctrl+C as a plain key event, so it is turned into an
/// `Interrupted` error here. Release and repeat events (reported on some
/// platforms) are skipped.
fn acknowledges(key: &KeyEvent) -> io::Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by Ctrl+C"));
    }
    Ok(key.kind == KeyEventKind::Press)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::io::Cursor;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        let err = acknowledges(&ctrl_c).expect_err("Ctrl+C must not acknowledge");
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }

    #[test]
    fn test_plain_key_press_acknowledges() -> io::Result<()> {
        assert!(acknowledges(&key(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press))?);
        assert!(acknowledges(&key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press))?);
        Ok(())
    }

    #[test]
    fn test_release_and_repeat_are_skipped() -> io::Result<()> {
        assert!(!acknowledges(&key(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release))?);
        assert!(!acknowledges(&key(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Repeat))?);
        Ok(())
    }

    #[test]
    fn test_line_input_one_line_per_wait() -> io::Result<()> {
        let mut input = Cursor::new("first\nsecond\n");
        acknowledge_line(&mut input)?;
        assert_eq!(input.position(), 6);
        acknowledge_line(&mut input)?;
        assert_eq!(input.position(), 13);
        Ok(())
    }

    #[test]
    fn test_line_input_eof_releases_waits() -> io::Result<()> {
        let mut input = Cursor::new("");
        for _ in 0..3 {
            acknowledge_line(&mut input)?;
        }
        Ok(())
    }
}
