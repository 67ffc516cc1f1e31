//! Input events and the sources that produce them.
//!
//! The scripted source reads one tick of events per line:
//!
//! ```text
//! # draw one box with label 1 and move on
//! click 10 10; click 50 60
//! key 1
//! key space
//! quit
//! ```

use std::io::BufRead;

use crate::command::Key;
use crate::error::{LabelError, Result};
use crate::geometry::Point;

/// Discrete events delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer button released at a screen position
    PointerReleased(Point),
    /// Keyboard key pressed
    KeyPressed(Key),
    /// Window close or end of input
    CloseRequested,
}

/// Something that yields the events of one tick.
pub trait InputSource {
    /// All events that arrived since the previous poll, in arrival order.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Parse one event such as `click 10 20`, `key space` or `quit`.
pub fn parse_event(text: &str, line: usize) -> Result<InputEvent> {
    let mut parts = text.split_whitespace();
    let word = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (word.to_lowercase().as_str(), args.as_slice()) {
        ("click", [x, y]) => {
            let x: f64 = x
                .parse()
                .map_err(|_| LabelError::script(line, format!("bad x coordinate '{x}'")))?;
            let y: f64 = y
                .parse()
                .map_err(|_| LabelError::script(line, format!("bad y coordinate '{y}'")))?;
            Ok(InputEvent::PointerReleased(Point::new(x, y)))
        }
        ("key", [name]) => name
            .parse::<Key>()
            .map(InputEvent::KeyPressed)
            .map_err(|e| LabelError::script(line, e)),
        ("quit" | "close", []) => Ok(InputEvent::CloseRequested),
        _ => Err(LabelError::script(line, format!("unrecognized event '{text}'"))),
    }
}

/// Reads events from a line-oriented script. End of input requests close.
pub struct ScriptInput<R> {
    reader: R,
    line: usize,
    finished: bool,
}

impl<R: BufRead> ScriptInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            finished: false,
        }
    }

    /// Parse a whole line; malformed events are logged and skipped.
    fn parse_line(&self, text: &str) -> Vec<InputEvent> {
        let content = text.split('#').next().unwrap_or_default();

        content
            .split(';')
            .map(str::trim)
            .filter(|event| !event.is_empty())
            .filter_map(|event| match parse_event(event, self.line) {
                Ok(event) => Some(event),
                Err(e) => {
                    log::warn!("Skipping input: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl<R: BufRead> InputSource for ScriptInput<R> {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        if self.finished {
            return Ok(vec![InputEvent::CloseRequested]);
        }

        let mut text = String::new();
        if self.reader.read_line(&mut text)? == 0 {
            log::debug!("End of input after {} lines", self.line);
            self.finished = true;
            return Ok(vec![InputEvent::CloseRequested]);
        }

        self.line += 1;
        Ok(self.parse_line(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_event() {
        assert_eq!(
            parse_event("click 10 20.5", 1).unwrap(),
            InputEvent::PointerReleased(Point::new(10.0, 20.5))
        );
        assert_eq!(
            parse_event("key space", 1).unwrap(),
            InputEvent::KeyPressed(Key::Space)
        );
        assert_eq!(
            parse_event("KEY C", 1).unwrap(),
            InputEvent::KeyPressed(Key::Char('c'))
        );
        assert_eq!(parse_event("quit", 1).unwrap(), InputEvent::CloseRequested);
    }

    #[test]
    fn test_parse_event_errors_carry_line() {
        let err = parse_event("click 10", 7).unwrap_err();
        assert!(matches!(err, LabelError::Script { line: 7, .. }));
        assert!(parse_event("click a 1", 1).is_err());
        assert!(parse_event("key ctrl", 1).is_err());
        assert!(parse_event("jump", 1).is_err());
    }

    #[test]
    fn test_script_input_lines_are_ticks() {
        let script = "click 1 2; click 3 4\n# comment only\n\nkey 1 # trailing\nbogus\n";
        let mut input = ScriptInput::new(Cursor::new(script));

        assert_eq!(
            input.poll_events().unwrap(),
            [
                InputEvent::PointerReleased(Point::new(1.0, 2.0)),
                InputEvent::PointerReleased(Point::new(3.0, 4.0)),
            ]
        );
        assert!(input.poll_events().unwrap().is_empty());
        assert!(input.poll_events().unwrap().is_empty());
        assert_eq!(
            input.poll_events().unwrap(),
            [InputEvent::KeyPressed(Key::Char('1'))]
        );
        // Malformed line is skipped
        assert!(input.poll_events().unwrap().is_empty());
        assert_eq!(input.poll_events().unwrap(), [InputEvent::CloseRequested]);
        assert_eq!(input.poll_events().unwrap(), [InputEvent::CloseRequested]);
    }
}
