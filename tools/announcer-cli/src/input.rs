use std::collections::VecDeque;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use trip_announcer::Coordinates;

/// Somewhere new position fixes come from
pub trait PositionSource {
    /// Next fix, or `None` when the session should end
    fn next_position(&mut self) -> Result<Option<Coordinates>>;
}

/// Prompts for `lat,lon` lines on a terminal. An empty line or EOF ends input.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> PositionSource for ConsoleInput<R, W> {
    fn next_position(&mut self) -> Result<Option<Coordinates>> {
        loop {
            write!(self.writer, "Current position (lat,lon), empty to quit: ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line).context("Failed to read position")? == 0 {
                return Ok(None);
            }

            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }

            match line.parse::<Coordinates>() {
                Ok(position) => return Ok(Some(position)),
                Err(e) => writeln!(self.writer, "{}", e)?,
            }
        }
    }
}

/// Replays a fixed list of fixes, e.g. from a recorded trip
#[derive(Debug, Default)]
pub struct ScriptedInput {
    positions: VecDeque<Coordinates>,
}

impl ScriptedInput {
    pub fn new(positions: impl IntoIterator<Item = Coordinates>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// One `lat,lon` per line; blank lines and `#` comments are skipped
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut positions = VecDeque::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let position = line
                .parse::<Coordinates>()
                .with_context(|| format!("Line {}: bad position", number + 1))?;
            positions.push_back(position);
        }
        Ok(Self { positions })
    }

    pub fn remaining(&self) -> usize {
        self.positions.len()
    }
}

impl PositionSource for ScriptedInput {
    fn next_position(&mut self) -> Result<Option<Coordinates>> {
        Ok(self.positions.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_input() {
        let input = b"45.7,123.4\nsomewhere\n 46.0 , 123.6 \n\n45.0,1.0\n";
        let mut output = Vec::new();
        let mut console = ConsoleInput::new(&input[..], &mut output);

        assert_eq!(console.next_position().unwrap(), Some(Coordinates::new(45.7, 123.4)));
        // The unparsable line is reported and the prompt repeats
        assert_eq!(console.next_position().unwrap(), Some(Coordinates::new(46.0, 123.6)));
        assert_eq!(console.next_position().unwrap(), None);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Invalid coordinates 'somewhere'"));
        assert_eq!(output.matches("Current position").count(), 4);
    }

    #[test]
    fn test_console_input_eof() {
        let mut console = ConsoleInput::new(&b""[..], std::io::sink());
        assert_eq!(console.next_position().unwrap(), None);
    }

    #[test]
    fn test_scripted_input() {
        let script = "# recorded on route 200\n45.6,123.4\n\n45.7,123.7\n";
        let mut input = ScriptedInput::from_reader(script.as_bytes()).unwrap();

        assert_eq!(input.remaining(), 2);
        assert_eq!(input.next_position().unwrap(), Some(Coordinates::new(45.6, 123.4)));
        assert_eq!(input.next_position().unwrap(), Some(Coordinates::new(45.7, 123.7)));
        assert_eq!(input.next_position().unwrap(), None);
    }

    #[test]
    fn test_scripted_input_bad_line() {
        let err = ScriptedInput::from_reader("45.6,123.4\nnope\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }
}
