use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::io::Read;
use std::io::Write as _;

use console::style;

pub const TAB: &str = "    ";

/// Errors produced while prompting the operator for input.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The input stream could not be read.
    #[error("failed to parse input")]
    Parse,
    /// The operator quit the prompt.
    #[error("waiting for input was aborted")]
    Aborted,
    /// The answer did not map to a known choice.
    #[error("unknown answer entered, expected `y`, `n` or `q`")]
    Unrecognized,
}

/// An unbuffered line reader.
///
/// Reads one byte at a time and never consumes input past the line it
/// returns, so it can be interleaved with other reads on the same stream.
pub struct LineReader<R> {
    reader: R,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one line, excluding the terminator. End of input returns
    /// whatever was accumulated so far, without error.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = Vec::new();
        let mut byte = [0; 1];

        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    line.push(byte[0]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Ask the operator for a line of text. With `skip`, `default` is returned
/// without touching the stream. An empty or whitespace-only answer yields
/// `default`.
pub fn ask_string(from: impl Read, default: &str, skip: bool) -> Result<String, InputError> {
    if skip {
        return Ok(default.to_owned());
    }
    let line = LineReader::new(from)
        .read_line()
        .map_err(|_| InputError::Parse)?;
    let line = line.trim();

    if line.is_empty() {
        Ok(default.to_owned())
    } else {
        Ok(line.to_owned())
    }
}

/// Ask the operator a yes/no question. With `skip`, `default` is returned
/// without touching the stream. A `q` answer aborts the operation.
pub fn ask_bool(from: impl Read, default: bool, skip: bool) -> Result<bool, InputError> {
    if skip {
        return Ok(default);
    }
    // The non-default choice doubles as the fallback text of the sub-prompt.
    let choices = if default { "n" } else { "y" };
    let answer = ask_string(from, choices, false)?;

    match answer.as_str() {
        "y" => return Ok(true),
        "n" => return Ok(false),
        _ => {}
    }
    match answer.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('y') => Ok(true),
        Some('n') => Ok(false),
        Some('q') => Err(InputError::Aborted),
        _ => Err(InputError::Unrecognized),
    }
}

/// Terminal width, if stdout is a terminal.
pub fn width() -> Option<usize> {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
}

pub fn info(msg: impl fmt::Display) {
    println!("{msg}");
}

pub fn blank() {
    println!();
}

/// Print a prompt, leaving the cursor on the same line.
pub fn prompt(msg: impl fmt::Display) {
    print!("{msg} ");
    io::stdout().flush().ok();
}

pub fn success(msg: impl fmt::Display) {
    println!("{} {msg}", style("✓").green());
}

pub fn error(msg: impl fmt::Display) {
    eprintln!("{} {}", style("✗").red(), style(msg).red());
}

pub fn hint(msg: impl fmt::Display) {
    eprintln!("{} {msg}", style("✗ Hint:").yellow());
}

pub fn usage(name: &str, usage: &str) {
    eprintln!(
        "{} {}\n{}",
        style("✗").red(),
        style(format!("Error: topictool-{name}: invalid usage")).red(),
        style(prefixed(TAB, usage)).red().dim()
    );
}

pub fn prefixed(prefix: &str, text: &str) -> String {
    text.split('\n').fold(String::new(), |mut s, line| {
        writeln!(&mut s, "{prefix}{line}").ok();
        s
    })
}
