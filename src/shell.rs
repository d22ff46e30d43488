//! Line-oriented command loop shared by the `recipes shell` front end and tests.

use crate::command::Command;
use crate::error::LookupError;
use crate::host::{Host, Output};
use crate::session::{Flow, Session};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "recipes> ";

/// Run commands from `input` until EOF, `quit`, or a read error.
///
/// Lines that are not valid UTF-8 or do not name a command become diagnostics
/// and the loop keeps going. With `prompt` set, a prompt is written to stdout
/// before each read.
pub fn run<R: BufRead>(
    session: &mut Session,
    host: &mut dyn Host,
    mut input: R,
    prompt: bool,
) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        if prompt {
            print!("{PROMPT}");
            io::stdout().flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                host.emit(Output::Diagnostic(LookupError::Input(format!(
                    "line is not valid UTF-8 ({e})"
                ))));
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(cmd) => {
                if session.execute(cmd, host) == Flow::Quit {
                    return Ok(());
                }
            }
            Err(e) => host.emit(Output::Diagnostic(LookupError::Input(e.to_string()))),
        }
    }
}
