use crate::error::Result;
use console::Term;
use std::io::{self, ErrorKind, IsTerminal, Write};

/// Line-oriented operator I/O.
pub trait Terminal {
    /// Shows `prompt` and reads one line, without its line ending. `None` means input is closed.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn write(&mut self, text: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// The real terminal, on stdout.
pub struct ConsoleTerminal {
    term: Term,
}

impl ConsoleTerminal {
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.term.write_str(prompt)?;
        self.term.flush()?;

        // Term::read_line cannot tell EOF from an empty line on piped input.
        if !io::stdin().is_terminal() {
            let mut line = String::new();
            if io::stdin().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let len = line.trim_end_matches(['\r', '\n']).len();
            line.truncate(len);
            return Ok(Some(line));
        }

        match self.term.read_line() {
            Ok(line) => Ok(Some(line)),
            Err(e) if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::Interrupted) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.term.write_all(text.as_bytes())?;
        self.term.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        Ok(())
    }
}
