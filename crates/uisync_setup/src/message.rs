use crossterm::{
    QueueableCommand,
    style::{self, Stylize},
};
use std::{
    fmt,
    io::{self, Write},
};

/// Leading marker of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
    Skip,
    Present,
    Absent,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "[OK]",
            Self::Error => "[ERROR]",
            Self::Skip => "[SKIP]",
            Self::Present => "[✓]",
            Self::Absent => "[✗]",
        })
    }
}

/// Console writer for the human-readable report.
#[derive(Debug)]
pub struct PrintMessage<W: Write> {
    out: W,
    if_color: bool,
}

impl PrintMessage<io::Stdout> {
    pub fn stdout() -> Self {
        use std::io::IsTerminal;

        let out = io::stdout();
        let if_color = out.is_terminal();
        Self { out, if_color }
    }
}

impl<W: Write> PrintMessage<W> {
    /// Uncolored writer, used for captured output.
    pub fn plain(out: W) -> Self {
        Self {
            out,
            if_color: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.out.queue(style::Print("\n"))?.flush()
    }

    pub fn line(&mut self, text: impl fmt::Display) -> io::Result<()> {
        self.out
            .queue(style::Print(text))?
            .queue(style::Print("\n"))?
            .flush()
    }

    pub fn heading(&mut self, text: impl fmt::Display) -> io::Result<()> {
        let text = text.to_string();
        if self.if_color {
            self.out.queue(style::PrintStyledContent(text.bold()))?;
        } else {
            self.out.queue(style::Print(text))?;
        }
        self.out.queue(style::Print("\n"))?.flush()
    }

    /// `  <marker> <text>`, marker colored by outcome.
    pub fn status(&mut self, status: Status, text: impl fmt::Display) -> io::Result<()> {
        let marker = status.to_string();
        self.out.queue(style::Print("  "))?;
        if self.if_color {
            let styled = match status {
                Status::Ok | Status::Present => marker.green(),
                Status::Error | Status::Absent => marker.red(),
                Status::Skip => marker.yellow(),
            };
            self.out.queue(style::PrintStyledContent(styled))?;
        } else {
            self.out.queue(style::Print(marker))?;
        }
        self.out
            .queue(style::Print(format!(" {text}\n")))?
            .flush()
    }

    pub fn rule(&mut self, ch: char) -> io::Result<()> {
        self.line(ch.to_string().repeat(70))
    }
}
