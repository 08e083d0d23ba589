use crate::stream::WriterSink;
use crossterm::tty::IsTty;
use std::io::{self, BufWriter, Stderr, Stdout};

/// Rendered events on stdout, parse notices on stderr.
pub type TerminalSink = WriterSink<BufWriter<Stdout>, Stderr>;

pub fn sink() -> TerminalSink {
    WriterSink::new(BufWriter::new(io::stdout()), io::stderr())
}

pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}
