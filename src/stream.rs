use crate::error::{LineError, StreamError};
use crate::render::EventRenderer;
use crate::truncate::truncate_with_ellipsis;
use crate::types::Event;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

const LOG_PAYLOAD_PREVIEW_CHARS: usize = 200;

/// Where rendered events and per-line decode notices go.
pub trait EventSink {
    fn rendered(&mut self, text: &str) -> io::Result<()>;
    fn line_error(&mut self, error: &LineError) -> io::Result<()>;
}

/// Rendered text to one writer, decode notices to another.
pub struct WriterSink<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> WriterSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> EventSink for WriterSink<O, E> {
    fn rendered(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn line_error(&mut self, error: &LineError) -> io::Result<()> {
        writeln!(self.err, "{error}")?;
        self.err.flush()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Lines read, blank ones included.
    pub lines: usize,
    /// Lines decoded and passed to the renderer.
    pub events: usize,
    /// Lines dropped because they did not decode.
    pub skipped: usize,
}

/// Reads a stream-json transcript line by line and renders each event.
pub struct StreamController<S> {
    renderer: EventRenderer,
    sink: S,
    line_number: usize,
    last_assistant_text: Option<String>,
    summary: StreamSummary,
}

impl<S: EventSink> StreamController<S> {
    pub fn new(renderer: EventRenderer, sink: S) -> Self {
        Self {
            renderer,
            sink,
            line_number: 0,
            last_assistant_text: None,
            summary: StreamSummary::default(),
        }
    }

    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<StreamSummary, StreamError> {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(StreamError::Read)?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(strip_line_ending(&buffer));
            self.process_line(&line)?;
        }

        info!(
            lines = self.summary.lines,
            events = self.summary.events,
            skipped = self.summary.skipped,
            "stream finished"
        );
        Ok(self.summary)
    }

    /// Handle one input line. Decode failures are reported to the sink and
    /// do not end the stream; only sink failures are returned.
    pub fn process_line(&mut self, line: &str) -> Result<(), StreamError> {
        self.line_number += 1;
        self.summary.lines += 1;
        if line.trim().is_empty() {
            return Ok(());
        }

        let event = match Event::from_line(line) {
            Ok(event) => event,
            Err(source) => {
                warn!(
                    line = self.line_number,
                    error = %source,
                    payload = %truncate_with_ellipsis(line, LOG_PAYLOAD_PREVIEW_CHARS),
                    "skipping malformed line"
                );
                self.summary.skipped += 1;
                let error = LineError {
                    line: self.line_number,
                    source,
                };
                return self.sink.line_error(&error).map_err(StreamError::Write);
            }
        };
        self.summary.events += 1;

        let hide_result_body = self.repeats_last_assistant_text(&event);
        if hide_result_body {
            debug!(line = self.line_number, "result repeats last assistant text");
        }
        if let Event::Assistant(message) = &event {
            if let Some(text) = message.texts().last() {
                self.last_assistant_text = Some(text.to_string());
            }
        }

        let rendered = self
            .renderer
            .render(&event, self.line_number, hide_result_body);
        if rendered.is_empty() {
            return Ok(());
        }
        self.sink.rendered(&rendered).map_err(StreamError::Write)
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn repeats_last_assistant_text(&self, event: &Event) -> bool {
        match (event, &self.last_assistant_text) {
            (Event::Result(result), Some(last)) => !result.result.is_empty() && result.result == *last,
            _ => false,
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
