use cclean::error::LineError;
use cclean::render::{EventRenderer, RenderOptions, Style};
use cclean::stream::{EventSink, StreamController, StreamSummary};
use std::io::{self, BufReader, Read};

#[derive(Debug, PartialEq)]
enum Entry {
    Rendered(String),
    Error(usize),
}

#[derive(Default)]
struct RecordingSink {
    entries: Vec<Entry>,
}

impl RecordingSink {
    fn transcript(&self) -> String {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Rendered(text) => Some(text.as_str()),
                Entry::Error(_) => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn rendered(&mut self, text: &str) -> io::Result<()> {
        self.entries.push(Entry::Rendered(text.to_string()));
        Ok(())
    }

    fn line_error(&mut self, error: &LineError) -> io::Result<()> {
        self.entries.push(Entry::Error(error.line));
        Ok(())
    }
}

fn run(style: Style, options: RenderOptions, input: &[u8]) -> (StreamSummary, RecordingSink) {
    let renderer = EventRenderer::new(style, options, false);
    let mut controller = StreamController::new(renderer, RecordingSink::default());
    let summary = controller.run(input).expect("stream runs");
    (summary, controller.into_sink())
}

const SESSION: &str = concat!(
    r#"{"type":"system","subtype":"init","cwd":"/repo","model":"claude-sonnet-4-5","tools":["Bash","Read"]}"#,
    "\n",
    r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Listing files."},{"type":"tool_use","id":"toolu_1","name":"Bash","input":{"command":"ls"}}]}}"#,
    "\n",
    r#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":"toolu_1","content":"Cargo.toml\nsrc<system-reminder>be careful</system-reminder>"}]}}"#,
    "\n",
    r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Done."}]}}"#,
    "\n",
    r#"{"type":"result","subtype":"success","is_error":false,"num_turns":2,"duration_ms":3200,"total_cost_usd":0.0123,"result":"Done."}"#,
    "\n"
);

#[test]
fn test_full_session_in_every_style() {
    for style in [Style::Default, Style::Compact, Style::Minimal, Style::Plain] {
        let (summary, sink) = run(style, RenderOptions::default(), SESSION.as_bytes());
        assert_eq!(
            summary,
            StreamSummary {
                lines: 5,
                events: 5,
                skipped: 0
            }
        );
        let transcript = sink.transcript();
        assert_eq!(transcript.matches("Done.").count(), 1, "{style:?}: {transcript}");
        assert!(transcript.contains("Cargo.toml"), "{style:?}");
        assert!(!transcript.contains("be careful"), "{style:?}");
        assert!(transcript.contains("Bash"), "{style:?}");
    }
}

#[test]
fn test_verbose_session_keeps_reminders() {
    let options = RenderOptions {
        verbose: true,
        show_line_numbers: false,
    };
    let (_, sink) = run(Style::Minimal, options, SESSION.as_bytes());
    let transcript = sink.transcript();
    assert!(transcript.contains("<system-reminder>be careful</system-reminder>"));
    assert!(transcript.contains("toolu_1"));
}

#[test]
fn test_malformed_line_resilience() {
    let input = concat!(
        r#"{"type":"system","subtype":"init"}"#,
        "\n",
        r#"{"type":"assistant","message":{"content":[{"type":"text","text":"hi"}]}}"#,
        "\n",
        "{not json\n",
        r#"{"type":"result","num_turns":1,"result":"bye"}"#,
        "\n"
    );
    let (summary, sink) = run(Style::Plain, RenderOptions::default(), input.as_bytes());
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.events, 3);
    assert_eq!(sink.entries.len(), 4);
    assert!(matches!(sink.entries[0], Entry::Rendered(ref text) if text.starts_with("SYSTEM")));
    assert!(matches!(sink.entries[1], Entry::Rendered(ref text) if text.contains("hi")));
    assert_eq!(sink.entries[2], Entry::Error(3));
    assert!(matches!(sink.entries[3], Entry::Rendered(ref text) if text.contains("bye")));
}

#[test]
fn test_non_matching_result_is_kept() {
    let input = concat!(
        r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Done."}]}}"#,
        "\n",
        r#"{"type":"result","result":"Done!"}"#,
        "\n"
    );
    for style in [Style::Default, Style::Compact, Style::Minimal, Style::Plain] {
        let (_, sink) = run(style, RenderOptions::default(), input.as_bytes());
        let transcript = sink.transcript();
        assert_eq!(transcript.matches("Done").count(), 2, "{style:?}: {transcript}");
    }
}

#[test]
fn test_crlf_input() {
    let input = "{\"type\":\"system\",\"subtype\":\"init\"}\r\n{\"type\":\"system\"}\r\n";
    let (summary, sink) = run(Style::Plain, RenderOptions::default(), input.as_bytes());
    assert_eq!(summary.skipped, 0);
    assert_eq!(sink.entries.len(), 2);
}

#[test]
fn test_final_line_without_newline() {
    let input = r#"{"type":"result","result":"tail"}"#;
    let (summary, sink) = run(Style::Compact, RenderOptions::default(), input.as_bytes());
    assert_eq!(summary.lines, 1);
    assert!(sink.transcript().contains("tail"));
}

#[test]
fn test_very_long_line() {
    let text = "x".repeat(11 * 1024 * 1024);
    let input = format!(
        "{{\"type\":\"user\",\"message\":{{\"content\":[{{\"type\":\"tool_result\",\"tool_use_id\":\"t\",\"content\":\"{text}\"}}]}}}}\n"
    );
    let (summary, sink) = run(Style::Compact, RenderOptions::default(), input.as_bytes());
    assert_eq!(summary.events, 1);
    assert_eq!(sink.transcript(), format!("RES {}...\n", "x".repeat(100)));
}

struct Trickle<'a> {
    data: &'a [u8],
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match (self.data.split_first(), buf.first_mut()) {
            (Some((byte, rest)), Some(slot)) => {
                *slot = *byte;
                self.data = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn test_fragmented_reads() {
    let renderer = EventRenderer::new(Style::Plain, RenderOptions::default(), false);
    let mut controller = StreamController::new(renderer, RecordingSink::default());
    let reader = BufReader::with_capacity(
        3,
        Trickle {
            data: SESSION.as_bytes(),
        },
    );
    let summary = controller.run(reader).expect("stream runs");
    assert_eq!(summary.events, 5);
    let (_, whole) = run(Style::Plain, RenderOptions::default(), SESSION.as_bytes());
    assert_eq!(controller.into_sink().transcript(), whole.transcript());
}

#[test]
fn test_line_numbers_in_compact_style() {
    let options = RenderOptions {
        verbose: false,
        show_line_numbers: true,
    };
    let (_, sink) = run(Style::Compact, options, SESSION.as_bytes());
    let transcript = sink.transcript();
    assert!(transcript.starts_with("SYS[init] L1 "), "{transcript}");
    assert!(transcript.contains("TOOL L2 Bash"), "{transcript}");
    assert!(transcript.contains("RES L3 "), "{transcript}");
    assert!(transcript.contains("OK L5 "), "{transcript}");
}

#[test]
fn test_null_and_odd_fields_do_not_drop_lines() {
    let input = concat!(
        r#"{"type":"system","subtype":"init","tools":null}"#,
        "\n",
        r#"{"type":"assistant","message":{"content":[{"type":"tool_use","id":"t1","name":"Bash","input":null}]}}"#,
        "\n",
        r#"{"type":"user","message":{"content":[{"type":"tool_result","tool_use_id":null,"content":"fine"}]}}"#,
        "\n",
        r#"{"type":"result","num_turns":2,"result":"ok","total_cost_usd":null,"modelUsage":{"m":5}}"#,
        "\n"
    );
    let (summary, sink) = run(Style::Plain, RenderOptions::default(), input.as_bytes());
    assert_eq!(
        summary,
        StreamSummary {
            lines: 4,
            events: 4,
            skipped: 0
        }
    );
    assert!(!sink.entries.iter().any(|entry| matches!(entry, Entry::Error(_))));
    let transcript = sink.transcript();
    assert!(transcript.contains("TOOL: Bash"), "{transcript}");
    assert!(transcript.contains("fine"), "{transcript}");
    assert!(transcript.contains("Turns: 2"), "{transcript}");
    assert!(transcript.contains("ok"), "{transcript}");
}
