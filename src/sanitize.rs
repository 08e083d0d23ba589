use regex::Regex;
use std::sync::LazyLock;

static SYSTEM_REMINDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<system-reminder>.*?</system-reminder>").expect("static pattern compiles")
});

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static pattern compiles"));

/// Remove `<system-reminder>` regions, squeeze blank-line runs to a single
/// blank line and trim the result.
///
/// Removal repeats until no region is left, so a region spliced together by
/// an earlier removal is dropped too and the function stays idempotent.
pub fn strip_system_reminders(content: &str) -> String {
    let mut stripped = content.to_string();
    while SYSTEM_REMINDER.is_match(&stripped) {
        stripped = SYSTEM_REMINDER.replace_all(&stripped, "").into_owned();
    }

    BLANK_LINE_RUN
        .replace_all(&stripped, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_removes_region_and_body() {
        let out = strip_system_reminders("A<system-reminder>X</system-reminder>B");
        assert_eq!(out, "AB");
        assert!(!out.contains("system-reminder"));
    }

    #[test]
    fn test_strip_is_non_greedy_across_lines() {
        let input = "keep 1\n<system-reminder>\nfirst\n</system-reminder>\nkeep 2\n<system-reminder>second</system-reminder>\nkeep 3";
        let out = strip_system_reminders(input);
        assert!(out.contains("keep 1"));
        assert!(out.contains("keep 2"));
        assert!(out.contains("keep 3"));
        assert!(!out.contains("first"));
        assert!(!out.contains("second"));
    }

    #[test]
    fn test_strip_collapses_blank_line_runs() {
        let input = "top\n<system-reminder>a</system-reminder>\n<system-reminder>b</system-reminder>\n<system-reminder>c</system-reminder>\nbottom";
        let out = strip_system_reminders(input);
        assert_eq!(out, "top\n\nbottom");
        assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn test_strip_trims_and_handles_only_reminder() {
        assert_eq!(
            strip_system_reminders("  <system-reminder>x</system-reminder>\n\n"),
            ""
        );
        assert_eq!(strip_system_reminders("\n  plain text  \n"), "plain text");
    }

    #[test]
    fn test_strip_is_case_sensitive_and_needs_closing_tag() {
        let upper = "<SYSTEM-REMINDER>x</SYSTEM-REMINDER>";
        assert_eq!(strip_system_reminders(upper), upper);
        let unclosed = "a <system-reminder> never closed";
        assert_eq!(strip_system_reminders(unclosed), unclosed);
    }

    #[test]
    fn test_strip_is_idempotent() {
        let samples = [
            "",
            "plain",
            "A<system-reminder>X</system-reminder>B",
            "a\n\n\n\n\nb",
            "<system-<system-reminder>x</system-reminder>reminder>y</system-reminder>z",
            "\n\n<system-reminder>r</system-reminder>\n\n\n\ntext\n\n\n",
        ];
        for sample in samples {
            let once = strip_system_reminders(sample);
            assert_eq!(strip_system_reminders(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn test_strip_drops_spliced_region() {
        let spliced = "<system-<system-reminder>x</system-reminder>reminder>y</system-reminder>z";
        assert_eq!(strip_system_reminders(spliced), "z");
    }
}
