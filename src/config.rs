use anyhow::{bail, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::render::{RenderOptions, Style};
use crate::util::{env_flag, env_value};

const STYLE_ENV: &str = "CCLEAN_STYLE";
const VERBOSE_ENV: &str = "CCLEAN_VERBOSE";
const LINE_NUMBERS_ENV: &str = "CCLEAN_LINE_NUMBERS";
const NO_COLOR_ENV: &str = "NO_COLOR";

const STDIN_MARKER: &str = "-";

/// Render a stream-json transcript as readable terminal output.
#[derive(Debug, Parser)]
#[command(
    name = "cclean",
    version = concat!("version ", env!("CARGO_PKG_VERSION")),
    disable_version_flag = true,
    after_help = "Environment: CCLEAN_STYLE, CCLEAN_VERBOSE, CCLEAN_LINE_NUMBERS, NO_COLOR, \
                  CCLEAN_LOG, CCLEAN_DEBUG, CCLEAN_LOG_PATH"
)]
pub struct Cli {
    /// Transcript file to read; stdin when omitted or `-`
    pub file: Option<PathBuf>,

    /// Output style
    #[arg(short, long, value_enum)]
    pub style: Option<Style>,

    /// Show tool IDs, per-model usage and system reminders
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Show the input line number of each event
    #[arg(short = 'n', long = "line-numbers")]
    pub line_numbers: bool,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// `auto` colors only a terminal, and never when `NO_COLOR` is set.
    pub fn resolve(self, no_color: bool, stdout_is_tty: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => !no_color && stdout_is_tty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    fn from_arg(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if path.as_os_str() != STDIN_MARKER => InputSource::File(path),
            _ => InputSource::Stdin,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub style: Style,
    pub render: RenderOptions,
    pub color: bool,
    pub input: InputSource,
}

impl Config {
    /// Resolve flags against their environment fallbacks. Flags win.
    pub fn load(cli: Cli) -> Result<Self> {
        let style = match cli.style {
            Some(style) => style,
            None => match env_value(STYLE_ENV) {
                Some(value) => match Style::parse(&value) {
                    Some(style) => style,
                    None => bail!(
                        "Invalid {STYLE_ENV} '{value}': expected default, compact, minimal or plain"
                    ),
                },
                None => Style::default(),
            },
        };
        let verbose = cli.verbose || env_flag(VERBOSE_ENV).unwrap_or(false);
        let show_line_numbers = cli.line_numbers || env_flag(LINE_NUMBERS_ENV).unwrap_or(false);
        let no_color = env_value(NO_COLOR_ENV).is_some();

        Ok(Self {
            style,
            render: RenderOptions {
                verbose,
                show_line_numbers,
            },
            color: cli.color.resolve(no_color, crate::terminal::stdout_is_tty()),
            input: InputSource::from_arg(cli.file),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let InputSource::File(path) = &self.input {
            if !is_readable_file(path) {
                bail!("File not found: {}", path.display());
            }
        }
        Ok(())
    }
}

fn is_readable_file(path: &Path) -> bool {
    path.metadata().map(|meta| meta.is_file()).unwrap_or(false)
}
