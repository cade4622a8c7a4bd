//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes command output to stdout according to the resolved format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format auto` defers to `output.format` from the config, and
    /// `auto` there resolves to human (terminal) or plain (pipe).
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => config.output_format().unwrap_or(OutputFormat::Auto),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Plain line; suppressed in quiet mode and in JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.symbol_line("\u{2713}", msg, |s| s.green().bold().to_string(), |m| {
            m.green().to_string()
        })
    }

    /// `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.symbol_line("\u{26a0}", msg, |s| s.yellow().bold().to_string(), |m| {
            m.yellow().to_string()
        })
    }

    /// `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.symbol_line("\u{2139}", msg, |s| s.blue().bold().to_string(), |m| {
            m.blue().to_string()
        })
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed secondary text such as paths in a listing.
    pub fn dim(&self, text: &str) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        }
    }

    /// Pretty JSON document. Written even in quiet mode, since it is the
    /// command's result rather than commentary.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    fn silent(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn symbol_line(
        &self,
        symbol: &str,
        msg: &str,
        paint_symbol: impl Fn(&str) -> String,
        paint_msg: impl Fn(&str) -> String,
    ) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", paint_symbol(symbol), paint_msg(msg))
        };
        self.term.write_line(&line)
    }
}
