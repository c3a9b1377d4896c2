// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => self.emit_stdout(&JsonEvent {
                event: "success",
                message,
                item: None,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Report one item that completed.
    pub fn item_ok(&self, item: &str, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("  ✓ {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_stdout(&JsonEvent {
                event: "item_ok",
                message,
                item: Some(item),
                duration_secs: None,
            }),
        }
    }

    /// Report one item that failed; shown in every mode.
    pub fn item_failed(&self, item: &str, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("  ✗ {item}: {message}"),
            OutputMode::Json => self.emit_stderr(&JsonEvent {
                event: "item_failed",
                message,
                item: Some(item),
                duration_secs: None,
            }),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_stderr(&JsonEvent {
                event: "warning",
                message,
                item: None,
                duration_secs: None,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => self.emit_stderr(&JsonEvent {
                event: "error",
                message,
                item: None,
                duration_secs: self.duration(),
            }),
        }
    }

    /// Print a listing: an aligned table, or one JSON line per record.
    pub fn table<T: Serialize>(&self, headers: &[&str], rows: &[Vec<String>], records: &[T]) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => print!("{}", render_table(headers, rows)),
            OutputMode::Json => {
                for record in records {
                    self.emit_stdout(record);
                }
            }
        }
    }

    /// Print one raw line regardless of mode.
    pub fn line(&self, message: &str) {
        println!("{message}");
    }

    fn emit_stdout<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            println!("{json}");
        }
    }

    fn emit_stderr<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string(value) {
            eprintln!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// Left-aligned columns separated by three spaces, header first.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: Vec<&str>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("   ");
        format!("{}\n", line.trim_end())
    };

    let mut out = format_row(headers.to_vec());
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Human readable size in 1000-based units, one decimal above bytes.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1000.0 && unit < UNITS.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
