//! Output formatting for dispatcher events and drawn lines.
//!
//! Events are rendered either as short text lines or as JSON lines, and the
//! lines drawn during a session can be shown on an ASCII canvas.

use std::collections::HashMap;

use clap::ValueEnum;
use serde::Serialize;

use gridlines_lib::{DispatchEvent, JobId, Position};

use crate::terminal::ColorPalette;

/// Widest canvas `--render` will print.
pub const MAX_RENDER_WIDTH: i32 = 200;

/// Upper bound on the buffer reserved up front by [`Canvas::render`].
const RENDER_CAPACITY_LIMIT: usize = 1 << 20;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Serializable view of a [`DispatchEvent`].
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord<'a> {
    WaitingForStartPoint,
    WaitingForEndPoint,
    SearchStarted {
        job: JobId,
        start: Position,
        end: Position,
    },
    LineCreated {
        job: JobId,
        start: Position,
        end: Position,
        length: usize,
        path: &'a [Position],
    },
    PathFindingFailed {
        job: JobId,
        start: Position,
        end: Position,
        error: String,
    },
}

impl<'a> From<&'a DispatchEvent> for EventRecord<'a> {
    fn from(event: &'a DispatchEvent) -> Self {
        match event {
            DispatchEvent::WaitingForStartPoint => EventRecord::WaitingForStartPoint,
            DispatchEvent::WaitingForEndPoint => EventRecord::WaitingForEndPoint,
            DispatchEvent::SearchStarted { job, start, end } => EventRecord::SearchStarted {
                job: *job,
                start: *start,
                end: *end,
            },
            DispatchEvent::LineCreated {
                job,
                start,
                end,
                path,
            } => EventRecord::LineCreated {
                job: *job,
                start: *start,
                end: *end,
                length: path.len(),
                path,
            },
            DispatchEvent::PathFindingFailed {
                job,
                start,
                end,
                error,
            } => EventRecord::PathFindingFailed {
                job: *job,
                start: *start,
                end: *end,
                error: error.to_string(),
            },
        }
    }
}

/// Render a single event in the requested format.
pub fn format_event(
    event: &DispatchEvent,
    format: OutputFormat,
    palette: &ColorPalette,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(&EventRecord::from(event)),
        OutputFormat::Text => Ok(format_event_text(event, palette)),
    }
}

fn format_event_text(event: &DispatchEvent, palette: &ColorPalette) -> String {
    match event {
        DispatchEvent::WaitingForStartPoint => "waiting for start point".to_string(),
        DispatchEvent::WaitingForEndPoint => "waiting for end point".to_string(),
        DispatchEvent::SearchStarted { job, start, end } => {
            format!("[job {job}] searching {start} -> {end} in the background")
        }
        DispatchEvent::LineCreated {
            job,
            start,
            end,
            path,
        } => format!(
            "[job {job}] line {start} -> {end}: {} cells\n  {}",
            path.len(),
            format_path(path)
        ),
        DispatchEvent::PathFindingFailed { job, error, .. } => {
            format!(
                "{}[job {job}] error: {error}{}",
                palette.red, palette.reset
            )
        }
    }
}

/// Join cells as `(x,y) (x,y) ...`.
pub fn format_path(path: &[Position]) -> String {
    path.iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Totals reported at the end of a `draw` session.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DrawSummary {
    pub lines: usize,
    pub failures: usize,
    /// A point still waiting for its partner when input ended.
    pub leftover: Option<Position>,
    pub obstacles: usize,
}

impl DrawSummary {
    pub fn record(&mut self, event: &DispatchEvent) {
        match event {
            DispatchEvent::LineCreated { .. } => self.lines += 1,
            DispatchEvent::PathFindingFailed { .. } => self.failures += 1,
            _ => {}
        }
    }

    pub fn format(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string(&serde_json::json!({
                "event": "summary",
                "summary": self,
            })),
            OutputFormat::Text => {
                let mut text = format!(
                    "{} line(s) drawn, {} failed, {} blocked cells",
                    self.lines, self.failures, self.obstacles
                );
                if let Some(point) = self.leftover {
                    text.push_str(&format!("; {point} is still waiting for an end point"));
                }
                Ok(text)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Blocked,
    Line(usize),
    Endpoint(usize),
}

/// ASCII rendering of the grid and every line drawn on it.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    marks: HashMap<Position, Mark>,
    lines: usize,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            marks: HashMap::new(),
            lines: 0,
        }
    }

    /// Whether the canvas is narrow enough to print.
    pub fn is_printable(&self) -> bool {
        self.width <= MAX_RENDER_WIDTH
    }

    /// Shade cells that are blocked without belonging to a line.
    pub fn mark_blocked<'a>(&mut self, cells: impl IntoIterator<Item = &'a Position>) {
        for cell in cells {
            self.marks.entry(*cell).or_insert(Mark::Blocked);
        }
    }

    pub fn draw_line(&mut self, path: &[Position]) {
        let index = self.lines;
        self.lines += 1;
        for cell in path {
            self.marks.insert(*cell, Mark::Line(index));
        }
        for cell in [path.first(), path.last()].into_iter().flatten() {
            self.marks.insert(*cell, Mark::Endpoint(index));
        }
    }

    /// Bytes to reserve for an uncoloured render, one extra column for newlines.
    fn capacity_hint(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width
            .saturating_add(1)
            .checked_mul(height)
            .map_or(RENDER_CAPACITY_LIMIT, |bytes| bytes.min(RENDER_CAPACITY_LIMIT))
    }

    pub fn render(&self, palette: &ColorPalette, unicode: bool) -> String {
        let (line_glyph, margin_glyph) = if unicode { ('█', '░') } else { ('#', ':') };
        let mut out = String::with_capacity(self.capacity_hint());

        for y in 0..self.height {
            for x in 0..self.width {
                match self.marks.get(&Position::new(x, y)) {
                    None => out.push('.'),
                    Some(Mark::Blocked) => {
                        out.push_str(palette.gray);
                        out.push(margin_glyph);
                        out.push_str(palette.reset);
                    }
                    Some(Mark::Line(index)) => {
                        out.push_str(palette.line(*index));
                        out.push(line_glyph);
                        out.push_str(palette.reset);
                    }
                    Some(Mark::Endpoint(_)) => {
                        out.push_str(palette.endpoint);
                        out.push('o');
                        out.push_str(palette.reset);
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
