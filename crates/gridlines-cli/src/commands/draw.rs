//! Draw command handler: feeds points through a [`Dispatcher`] the way a
//! canvas window feeds clicks, printing every notification as it arrives.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;

use gridlines_lib::{DispatchEvent, Dispatcher, GridConfig, PathFinder, Position};

use crate::output::{format_event, Canvas, DrawSummary, OutputFormat, MAX_RENDER_WIDTH};
use crate::terminal::{supports_unicode, ColorPalette};

/// Arguments for the draw command.
#[derive(Debug, Clone, Default)]
pub struct DrawCommandArgs {
    /// Points given directly on the command line.
    pub points: Vec<Position>,
    /// File with one `x,y` point per line, or `-` for stdin.
    pub points_file: Option<PathBuf>,
    /// Print the canvas after all searches finished.
    pub render: bool,
}

/// Read `x,y` points, one per line. Blank lines and `#` comments are skipped.
pub fn read_points(reader: impl BufRead) -> Result<Vec<Position>> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read points")?;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let point = content
            .parse::<Position>()
            .with_context(|| format!("line {}", index + 1))?;
        points.push(point);
    }
    Ok(points)
}

fn load_points_file(path: &Path) -> Result<Vec<Position>> {
    if path == Path::new("-") {
        return read_points(io::stdin().lock());
    }
    let file =
        File::open(path).with_context(|| format!("failed to open points file {}", path.display()))?;
    read_points(BufReader::new(file))
        .with_context(|| format!("invalid points file {}", path.display()))
}

struct Session {
    format: OutputFormat,
    palette: ColorPalette,
    canvas: Canvas,
    summary: DrawSummary,
}

impl Session {
    fn flush(&mut self, events: &mut UnboundedReceiver<DispatchEvent>) -> Result<()> {
        while let Ok(event) = events.try_recv() {
            println!("{}", format_event(&event, self.format, &self.palette)?);
            self.summary.record(&event);
            if let DispatchEvent::LineCreated { path, .. } = &event {
                self.canvas.draw_line(path);
            }
        }
        Ok(())
    }
}

/// Handle the draw subcommand.
pub async fn handle_draw_command(
    config: GridConfig,
    args: &DrawCommandArgs,
    format: OutputFormat,
) -> Result<DrawSummary> {
    let mut points = args.points.clone();
    if let Some(path) = &args.points_file {
        points.extend(load_points_file(path)?);
    }
    if points.is_empty() {
        bail!("no points given; pass x,y values or --points-file");
    }

    let canvas = Canvas::new(config.width, config.height);
    if args.render && !canvas.is_printable() {
        bail!(
            "--render supports canvases up to {MAX_RENDER_WIDTH} columns wide, got {}",
            config.width
        );
    }

    let finder = PathFinder::from_config(config).context("failed to create pathfinder")?;
    let (mut dispatcher, mut events) = Dispatcher::new(finder, Handle::current());
    let mut session = Session {
        format,
        palette: ColorPalette::detect(),
        canvas,
        summary: DrawSummary::default(),
    };

    tracing::info!(points = points.len(), "submitting points");
    for point in &points {
        dispatcher.add_point(*point);
        session.flush(&mut events)?;
    }

    while dispatcher.process_next().await {
        session.flush(&mut events)?;
    }
    session.flush(&mut events)?;

    if points.len() % 2 == 1 {
        session.summary.leftover = points.last().copied();
    }
    if let Some(finder) = dispatcher.searcher() {
        session.summary.obstacles = finder.obstacle_count();
        session.canvas.mark_blocked(finder.obstacles());
    }

    println!("{}", session.summary.format(format)?);

    if args.render {
        match format {
            OutputFormat::Text => print!(
                "{}",
                session.canvas.render(&session.palette, supports_unicode())
            ),
            OutputFormat::Json => tracing::warn!("--render is ignored with --format json"),
        }
    }

    Ok(session.summary)
}
