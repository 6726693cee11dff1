use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gridlines_cli::commands::draw::{handle_draw_command, DrawCommandArgs};
use gridlines_cli::commands::find::handle_find_command;
use gridlines_cli::commands::{resolve_grid, GridOverrides};
use gridlines_cli::logging::{init_logging, LoggingConfig};
use gridlines_cli::output::OutputFormat;
use gridlines_lib::Position;

#[derive(Parser, Debug)]
#[command(author, version, about = "Draw non-crossing grid lines with A* pathfinding")]
struct Cli {
    /// Grid width in cells (default 1280).
    #[arg(long, global = true)]
    width: Option<i32>,

    /// Grid height in cells (default 720).
    #[arg(long, global = true)]
    height: Option<i32>,

    /// JSON file with `width`, `height` and `search_delay_ms`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Artificial delay added to every search, in milliseconds.
    #[arg(long = "delay-ms", global = true)]
    delay_ms: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log engine activity to stderr at debug level. A set RUST_LOG takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a single path between two points on an empty grid.
    Find {
        /// Start point as x,y.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: Position,
        /// End point as x,y.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: Position,
    },
    /// Draw lines between consecutive pairs of points, one search at a time.
    Draw {
        /// Points as x,y, paired in order. Put points with negative
        /// coordinates after `--`.
        points: Vec<Position>,
        /// Read additional points from a file (`-` for stdin), one x,y per line.
        #[arg(long = "points-file")]
        points_file: Option<PathBuf>,
        /// Print the canvas with every drawn line when done.
        #[arg(long)]
        render: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    init_logging(&logging);

    let overrides = GridOverrides {
        width: cli.width,
        height: cli.height,
        delay_ms: cli.delay_ms,
    };
    let config = resolve_grid(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Command::Find { from, to } => {
            let output = handle_find_command(config, from, to, cli.format)?;
            println!("{output}");
        }
        Command::Draw {
            points,
            points_file,
            render,
        } => {
            let args = DrawCommandArgs {
                points,
                points_file,
                render,
            };
            handle_draw_command(config, &args, cli.format).await?;
        }
    }

    Ok(())
}
