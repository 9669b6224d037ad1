//! Palette baker CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use palette_baker::{
    bake, load_palette, palette_info, sort_palette, write_previews, BakeOptions, BakerConfig,
    LogFormat,
};
use renderer::{RowOrder, ThumbnailCache, PREVIEW_WIDTH};

#[derive(Parser, Debug)]
#[command(name = "palette-baker")]
#[command(about = "Sort gradient palettes and bake them into atlas textures")]
struct Args {
    /// Log level (default: PALETTE_LOG_LEVEL, then info)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the atlas layout of a palette as JSON
    Info {
        /// Palette document (.json, .yaml or .yml)
        palette: PathBuf,
    },

    /// Sort units by their perceptual order
    Sort {
        palette: PathBuf,

        /// Write the sorted units back to the document. The rewrite drops
        /// comments and stores every color as an {r, g, b, a} map.
        #[arg(long)]
        write: bool,
    },

    /// Render the palette atlas to a PNG
    Bake {
        palette: PathBuf,

        /// Output PNG (default: <output dir>/<palette name>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the document's unit order
        #[arg(long)]
        no_sort: bool,

        /// Row order of the encoded image
        #[arg(long, value_enum, default_value_t = RowOrderArg::BottomUp)]
        row_order: RowOrderArg,
    },

    /// Write a preview strip PNG for every unit
    Preview {
        palette: PathBuf,

        /// Output directory (default: <output dir>/<palette name>-previews)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Strip width in pixels
        #[arg(
            long,
            default_value_t = PREVIEW_WIDTH as u32,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        width: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RowOrderArg {
    BottomUp,
    TopDown,
}

impl From<RowOrderArg> for RowOrder {
    fn from(arg: RowOrderArg) -> Self {
        match arg {
            RowOrderArg::BottomUp => RowOrder::BottomUp,
            RowOrderArg::TopDown => RowOrder::TopDown,
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = BakerConfig::from_env().with_log_level(args.log_level.clone());

    init_tracing(&config)?;

    match args.command {
        Command::Info { palette } => {
            let loaded = load_palette(&palette)?;
            let info = palette_info(&loaded.palette);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Sort { palette, write } => {
            let mut loaded = load_palette(&palette)?;
            for row in sort_palette(&mut loaded.palette) {
                println!("{:>3}  {:<24} {:>12.3}", row.position, row.name, row.order);
            }
            if write {
                loaded.save()?;
            }
        }
        Command::Bake {
            palette,
            output,
            no_sort,
            row_order,
        } => {
            let loaded = load_palette(&palette)?;
            let output = output.unwrap_or_else(|| {
                config
                    .output_dir
                    .join(format!("{}.png", loaded.display_name()))
            });
            let outcome = bake(
                &loaded.palette,
                &BakeOptions {
                    output,
                    sort: !no_sort,
                    row_order: row_order.into(),
                },
            )?;
            println!("{}", outcome.output.display());
        }
        Command::Preview {
            palette,
            output,
            width,
        } => {
            let loaded = load_palette(&palette)?;
            let dir = output.unwrap_or_else(|| {
                config
                    .output_dir
                    .join(format!("{}-previews", loaded.display_name()))
            });
            let mut cache = ThumbnailCache::new(width as usize);
            for path in write_previews(&loaded.palette, &dir, &mut cache)? {
                println!("{}", path.display());
            }
        }
    }

    info!("Done");
    Ok(())
}

fn init_tracing(config: &BakerConfig) -> Result<()> {
    let level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so command output stays pipeable
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish())?,
    }

    Ok(())
}
