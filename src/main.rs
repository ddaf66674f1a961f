use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use plainbmp::preview::{Preview, PreviewOptions};
use plainbmp::{checkerboard, draw_line, load, save, Image};

/// Uncompressed BMP toolbox: make test images, preview them, draw on them
#[derive(Parser)]
#[command(name = "plainbmp", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a black and white checkerboard BMP
    Generate {
        /// Width in pixels
        #[arg(short = 'W', long, default_value = "64")]
        width: u32,
        /// Height in pixels
        #[arg(short = 'H', long, default_value = "32")]
        height: u32,
        /// Checker square size in pixels
        #[arg(long, default_value = "4")]
        cell: u32,
        /// Output file (parent directories are created)
        #[arg(short, long, default_value = "test_images/generated.bmp")]
        output: PathBuf,
    },
    /// Print a text preview of a BMP
    Show {
        input: PathBuf,
        #[command(flatten)]
        preview: PreviewArgs,
    },
    /// Draw both diagonals of a BMP and save the result
    Cross {
        input: PathBuf,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        /// Print previews before and after drawing
        #[arg(long)]
        preview: bool,
        #[command(flatten)]
        chars: PreviewArgs,
    },
    /// Print the geometry of a BMP
    Info { input: PathBuf },
}

#[derive(clap::Args)]
struct PreviewArgs {
    /// Character for dark pixels
    #[arg(long, default_value = "#")]
    dark: char,
    /// Character for light pixels
    #[arg(long, default_value = " ")]
    light: char,
    /// Highest red, green and blue value still counted as dark
    #[arg(long, default_value = "10")]
    threshold: u8,
}

impl From<&PreviewArgs> for PreviewOptions {
    fn from(a: &PreviewArgs) -> Self {
        Self {
            dark: a.dark,
            light: a.light,
            threshold: a.threshold,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            width,
            height,
            cell,
            output,
        } => cmd_generate(width, height, cell, &output),
        Command::Show { input, preview } => cmd_show(&input, &(&preview).into()),
        Command::Cross {
            input,
            output,
            preview,
            chars,
        } => cmd_cross(&input, &output, preview.then(|| (&chars).into())),
        Command::Info { input } => cmd_info(&input),
    }
}

fn open(path: &Path) -> Result<Image> {
    load(path).with_context(|| format!("failed to load BMP: {}", path.display()))
}

fn cmd_generate(width: u32, height: u32, cell: u32, output: &Path) -> Result<()> {
    let img = checkerboard(width, height, cell).context("bad checkerboard geometry")?;
    if let Some(dir) = output.parent().filter(|x| !x.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    save(&img, output).with_context(|| format!("writing {}", output.display()))?;
    info!("generated {width}x{height} test image at {}", output.display());
    Ok(())
}

fn cmd_show(input: &Path, opts: &PreviewOptions) -> Result<()> {
    let img = open(input)?;
    println!("{} ({}x{}):", input.display(), img.width(), img.height());
    print!("{}", Preview::new(&img, *opts));
    Ok(())
}

fn cmd_cross(input: &Path, output: &Path, preview: Option<PreviewOptions>) -> Result<()> {
    let mut img = open(input)?;
    if let Some(opts) = preview {
        println!("Original image ({}x{}):", img.width(), img.height());
        print!("{}", Preview::new(&img, opts));
    }

    // dimensions are at most i32::MAX, so these fit
    let (w, h) = (img.width() as i32, img.height() as i32);
    draw_line(&mut img, 0, 0, w - 1, h - 1);
    draw_line(&mut img, w - 1, 0, 0, h - 1);

    if let Some(opts) = preview {
        println!("\nImage after drawing X:");
        print!("{}", Preview::new(&img, opts));
    }
    save(&img, output).with_context(|| format!("writing {}", output.display()))?;
    info!("saved modified image to {}", output.display());
    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let img = open(input)?;
    println!("file:      {}", input.display());
    println!("size:      {}x{}", img.width(), img.height());
    println!("depth:     {} bit", img.channels().bpp());
    println!("row order: {:?}", img.row_order());
    Ok(())
}
