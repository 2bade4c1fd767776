use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_stylize::{
    DitherMethod, PaletteName, QuantizeMethod, QuantizeSpace, Rgb, Style,
};
use pixelize::models::{AppConfig, Overrides};
use pixelize::services::{ProgressReporter, RenderService};

#[derive(Parser)]
#[command(name = "pixelize")]
#[command(about = "Pixelize - turn images into superpixel pixel art")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stylize one PNG image
    Render(RenderArgs),
    /// Render every style side by side in one PNG
    Compare {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Superpixel / grid block size in pixels
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=256))]
        pixel_size: Option<u16>,

        /// Target number of colors
        #[arg(long, value_parser = clap::value_parser!(u16).range(2..=256))]
        color_count: Option<u16>,
    },
    /// List preset palettes as JSON
    Palettes {
        /// Print the colors of one palette instead of the list of names
        #[arg(long)]
        colors: Option<String>,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Input PNG file path
    #[arg(short, long, required_unless_present = "pipe_mode")]
    input: Option<PathBuf>,

    /// Output PNG file path
    #[arg(short, long, required_unless_present = "pipe_mode")]
    output: Option<PathBuf>,

    /// Read PNG bytes from stdin and write PNG bytes to stdout
    #[arg(long)]
    pipe_mode: bool,

    /// YAML configuration file (command-line flags take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// basic, quantized, dithered, retro or monochrome
    #[arg(long)]
    style: Option<String>,

    /// Legacy algorithm name (basic, average, median, slic); --style wins
    #[arg(long)]
    algorithm: Option<String>,

    /// Superpixel / grid block size in pixels
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=256))]
    pixel_size: Option<u16>,

    /// Target number of colors
    #[arg(long, value_parser = clap::value_parser!(u16).range(2..=256))]
    color_count: Option<u16>,

    /// Preset palette name (see `palettes`), or "none"
    #[arg(long)]
    palette: Option<String>,

    /// Fit the preset palette to --color-count entries
    #[arg(long)]
    resample_palette: bool,

    /// none, floyd_steinberg, atkinson or bayer
    #[arg(long)]
    dithering: Option<String>,

    /// Dither blend strength (0-1)
    #[arg(long)]
    dither_strength: Option<f32>,

    /// SLIC compactness
    #[arg(long, alias = "slic-weight")]
    compactness: Option<f64>,

    /// SLIC iteration cap
    #[arg(long)]
    slic_iters: Option<usize>,

    /// Average exact blocks instead of superpixels
    #[arg(long)]
    align_grid: bool,

    /// Quantization distance space: RGB or LAB
    #[arg(long, value_parser = parse_quantize_space)]
    quantize_space: Option<QuantizeSpace>,

    /// Palette derivation: kmeans or median_cut
    #[arg(long, value_parser = parse_quantize_method)]
    quantize_method: Option<QuantizeMethod>,

    /// Brightness factor (0.1-2.0)
    #[arg(long)]
    brightness: Option<f32>,

    /// Contrast factor (0.1-3.0)
    #[arg(long)]
    contrast: Option<f32>,

    /// Saturation factor (0-2.0)
    #[arg(long)]
    saturation: Option<f32>,

    /// Blend with a Gaussian blur after stylizing (0-1)
    #[arg(long)]
    edge_smoothing: Option<f32>,

    /// Unsharp-mask strength after stylizing (0-1)
    #[arg(long)]
    edge_harden: Option<f32>,

    /// Overlay inverted edges for a cartoon look
    #[arg(long)]
    cartoon_effect: bool,

    /// Draw an outline ring around the block grid
    #[arg(long)]
    edge_outline: bool,

    /// Outline thickness in pixels
    #[arg(long)]
    edge_outline_thickness: Option<usize>,

    /// Outline color as R,G,B or #rrggbb
    #[arg(long)]
    edge_outline_color: Option<Rgb>,

    /// Jitter outline cells with this seed
    #[arg(long)]
    outline_jitter_seed: Option<u64>,

    /// Draw grid lines on block boundaries
    #[arg(long)]
    show_grid: bool,

    /// JSON progress file, rewritten at each milestone
    #[arg(long)]
    progress_file: Option<PathBuf>,
}

impl RenderArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            style: self
                .style
                .as_deref()
                .map(Style::from_name)
                .or_else(|| self.algorithm.as_deref().map(Style::from_algorithm)),
            pixel_size: self.pixel_size.map(usize::from),
            color_count: self.color_count.map(usize::from),
            palette: self.palette.as_deref().map(PaletteName::from_name),
            dithering: self.dithering.as_deref().map(DitherMethod::from_name),
            dither_strength: self.dither_strength,
            compactness: self.compactness,
            slic_iters: self.slic_iters,
            align_grid: self.align_grid,
            quantize_space: self.quantize_space,
            quantize_method: self.quantize_method,
            brightness: self.brightness,
            contrast: self.contrast,
            saturation: self.saturation,
            edge_smoothing: self.edge_smoothing,
            edge_harden: self.edge_harden,
            cartoon: self.cartoon_effect,
            resample_palette: self.resample_palette,
            edge_outline: self.edge_outline,
            edge_outline_thickness: self.edge_outline_thickness,
            edge_outline_color: self.edge_outline_color,
            outline_jitter_seed: self.outline_jitter_seed,
            show_grid: self.show_grid,
        }
    }
}

fn parse_quantize_space(s: &str) -> Result<QuantizeSpace, String> {
    match s.to_ascii_lowercase().as_str() {
        "rgb" => Ok(QuantizeSpace::Rgb),
        "lab" => Ok(QuantizeSpace::Lab),
        _ => Err(format!("unknown quantize space '{s}' (expected RGB or LAB)")),
    }
}

fn parse_quantize_method(s: &str) -> Result<QuantizeMethod, String> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "kmeans" | "k_means" => Ok(QuantizeMethod::KMeans),
        "median_cut" | "mediancut" => Ok(QuantizeMethod::MedianCut),
        _ => Err(format!(
            "unknown quantize method '{s}' (expected kmeans or median_cut)"
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr: stdout may carry PNG bytes in pipe mode
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelize=info,pixel_stylize=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match cli.command {
        Commands::Render(args) => run_render_command(&args),
        Commands::Compare {
            input,
            output,
            config,
            pixel_size,
            color_count,
        } => run_compare_command(&input, &output, config, pixel_size, color_count),
        Commands::Palettes { colors } => run_palettes_command(colors.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("ERROR:{e:#}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Stylize one image from a file or from stdin
fn run_render_command(args: &RenderArgs) -> anyhow::Result<()> {
    let start = Instant::now();
    let progress = ProgressReporter::new(args.progress_file.clone());
    progress.report(5, "Starting");

    let mut config = load_config(args.config.as_deref())?;
    config.apply(&args.overrides());
    let service = RenderService::new(config.into_config())?;

    if args.pipe_mode {
        let mut input = Vec::new();
        std::io::stdin()
            .read_to_end(&mut input)
            .context("Failed to read PNG from stdin")?;
        let png = service.render_bytes(&input, &progress)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&png).context("Failed to write PNG to stdout")?;
        stdout.flush()?;

        let elapsed = start.elapsed().as_secs_f64();
        progress.report(100, &format!("Done ({elapsed:.2}s)"));
        eprintln!("SUCCESS:PIPE_MODE");
        eprintln!("TIME:{elapsed:.2}");
        return Ok(());
    }

    let (Some(input), Some(output)) = (&args.input, &args.output) else {
        anyhow::bail!("--input and --output are required without --pipe-mode");
    };
    service
        .render_file(input, output, &progress)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    let elapsed = start.elapsed().as_secs_f64();
    progress.report(100, &format!("Done ({elapsed:.2}s)"));
    println!("SUCCESS:{}", output.display());
    println!("TIME:{elapsed:.2}");
    Ok(())
}

/// Render every style of one image into a comparison grid
fn run_compare_command(
    input: &Path,
    output: &Path,
    config: Option<PathBuf>,
    pixel_size: Option<u16>,
    color_count: Option<u16>,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut app_config = load_config(config.as_deref())?;
    app_config.apply(&Overrides {
        pixel_size: pixel_size.map(usize::from),
        color_count: color_count.map(usize::from),
        ..Overrides::default()
    });
    let service = RenderService::new(app_config.into_config())?;
    service
        .compare_file(input, output)
        .with_context(|| format!("Failed to compare styles for {}", input.display()))?;

    println!("SUCCESS:{}", output.display());
    println!("TIME:{:.2}", start.elapsed().as_secs_f64());
    Ok(())
}

/// Print preset palette names, or one palette's colors, as JSON
fn run_palettes_command(name: Option<&str>) -> anyhow::Result<()> {
    let json = match name {
        None => serde_json::json!({
            "palettes": PaletteName::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        }),
        Some(name) => {
            let palette = PaletteName::lookup(name)
                .and_then(PaletteName::palette)
                .with_context(|| format!("Unknown palette: {name}"))?;
            serde_json::json!({
                "name": name,
                "colors": palette.colors().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            })
        }
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
