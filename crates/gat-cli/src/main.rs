//! gatviz CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gat_viz::{GatResults, TrainTimeSelector};
use gat_viz_render::{
    ChanceOption, Figure, MatrixOptions, SliceOptions, VizConfig, plot_gat_matrix, plot_gat_slice,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gatviz")]
#[command(about = "gatviz - Generalization-across-time decoding plots")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Visualization config (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Built-in theme (classic, paper, minimal)
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train x test score matrix
    Matrix {
        /// Input GAT results (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output image; format from the extension (svg, png, pdf)
        #[arg(short, long)]
        output: PathBuf,

        /// Plot title
        #[arg(long)]
        title: Option<String>,

        /// Lower end of the color scale. Defaults to the smallest score.
        #[arg(long, allow_hyphen_values = true)]
        vmin: Option<f64>,

        /// Upper end of the color scale. Defaults to the largest score.
        #[arg(long, allow_hyphen_values = true)]
        vmax: Option<f64>,

        /// Time limits: test_min test_max train_min train_max
        #[arg(long, num_args = 4, allow_hyphen_values = true, value_names = ["TEST_MIN", "TEST_MAX", "TRAIN_MIN", "TRAIN_MAX"])]
        tlim: Option<Vec<f64>>,

        /// Colormap (RdBu_r, viridis, magma, Greys, coolwarm; `_r` reverses)
        #[arg(long)]
        cmap: Option<String>,

        #[arg(long)]
        no_colorbar: bool,

        #[arg(long)]
        no_xlabel: bool,

        #[arg(long)]
        no_ylabel: bool,
    },

    /// Diagonal or single-classifier score curve
    Slice {
        /// Input GAT results (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output image; format from the extension (svg, png, pdf)
        #[arg(short, long)]
        output: PathBuf,

        /// `diagonal` or the training time of one classifier
        #[arg(long, default_value = "diagonal", allow_hyphen_values = true)]
        train_time: String,

        /// Plot title
        #[arg(long)]
        title: Option<String>,

        /// X range start (used only together with --xmax)
        #[arg(long, allow_hyphen_values = true)]
        xmin: Option<f64>,

        /// X range end (used only together with --xmin)
        #[arg(long, allow_hyphen_values = true)]
        xmax: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        ymin: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        ymax: Option<f64>,

        /// Line color (matplotlib letter, name or #rrggbb)
        #[arg(long)]
        color: Option<String>,

        /// Chance line: auto, off, or a level
        #[arg(long, default_value = "auto")]
        chance: String,

        #[arg(long)]
        no_xlabel: bool,

        #[arg(long)]
        no_ylabel: bool,

        #[arg(long)]
        no_legend: bool,
    },

    /// Matrix and diagonal side by side
    Report {
        /// Input GAT results (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output image; format from the extension (svg, png, pdf)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Summary of a results document (pretty JSON)
    Inspect {
        /// Input GAT results (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref(), cli.theme.as_deref())?;

    match cli.command {
        Commands::Matrix {
            input,
            output,
            title,
            vmin,
            vmax,
            tlim,
            cmap,
            no_colorbar,
            no_xlabel,
            no_ylabel,
        } => {
            let tlim = match tlim.as_deref() {
                None => None,
                Some(&[a, b, c, d]) => Some([a, b, c, d]),
                Some(other) => anyhow::bail!("--tlim takes 4 values, got {}", other.len()),
            };
            let opts = MatrixOptions {
                title,
                vmin,
                vmax,
                tlim,
                cmap,
                show: false,
                colorbar: !no_colorbar,
                xlabel: !no_xlabel,
                ylabel: !no_ylabel,
            };
            cmd_matrix(&input, &output, &opts, &config)
        }
        Commands::Slice {
            input,
            output,
            train_time,
            title,
            xmin,
            xmax,
            ymin,
            ymax,
            color,
            chance,
            no_xlabel,
            no_ylabel,
            no_legend,
        } => {
            let opts = SliceOptions {
                train_time: train_time.parse::<TrainTimeSelector>()?,
                title,
                xmin,
                xmax,
                ymin,
                ymax,
                show: false,
                color,
                xlabel: !no_xlabel,
                ylabel: !no_ylabel,
                legend: !no_legend,
                chance: chance.parse::<ChanceOption>()?,
            };
            cmd_slice(&input, &output, &opts, &config)
        }
        Commands::Report { input, output } => cmd_report(&input, &output, &config),
        Commands::Inspect { input, output } => cmd_inspect(&input, output.as_ref()),
        Commands::Version => {
            println!("gatviz {}", gat_viz::VERSION);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, theme: Option<&str>) -> Result<VizConfig> {
    let yaml = match path {
        Some(p) => Some(
            std::fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?,
        ),
        None => None,
    };
    Ok(gat_viz_render::resolve_config(yaml.as_deref(), theme)?)
}

fn load_results(input: &Path) -> Result<GatResults> {
    let results = gat_viz::load_results(input)
        .with_context(|| format!("loading results {}", input.display()))?;
    results.validate()?;
    Ok(results)
}

fn save(fig: &Figure, output: &Path) -> Result<()> {
    fig.save(output).with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(output = %output.display(), panels = fig.n_panels(), "figure saved");
    Ok(())
}

fn cmd_matrix(input: &Path, output: &Path, opts: &MatrixOptions, config: &VizConfig) -> Result<()> {
    let results = load_results(input)?;
    let fig = plot_gat_matrix(&results, opts, None, config)?;
    save(&fig, output)
}

fn cmd_slice(input: &Path, output: &Path, opts: &SliceOptions, config: &VizConfig) -> Result<()> {
    let results = load_results(input)?;
    let fig = plot_gat_slice(&results, opts, None, config)?;
    save(&fig, output)
}

fn cmd_report(input: &Path, output: &Path, config: &VizConfig) -> Result<()> {
    let results = load_results(input)?;
    let mut fig = Figure::subplots(config.clone(), 1, 2)?;

    let matrix = MatrixOptions {
        title: Some("Generalization across time".into()),
        show: false,
        ..Default::default()
    };
    plot_gat_matrix(&results, &matrix, Some(&mut fig), config)?;

    fig.select(1)?;
    let diagonal =
        SliceOptions { title: Some("Diagonal decoding".into()), show: false, ..Default::default() };
    plot_gat_slice(&results, &diagonal, Some(&mut fig), config)?;
    save(&fig, output)
}

fn cmd_inspect(input: &Path, output: Option<&PathBuf>) -> Result<()> {
    let results = load_results(input)?;
    let summary = results.summary()?;
    write_json(output, serde_json::to_value(&summary)?)
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
