use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[path = "ruhuff/progress.rs"]
mod progress;
use indicatif::HumanBytes;
use progress::ProgressMonitor;

/// Huffman compress and decompress text files.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log more, can be repeated (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a UTF-8 text file
    Compress {
        input: PathBuf,
        /// Defaults to `<input stem>_compressed.txt` next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore the text from a compressed file
    Decompress {
        input: PathBuf,
        /// Defaults to `<input stem>_decompressed.txt` next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(level)
        .init();

    match cli.command {
        Commands::Compress { input, output } => {
            let output = output.unwrap_or_else(|| derived_path(&input, "compressed"));
            compress(&input, &output)
        }
        Commands::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| derived_path(&input, "decompressed"));
            decompress(&input, &output)
        }
    }
}

/// `dir/name.ext` becomes `dir/name_<suffix>.txt`
fn derived_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_{suffix}.txt"))
}

fn open_monitored(
    path: &Path,
    action: &'static str,
) -> color_eyre::Result<ProgressMonitor<BufReader<File>>> {
    let file = File::open(path).wrap_err_with(|| format!("failed to open {path:?}"))?;
    let size = file
        .metadata()
        .wrap_err_with(|| format!("failed to read metadata of {path:?}"))?
        .len();
    Ok(ProgressMonitor::new(
        BufReader::new(file),
        size as usize,
        action,
    ))
}

fn create_output(path: &Path) -> color_eyre::Result<BufWriter<File>> {
    let file = File::create(path).wrap_err_with(|| format!("failed to create {path:?}"))?;
    Ok(BufWriter::new(file))
}

fn compress(input: &Path, output: &Path) -> color_eyre::Result<()> {
    let source = open_monitored(input, "compressing")?;
    let mut drain = create_output(output)?;
    let report = ruhuff::compress_stream(source, &mut drain)
        .wrap_err_with(|| format!("failed to compress {input:?}"))?;
    drain
        .flush()
        .wrap_err_with(|| format!("failed to write {output:?}"))?;

    info!("wrote {}", console::style(output.display()).bold());
    info!("original text: {} symbols", report.text_len);
    info!(
        "compressed bitstream line: {}",
        HumanBytes(report.bitstream_line_len as u64)
    );
    info!("compressed file: {}", HumanBytes(report.artifact_len as u64));
    Ok(())
}

fn decompress(input: &Path, output: &Path) -> color_eyre::Result<()> {
    let source = open_monitored(input, "decompressing")?;
    let mut drain = create_output(output)?;
    let report = ruhuff::decompress_stream(source, &mut drain)
        .wrap_err_with(|| format!("failed to decompress {input:?}"))?;
    drain
        .flush()
        .wrap_err_with(|| format!("failed to write {output:?}"))?;

    info!("wrote {}", console::style(output.display()).bold());
    info!("compressed file: {}", HumanBytes(report.artifact_len as u64));
    info!("decompressed text: {} symbols", report.text_len);
    Ok(())
}

#[test]
fn derived_names() {
    assert_eq!(
        derived_path(Path::new("texts/moby.txt"), "compressed"),
        Path::new("texts/moby_compressed.txt")
    );
    assert_eq!(
        derived_path(Path::new("moby_compressed.txt"), "decompressed"),
        Path::new("moby_compressed_decompressed.txt")
    );
}
