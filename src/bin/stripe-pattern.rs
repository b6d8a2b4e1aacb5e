use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use stripe_pattern_overlay::{
    default_output_path, is_supported_image, OverlayEngine, PatternId, PatternSelection,
};

/// Fixed archive name for batch output, matching the download artifact
/// handed to callers.
const ARCHIVE_NAME: &str = "processed_images.zip";

#[derive(Parser)]
#[command(
    name = "stripe-pattern",
    about = "Overlay stripe texture masks onto images",
    version,
    after_help = "Simple usage: stripe-pattern photo.png  (applies pattern 1, writes patterned_photo.jpg)\n\n\
                  Multiple inputs or --all-patterns produce a processed_images.zip archive\n\
                  with entries named patterned_image_<n>.jpg in submission order."
)]
struct Cli {
    /// Input image files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Pattern id to apply (1=vertical, 2=diagonal, 3=horizontal, 4=vertical concentrated)
    #[arg(short, long, default_value = "1", conflicts_with = "all_patterns")]
    pattern: u8,

    /// Apply every available pattern to every input
    #[arg(short, long)]
    all_patterns: bool,

    /// Output path (default: patterned_<name>.jpg, or processed_images.zip for batches)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let selection = if cli.all_patterns {
        PatternSelection::All
    } else {
        match PatternId::from_id(cli.pattern) {
            Ok(id) => PatternSelection::One(id),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    };

    let inputs = match expand_inputs(&cli.inputs) {
        Ok(files) => files,
        Err(msg) => {
            eprintln!("Error: {msg}");
            process::exit(1);
        }
    };

    if inputs.is_empty() {
        eprintln!("Error: no images supplied; upload one or more images to start");
        process::exit(1);
    }

    let engine = match OverlayEngine::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Fatal: Failed to initialize engine: {e}");
            process::exit(1);
        }
    };

    if cli.verbose && !cli.quiet {
        match selection {
            PatternSelection::One(id) => eprintln!("Applying pattern {}: {}", id.id(), id.label()),
            PatternSelection::All => eprintln!("Applying all {} patterns", PatternId::ALL.len()),
        }
    }

    // A single file with a single pattern downloads directly; everything
    // else becomes an archive.
    if let (1, PatternSelection::One(id)) = (inputs.len(), selection) {
        let input = &inputs[0];
        let output = cli.output.unwrap_or_else(|| default_output_path(input));

        let result = engine.process_file(input, &output, id);
        let filename = result.path.file_name().map_or_else(
            || result.path.display().to_string(),
            |f| f.to_string_lossy().to_string(),
        );

        if result.success {
            if !cli.quiet {
                eprintln!("[OK] {filename}: {} -> {}", result.message, output.display());
            }
        } else {
            eprintln!("[FAIL] {filename}: {}", result.message);
            process::exit(1);
        }
        return;
    }

    let output = cli.output.unwrap_or_else(|| PathBuf::from(ARCHIVE_NAME));
    match engine.process_files_to_archive(&inputs, selection, &output) {
        Ok(()) => {
            if !cli.quiet {
                let patterns = selection.pattern_ids().len();
                eprintln!(
                    "[OK] {} images x {} pattern(s) -> {}",
                    inputs.len(),
                    patterns,
                    output.display()
                );
            }
        }
        Err(e) => {
            eprintln!("[FAIL] {e}");
            process::exit(1);
        }
    }
}

/// Expand inputs: directories become their supported image files sorted
/// by name; plain files pass through untouched.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(supported_files_in(input)?);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            return Err(format!("input path does not exist: {}", input.display()));
        }
    }
    Ok(files)
}

fn supported_files_in(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("failed to read directory {}: {e}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();
    files.sort();
    Ok(files)
}
