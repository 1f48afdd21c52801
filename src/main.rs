use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use bmf_fonts::*;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let Some(bmf_path) = args.bmf_path.as_deref() else {
        if let Err(err) = Args::command().print_help() {
            eprintln!("Failed to print usage: {err}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let font = match convert_file(bmf_path, args.options(), io::stdout().lock()) {
        Ok(font) => font,
        Err(Error::Io(err)) => {
            eprintln!("Failed to convert {}: {err}", bmf_path.display());
            return ExitCode::FAILURE;
        }
        Err(err) => {
            // Malformed input produces no output and a clean exit.
            debug!(%err, path = %bmf_path.display(), "not a usable BMF file");
            return ExitCode::SUCCESS;
        }
    };

    if let Some(meta_path) = &args.meta {
        if let Err(err) = write_metadata(&font, meta_path) {
            eprintln!("Failed to write metadata to {}: {err}", meta_path.display());
            return ExitCode::FAILURE;
        }
    }

    if let Some(preview_path) = &args.preview {
        if let Err(err) = write_preview(&font, preview_path, args.preview_width, args.padding) {
            eprintln!("Failed to write preview to {}: {err}", preview_path.display());
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
