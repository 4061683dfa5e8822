//! `mpq` - a small command-line driver around the `mopaq` archive library.
//!
//! This binary is an external collaborator of the core archive-reading
//! engine: it owns flag parsing, human-readable table printing, and
//! filesystem extraction, none of which the library itself performs.

mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mopaq::Archive;

/// Read, inspect, and extract MPQ archives.
#[derive(Parser)]
#[command(name = "mpq", version, about = "Read, inspect, and extract MPQ archives", long_about = None)]
struct Cli {
    /// Path to the MPQ archive.
    archive: PathBuf,

    /// Print the archive header (and user-data header, if present).
    #[arg(short = 'I', long = "header")]
    header: bool,

    /// Print the hash table.
    #[arg(short = 'H', long = "hash-table")]
    hash_table: bool,

    /// Print the block table.
    #[arg(short = 'b', long = "block-table")]
    block_table: bool,

    /// Skip reading the `(listfile)` member.
    #[arg(short = 's', long = "skip-listfile")]
    skip_listfile: bool,

    /// List the files named in the archive's listfile.
    #[arg(short = 't', long = "list")]
    list: bool,

    /// Extract all listed files to disk, under a directory named after the
    /// archive's basename.
    #[arg(short = 'x', long = "extract")]
    extract: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mpq: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let archive = Archive::open_with_listfile(&cli.archive, !cli.skip_listfile)
        .with_context(|| format!("failed to open {}", cli.archive.display()))?;

    if cli.header {
        output::print_header(&archive);
    }

    if cli.hash_table {
        output::print_hash_table(&archive);
    }

    if cli.block_table {
        output::print_block_table(&archive);
    }

    if cli.list {
        output::print_file_list(&archive)?;
    }

    if cli.extract {
        extract_all(&archive, &cli.archive)?;
    }

    Ok(())
}

/// Extract every file named in the archive's listfile into a directory
/// named after `archive_path`'s basename, creating subdirectories as
/// needed for entries whose names contain MPQ's backslash separator.
fn extract_all(archive: &Archive, archive_path: &Path) -> Result<()> {
    let names = archive
        .files()
        .context("archive has no listfile; nothing to extract (try without -s)")?;

    let dest_root = archive_path
        .file_stem()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("extracted"));
    std::fs::create_dir_all(&dest_root)
        .with_context(|| format!("failed to create output directory {}", dest_root.display()))?;

    let mut extracted = 0usize;
    for name in names {
        let relative = name.replace('\\', "/");
        let dest_path = dest_root.join(&relative);

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        match archive.read_file(name, false)? {
            Some(data) => {
                std::fs::write(&dest_path, data)
                    .with_context(|| format!("failed to write {}", dest_path.display()))?;
                println!("extracted {name}");
                extracted += 1;
            }
            None => {
                eprintln!("mpq: skipping {name} (not found or not live in archive)");
            }
        }
    }

    println!("extracted {extracted} of {} files to {}", names.len(), dest_root.display());
    Ok(())
}
