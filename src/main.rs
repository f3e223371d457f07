use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bulk_import_lib::{import_folder, CommandImporter, FolderOptions};

#[derive(Debug, Parser)]
#[command(name = "bulk-import", about = "Batch CSV import for a point-of-sale host", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import every matching file in a folder through an importer command.
    Run {
        /// Folder containing the files to import.
        folder: PathBuf,
        /// Glob pattern selecting files inside the folder.
        #[arg(long, default_value = bulk_import_lib::import::DEFAULT_PATTERN)]
        pattern: String,
        /// Descend into subdirectories as well.
        #[arg(long)]
        recursive: bool,
        /// Leave processed files in place instead of archiving them.
        #[arg(long)]
        keep_files: bool,
        /// Name prefix for the timestamped archive directory.
        #[arg(long, default_value = bulk_import_lib::import::DEFAULT_ARCHIVE_PREFIX)]
        archive_prefix: String,
        /// Emit the full JSON report instead of the summary line.
        #[arg(long)]
        json: bool,
        /// Importer command run once per file; the file path is appended
        /// as the final argument and stdout must be an outcome JSON object.
        #[arg(last = true, required = true)]
        importer: Vec<String>,
    },
}

fn main() {
    bulk_import_lib::logging::init();

    let cli = Cli::parse();
    match handle_cli(cli.command) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(2);
        }
    }
}

fn handle_cli(command: Commands) -> Result<i32> {
    match command {
        Commands::Run {
            folder,
            pattern,
            recursive,
            keep_files,
            archive_prefix,
            json,
            importer,
        } => {
            let importer = CommandImporter::new(importer)?;
            let options = FolderOptions {
                recursive,
                pattern,
                move_processed: !keep_files,
                archive_prefix,
            };
            let report = import_folder(&folder, &importer, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary);
            }

            Ok(if report.success { 0 } else { 1 })
        }
    }
}
