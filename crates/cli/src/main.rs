use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hbc_engine::context::{NoopObserver, StageObserver, TracingObserver};
use hbc_engine::{decide_with_observer, load_media_file, load_raw_config, PluginResult, RawConfig};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "hbc")]
#[command(about = "HandBrake compression decision engine", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide a single media descriptor
    Decide {
        /// Probed media descriptor (JSON)
        #[arg(short, long, value_name = "FILE")]
        media: PathBuf,

        /// Plugin options (TOML or JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Dump the decision context before each stage
        #[arg(long)]
        debug: bool,
    },
    /// Decide every *.json media descriptor under a directory
    Batch {
        #[arg(short, long, value_name = "DIR")]
        dir: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Print the plugin descriptor as JSON
    Details,
}

fn run_one(path: &Path, raw: &RawConfig, debug: bool) -> Result<PluginResult> {
    let media = load_media_file(path)?;
    let mut observer: Box<dyn StageObserver> = if debug || raw.debug_requested() {
        Box::new(TracingObserver)
    } else {
        Box::new(NoopObserver)
    };
    Ok(decide_with_observer(&media, raw, observer.as_mut()))
}

fn print_result(path: &Path, result: &PluginResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    print!("{}", result.log);
    if result.should_process {
        println!(
            "HandBrakeCLI -i {:?} -o <output>{} {}",
            path, result.output_container, result.command_args
        );
    } else {
        println!("skip: {}", path.display());
    }
    Ok(())
}

fn find_descriptors(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let is_json = entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false);
                if is_json {
                    found.push(entry.into_path());
                }
            }
            Err(e) => warn!("Error walking {}: {}", dir.display(), e),
        }
    }
    found.sort();
    found
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Decide {
            media,
            config,
            json,
            debug,
        } => {
            let raw = load_raw_config(config.as_deref())?;
            let result = run_one(&media, &raw, debug)
                .with_context(|| format!("Failed to decide {}", media.display()))?;
            print_result(&media, &result, json)?;
        }
        Command::Batch { dir, config, json } => {
            if !dir.is_dir() {
                anyhow::bail!("{} is not a directory", dir.display());
            }
            let raw = load_raw_config(config.as_deref())?;
            let descriptors = find_descriptors(&dir);
            info!("Found {} media descriptors under {}", descriptors.len(), dir.display());

            let mut processed = 0usize;
            let mut skipped = 0usize;
            for path in &descriptors {
                match run_one(path, &raw, false) {
                    Ok(result) => {
                        if result.should_process {
                            processed += 1;
                        } else {
                            skipped += 1;
                        }
                        print_result(path, &result, json)?;
                    }
                    Err(e) => error!("Skipping {}: {:#}", path.display(), e),
                }
            }
            info!("{} to transcode, {} skipped", processed, skipped);
        }
        Command::Details => {
            println!(
                "{}",
                serde_json::to_string_pretty(hbc_engine::details::plugin_details())?
            );
        }
    }

    Ok(())
}
