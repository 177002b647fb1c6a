//! Command-line interface for generating batches of dungeons

use crate::graph::export::LabeledGraph;
use crate::io::configuration::{
    COARSE_SUFFIX, DEFAULT_ATTEMPTS, DEFAULT_CYCLE_STEPS, DEFAULT_HEIGHT, DEFAULT_SEED,
    DEFAULT_WIDTH, FINE_SUFFIX, GRAPH_SUFFIX, IMAGE_SUFFIX, JSON_SUFFIX,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::image::export_fine_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::pipeline::generator::{Dungeon, DungeonConfig, DungeonGenerator};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cyclegrid")]
#[command(
    author,
    version,
    about = "Generate dungeon layouts built around a single loop"
)]
/// Command-line arguments for the dungeon generator
pub struct Cli {
    /// Graph width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Graph height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random walk steps before the loop is closed
    #[arg(short = 'c', long, default_value_t = DEFAULT_CYCLE_STEPS)]
    pub cycle_steps: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of dungeons to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Seeds tried per dungeon before giving up
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Directory for rendered text, JSON and PNG output (stdout if omitted)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also print the fine tile grid when writing to stdout
    #[arg(short, long)]
    pub fine: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Generation parameters for the first seed
    pub const fn config(&self) -> DungeonConfig {
        DungeonConfig {
            width: self.width,
            height: self.height,
            cycle_steps: self.cycle_steps,
            seed: self.seed,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && self.output.is_some() && self.count > 1
    }

    /// Seed of attempt `attempt` for dungeon `index`
    ///
    /// Each dungeon owns a block of `attempts` consecutive seeds, so retries
    /// never reuse another dungeon's seed.
    pub const fn seed_for(&self, index: usize, attempt: usize) -> u64 {
        self.seed
            .wrapping_add((index * self.attempts) as u64)
            .wrapping_add(attempt as u64)
    }
}

/// Orchestrates batch generation with retries and output
pub struct DungeonProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl DungeonProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli
            .should_show_progress()
            .then(|| ProgressManager::new(cli.count));

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and write every requested dungeon
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a dungeon fails on
    /// every attempt, or output cannot be written
    pub fn process(&mut self) -> Result<()> {
        self.cli.config().validate()?;
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        }

        for index in 0..self.cli.count {
            let dungeon = self.generate_with_retries(index)?;

            match &self.cli.output {
                Some(dir) => {
                    write_dungeon(dir, &dungeon)?;
                }
                None => self.print_dungeon(&dungeon)?,
            }

            if let Some(ref pm) = self.progress_manager {
                pm.complete();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn generate_with_retries(&mut self, index: usize) -> Result<Dungeon> {
        let mut last_error = None;

        for attempt in 0..self.cli.attempts {
            let seed = self.cli.seed_for(index, attempt);
            if let Some(ref pm) = self.progress_manager {
                pm.attempt(seed);
            }

            let generator = DungeonGenerator::new(self.cli.config().with_seed(seed))?;
            match generator.generate() {
                Ok(dungeon) => return Ok(dungeon),
                Err(error) => {
                    log::warn!("seed {seed} failed: {error}");
                    last_error = Some(error);
                }
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.fail();
        }
        Err(last_error.unwrap_or_else(|| {
            invalid_parameter("attempts", &self.cli.attempts, &"must be at least 1")
        }))
    }

    fn print_dungeon(&self, dungeon: &Dungeon) -> Result<()> {
        let mut out = std::io::stdout().lock();
        let seed = dungeon.graph.seed().unwrap_or_default();

        let mut text = format!("seed {seed}\n{}\n{}", dungeon.graph, dungeon.coarse);
        if self.cli.fine {
            text.push('\n');
            text.push_str(&dungeon.fine.render());
        }
        writeln!(out, "{text}").map_err(|e| file_system_error("<stdout>", "write", e))
    }
}

/// Write every rendering of `dungeon` into `dir`, returning the written paths
///
/// Files are named `dungeon_<seed>` plus a per-layer suffix.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written
pub fn write_dungeon(dir: &Path, dungeon: &Dungeon) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| file_system_error(dir, "create directory", e))?;
    let stem = format!("dungeon_{}", dungeon.graph.seed().unwrap_or_default());
    let path_for = |suffix: &str| dir.join(format!("{stem}{suffix}"));

    let texts = [
        (path_for(GRAPH_SUFFIX), dungeon.graph.render()),
        (path_for(COARSE_SUFFIX), dungeon.coarse.render()),
        (path_for(FINE_SUFFIX), dungeon.fine.render()),
    ];
    let mut written = Vec::with_capacity(texts.len() + 2);
    for (path, text) in texts {
        fs::write(&path, text).map_err(|e| file_system_error(&path, "write rendering", e))?;
        written.push(path);
    }

    let json_path = path_for(JSON_SUFFIX);
    LabeledGraph::from_grid(&dungeon.graph).save(&json_path)?;
    written.push(json_path);

    let image_path = path_for(IMAGE_SUFFIX);
    export_fine_grid_as_png(&dungeon.fine, &image_path)?;
    written.push(image_path);

    Ok(written)
}
