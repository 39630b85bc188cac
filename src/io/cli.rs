//! Command-line front end generating Wang tiles, index maps and palette maps

use crate::engine::SynthesisEngine;
use crate::engine::mode::Mode;
use crate::engine::native::NativeEngine;
use crate::engine::process::{BuildProfile, ProcessEngine, locate_engine};
use crate::io::configuration::{
    ARTIFACT_EXTENSION, COMPOSITE_SUFFIX, CONSTRAINTS_SUFFIX, CORNERS_SUFFIX,
    DEFAULT_ENGINE_TIMEOUT_SECS, TILES_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{load_square_texture, save_image};
use crate::pipeline::Pipeline;
use crate::pipeline::postprocess::index_with_alpha;
use crate::synthesis::SynthesisConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "wangtiles")]
#[command(
    author,
    version,
    about = "Generate Wang tiles from a square texture using graph cut stitching"
)]
/// Command-line arguments for the tile generator
pub struct Cli {
    /// What to generate
    #[command(subcommand)]
    pub command: Command,

    /// Engine selection shared by every subcommand
    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Generation subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesise a tile set from a square texture
    Tiles {
        /// Square source texture
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Outputs requested from the engine
        #[arg(short, long, value_enum, default_value_t = TileMode::Constraints)]
        mode: TileMode,

        /// Cut only this tile and keep the others as plain packed corners
        #[arg(short, long, value_name = "TILE")]
        debug_tile: Option<usize>,

        /// Also write the corner overlay composited onto the source
        #[arg(short, long)]
        composite: bool,
    },

    /// Generate the tile index map
    Index {
        /// Side of the square map in pixels
        resolution: u32,

        /// Output image path
        output: PathBuf,

        /// Write RGB without the red channel copied into alpha
        #[arg(long)]
        opaque: bool,
    },

    /// Generate the corner colour palette map
    Palette {
        /// Side of the square map in pixels
        resolution: u32,

        /// Output image path
        output: PathBuf,
    },
}

/// Tile outputs requested from the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TileMode {
    /// Flagless invocation, tile set only
    Legacy,
    /// Tile set only
    Tiles,
    /// Tile set and grey corner mask
    Corners,
    /// Tile set, corner pack with alpha and the constraint map
    Constraints,
}

impl From<TileMode> for Mode {
    fn from(mode: TileMode) -> Self {
        match mode {
            TileMode::Legacy => Self::LegacyTiles,
            TileMode::Tiles => Self::Tiles,
            TileMode::Corners => Self::TilesCorners,
            TileMode::Constraints => Self::TilesCornersConstraints,
        }
    }
}

/// Engine and logging options
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Engine executable; defaults to wtgcore beside this program
    #[arg(long, global = true, value_name = "PATH")]
    pub engine: Option<PathBuf>,

    /// Build profile whose engine is located when no path is given
    #[arg(long, global = true, value_enum, default_value_t = BuildProfile::Release)]
    pub build: BuildProfile,

    /// Run the engine inside this process instead of spawning it
    #[arg(long, global = true)]
    pub in_process: bool,

    /// Seconds before the engine is killed; 0 waits indefinitely
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_ENGINE_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log per-stage details
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl EngineArgs {
    /// Log level implied by the verbosity flags
    pub const fn log_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Engine timeout, `None` when disabled
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout))
        }
    }

    /// Build the selected engine
    ///
    /// # Errors
    ///
    /// Returns an error if the engine executable cannot be located
    pub fn build_engine(&self) -> Result<Box<dyn SynthesisEngine>> {
        if self.in_process {
            return Ok(Box::new(NativeEngine::new(SynthesisConfig {
                show_progress: !self.quiet,
                ..SynthesisConfig::default()
            })));
        }

        let executable = match &self.engine {
            Some(path) => path.clone(),
            None => locate_engine(self.build)?,
        };
        info!("using engine {}", executable.display());
        Ok(Box::new(
            ProcessEngine::new(executable).with_timeout(self.timeout()),
        ))
    }
}

/// Path of an artifact written next to `input`
pub fn artifact_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}.{ARTIFACT_EXTENSION}", stem.to_string_lossy());
    input
        .parent()
        .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
}

/// Runs the subcommand selected on the command line
pub struct FrontEnd {
    cli: Cli,
}

impl FrontEnd {
    /// Front end for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Log level requested on the command line
    pub const fn log_filter(&self) -> LevelFilter {
        self.cli.engine.log_filter()
    }

    /// Execute the subcommand, writing artifacts only after it succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if loading, the engine run, decoding or export fails
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        let pipeline = Pipeline::new(self.cli.engine.build_engine()?);

        match &self.cli.command {
            Command::Tiles {
                input,
                mode,
                debug_tile,
                composite,
            } => {
                let texture = load_square_texture(input)?;
                let artifacts =
                    pipeline.generate_tiles(&texture, (*mode).into(), *debug_tile, *composite)?;

                save_image(&artifacts.tiles, &artifact_path(input, TILES_SUFFIX))?;
                if let Some(corners) = &artifacts.corners {
                    save_image(corners, &artifact_path(input, CORNERS_SUFFIX))?;
                }
                if let Some(constraints) = &artifacts.constraints {
                    save_image(constraints, &artifact_path(input, CONSTRAINTS_SUFFIX))?;
                }
                if let Some(composite) = &artifacts.composite {
                    save_image(composite, &artifact_path(input, COMPOSITE_SUFFIX))?;
                }
            }
            Command::Index {
                resolution,
                output,
                opaque,
            } => {
                let index = pipeline.generate_index(*resolution)?;
                if *opaque {
                    save_image(&index, output)?;
                } else {
                    save_image(&index_with_alpha(&index), output)?;
                }
            }
            Command::Palette { resolution, output } => {
                save_image(&pipeline.generate_palette(*resolution)?, output)?;
            }
        }

        info!(
            "execution finished in {:.3} seconds",
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
