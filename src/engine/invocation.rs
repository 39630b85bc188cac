//! Wire form of a single engine invocation
//!
//! `[mode-flag] <resolution> <input-paths...> <output-paths...> [debug-tile-index]`

use crate::engine::mode::Mode;
use crate::io::configuration::{ENGINE_EXECUTABLE_NAME, TILE_COUNT};
use crate::io::error::{Result, WangError, invalid_parameter};
use clap::{ArgGroup, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wtgcore")]
#[command(
    version,
    about = "Wang tile synthesis engine exchanging raw pixel buffers",
    after_help = "Tile modes are told apart by the number of buffer paths: one output \
                  for tiles, two for tiles and corners, three for tiles, corners and \
                  constraints (optionally followed by a debug tile index). Without a \
                  flag a single input and output select the legacy tile mode."
)]
#[command(group(ArgGroup::new("mode").args(["tiles", "index", "palette"])))]
/// Engine command line as received from the pipeline
pub struct WireArgs {
    /// Synthesise a tile set, optionally with corners and constraints
    #[arg(long)]
    pub tiles: bool,

    /// Generate the tile index map
    #[arg(long)]
    pub index: bool,

    /// Generate the corner colour palette map
    #[arg(long)]
    pub palette: bool,

    /// Tile resolution, or map side for index and palette
    pub resolution: u32,

    /// Input buffers, then output buffers, then an optional debug tile index
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,
}

impl WireArgs {
    /// Mode flag given on the command line
    pub const fn flag(&self) -> Option<&'static str> {
        if self.tiles {
            Some("--tiles")
        } else if self.index {
            Some("--index")
        } else if self.palette {
            Some("--palette")
        } else {
            None
        }
    }

    /// Resolve the mode from the flag and path count, splitting off a
    /// trailing debug tile index
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No mode takes this flag and number of paths
    /// - The trailing debug tile index is not a number
    /// - The invocation breaks the mode's manifest or debug tile rules
    pub fn into_invocation(self) -> Result<Invocation> {
        let flag = self.flag();
        let mut paths = self.paths;

        let debug_tile = if Mode::resolve(flag, paths.len()).is_some() {
            None
        } else {
            let takes_debug_tile = Mode::resolve(flag, paths.len().saturating_sub(1))
                .is_some_and(Mode::supports_debug_tile);
            match paths.pop() {
                Some(last) if takes_debug_tile => Some(parse_debug_tile(&last)?),
                _ => return Err(unknown_mode(flag, paths.len() + 1)),
            }
        };

        let mode = Mode::resolve(flag, paths.len()).ok_or_else(|| unknown_mode(flag, paths.len()))?;
        let outputs = paths.split_off(mode.manifest().inputs.len());
        Invocation::new(mode, self.resolution, paths, outputs, debug_tile)
    }
}

fn unknown_mode(flag: Option<&str>, path_count: usize) -> WangError {
    invalid_parameter(
        "arguments",
        &format!("{} {path_count}", flag.unwrap_or("<no flag>")),
        &"no mode takes this flag and number of buffer paths",
    )
}

fn parse_debug_tile(arg: &Path) -> Result<usize> {
    let text = arg.to_string_lossy();
    text.parse::<usize>()
        .map_err(|e| invalid_parameter("debug-tile-index", &text, &e))
}

/// One engine run: mode, resolution, buffer paths and optional debug tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    mode: Mode,
    resolution: u32,
    inputs: Vec<PathBuf>,
    outputs: Vec<PathBuf>,
    debug_tile: Option<usize>,
}

impl Invocation {
    /// Create an invocation checked against the mode's manifest
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The number of input or output paths differs from the manifest
    /// - A debug tile is given for a mode without per-tile diagnostics
    /// - The debug tile index is outside the atlas
    pub fn new(
        mode: Mode,
        resolution: u32,
        inputs: Vec<PathBuf>,
        outputs: Vec<PathBuf>,
        debug_tile: Option<usize>,
    ) -> Result<Self> {
        let manifest = mode.manifest();
        if inputs.len() != manifest.inputs.len() {
            return Err(invalid_parameter(
                "inputs",
                &inputs.len(),
                &format!("mode {mode} takes {} input buffers", manifest.inputs.len()),
            ));
        }
        if outputs.len() != manifest.outputs.len() {
            return Err(invalid_parameter(
                "outputs",
                &outputs.len(),
                &format!("mode {mode} writes {} output buffers", manifest.outputs.len()),
            ));
        }
        if let Some(index) = debug_tile {
            if !mode.supports_debug_tile() {
                return Err(WangError::DebugTileUnsupported { mode: mode.name() });
            }
            if index >= TILE_COUNT {
                return Err(WangError::InvalidTileIndex {
                    index,
                    max_tiles: TILE_COUNT,
                });
            }
        }

        Ok(Self {
            mode,
            resolution,
            inputs,
            outputs,
            debug_tile,
        })
    }

    /// Parse engine arguments, excluding the program name
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not parse or match no mode
    pub fn parse<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let wire = WireArgs::try_parse_from(
            std::iter::once(OsString::from(ENGINE_EXECUTABLE_NAME)).chain(args.iter().cloned()),
        )
        .map_err(|e| WangError::InvalidParameter {
            parameter: "arguments",
            value: args
                .iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            reason: e.to_string().trim_end().to_string(),
        })?;
        wire.into_invocation()
    }

    /// Arguments passed to the engine executable
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.inputs.len() + self.outputs.len() + 3);
        if let Some(flag) = self.mode.flag() {
            args.push(OsString::from(flag));
        }
        args.push(OsString::from(self.resolution.to_string()));
        args.extend(self.inputs.iter().map(|path| path.clone().into_os_string()));
        args.extend(self.outputs.iter().map(|path| path.clone().into_os_string()));
        if let Some(index) = self.debug_tile {
            args.push(OsString::from(index.to_string()));
        }
        args
    }

    /// Invocation mode
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Tile resolution, or map side for index and palette modes
    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Input buffer paths in manifest order
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Output buffer paths in manifest order
    pub fn outputs(&self) -> &[PathBuf] {
        &self.outputs
    }

    /// Tile restricted for diagnostics, if any
    pub const fn debug_tile(&self) -> Option<usize> {
        self.debug_tile
    }
}
