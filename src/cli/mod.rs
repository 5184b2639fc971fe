//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::color::Rgba;
use crate::scan::BoundaryPolicy;

/// hexflat - flatten transparent hex colors in JSON theme files.
///
/// Every 8-digit color with an alpha channel below FF is composited over an
/// opaque background and replaced by the equivalent 6-digit color.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "hexflat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "HEXFLAT_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty NO_COLOR other than "0"/"false")
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Settings file (.toml, .yaml or .yml)
    #[arg(long, short = 'c', global = true, env = "HEXFLAT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Flattening ===
    /// Flatten transparent colors in a JSON document and write the result
    #[command(visible_alias = "flatten")]
    Transform(TransformArgs),

    /// List the transparent colors in a JSON document
    Scan(ScanArgs),

    /// Fail if a JSON document still contains transparent colors
    Check(CheckArgs),

    /// Composite a single color over the background
    Overlay(OverlayArgs),

    // === Configuration ===
    /// Write a settings file with the default values
    Init(InitArgs),

    /// Show the effective settings
    Config(ConfigArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that flattens colors.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FlattenOptions {
    /// Background color to composite over (e.g. "#0E1017"; any alpha is ignored)
    #[arg(long, short = 'b', value_name = "HEX")]
    pub background: Option<Rgba>,

    /// How runs of hex digits are matched
    #[arg(long, value_name = "POLICY")]
    pub boundary: Option<BoundaryPolicy>,
}

/// Arguments for flattening a document.
///
/// # Examples
///
/// ```bash
/// # Write a flattened copy
/// hexflat transform theme.json theme-flat.json
///
/// # Rewrite in place against a light background
/// hexflat transform --in-place --background FAFAFA theme.json
///
/// # Filter: stdin to stdout
/// cat theme.json | hexflat transform - -
///
/// # Preview what would change
/// hexflat transform theme.json out.json --dry-run
/// ```
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Input JSON document ("-" for stdin)
    pub input: PathBuf,

    /// Output path ("-" for stdout)
    #[arg(required_unless_present = "in_place", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long, short = 'i')]
    pub in_place: bool,

    /// Spaces per indentation level in the output
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Report what would change without writing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    #[command(flatten)]
    pub flatten: FlattenOptions,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Input JSON document ("-" for stdin)
    pub input: PathBuf,

    #[command(flatten)]
    pub flatten: FlattenOptions,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Input JSON document ("-" for stdin)
    pub input: PathBuf,

    /// How runs of hex digits are matched
    #[arg(long, value_name = "POLICY")]
    pub boundary: Option<BoundaryPolicy>,
}

#[derive(Parser, Debug)]
pub struct OverlayArgs {
    /// Color to composite (6 or 8 hex digits, e.g. "#FF000080")
    pub color: String,

    /// Background color to composite over
    #[arg(long, short = 'b', value_name = "HEX")]
    pub background: Option<Rgba>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the settings file (default: per-user config directory)
    #[arg(long, short = 'p', value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show configuration file path only
    #[arg(long)]
    pub path: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
