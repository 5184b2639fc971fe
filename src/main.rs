//! hexflat CLI - flatten transparent hex colors in JSON theme files.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};

use hexflat::cli::{self, Cli, Commands, FlattenOptions};
use hexflat::color::{self, Rgb, Rgba};
use hexflat::config::{self, Settings};
use hexflat::document::{self, Location};
use hexflat::error::{FlatError, Result};
use hexflat::logging;
use hexflat::output::{
    CheckReport, OutputMode, Output, OverlayReport, ScanReport, SettingsReport, TransformReport,
    VersionInfo,
};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> bool {
        option_env!("VERGEN_GIT_DIRTY") == Some("true")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    let mode = OutputMode::from_cli(&cli);
    logging::init_logging(mode.is_robot(), cli.verbose, cli.quiet);

    let output = mode.into_output();

    if let Err(e) = run(&cli, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None => {
            print_quick_start(cli);
            Ok(())
        }
        Some(Commands::Transform(args)) => cmd_transform(cli, out, args),
        Some(Commands::Scan(args)) => cmd_scan(cli, out, args),
        Some(Commands::Check(args)) => cmd_check(cli, out, args),
        Some(Commands::Overlay(args)) => cmd_overlay(cli, out, args),
        Some(Commands::Init(args)) => cmd_init(out, args),
        Some(Commands::Config(args)) => cmd_config(cli, out, args),
        Some(Commands::Version) => {
            cmd_version(out);
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

// === Quick Start ===

fn print_quick_start(cli: &Cli) {
    if cli.use_json() {
        let help = serde_json::json!({
            "tool": "hexflat",
            "version": build_info::VERSION,
            "description": "Flatten transparent hex colors in JSON theme files",
            "commands": {
                "transform": "hexflat transform <INPUT> <OUTPUT> [--background HEX] [--dry-run]",
                "in_place": "hexflat transform --in-place <FILE>",
                "scan": "hexflat scan <INPUT>",
                "check": "hexflat check <INPUT>",
                "overlay": "hexflat overlay <COLOR> [--background HEX]",
                "config": "hexflat config",
            },
            "stdio": "Use '-' as INPUT or OUTPUT for stdin/stdout",
            "output_modes": {
                "human": "--format=text (default)",
                "robot": "--robot or --format=json",
                "compact": "--format=json-compact",
            },
        });
        println!("{help:#}");
        return;
    }

    println!("hexflat {} - flatten transparent hex colors\n", build_info::VERSION);
    println!("QUICK START\n");
    println!("  hexflat transform theme.json flat.json   Write a flattened copy");
    println!("  hexflat transform -i theme.json          Rewrite in place");
    println!("  hexflat scan theme.json                  List transparent colors");
    println!("  hexflat check theme.json                 Fail if any remain");
    println!("  hexflat overlay '#FF000080'              Composite one color");
    println!();
    println!("Run hexflat --help for full help");
}

// === Command Implementations ===

/// Settings from the config file, overridden by command-line flags.
fn effective_settings(
    cli: &Cli,
    out: &dyn Output,
    flatten: &FlattenOptions,
    indent: Option<usize>,
) -> Result<Settings> {
    let loaded = config::resolve_settings(cli.config.as_deref())?;
    let mut settings = loaded.settings;

    if let Some(background) = flatten.background {
        if !background.is_opaque() {
            out.warning(&format!(
                "Ignoring alpha channel {:02X} of --background; the background is always opaque",
                background.a
            ));
        }
        settings.background = background.rgb();
    }
    if let Some(boundary) = flatten.boundary {
        settings.boundary = boundary;
    }
    if let Some(indent) = indent {
        settings.indent = indent;
    }
    settings.validate()?;

    debug!(
        source = ?loaded.source,
        background = %settings.background,
        boundary = ?settings.boundary,
        indent = settings.indent,
        "Effective settings"
    );
    Ok(settings)
}

fn cmd_transform(cli: &Cli, out: &dyn Output, args: &cli::TransformArgs) -> Result<()> {
    let settings = effective_settings(cli, out, &args.flatten, args.indent)?;

    let input = Location::from(args.input.as_path());
    let output = if args.in_place {
        if input.is_stdio() {
            return Err(FlatError::Other(
                "--in-place needs an input file, not stdin".to_string(),
            ));
        }
        input.clone()
    } else {
        Location::from(args.output.as_deref().unwrap_or_else(|| Path::new("-")))
    };

    let doc = document::read_document(&input)?;
    let (flattened, replacements) = settings.rewriter().rewrite_with_report(doc);

    if !args.dry_run {
        document::write_document(&flattened, &output, settings.indent)?;
    }
    info!(
        input = %input,
        output = %output,
        replacements = replacements.len(),
        dry_run = args.dry_run,
        "Transform complete"
    );

    // The document itself is on stdout.
    if output.is_stdio() && !args.dry_run {
        return Ok(());
    }

    out.transformed(&TransformReport {
        input: input.to_string(),
        output: (!args.dry_run).then(|| output.to_string()),
        dry_run: args.dry_run,
        background: settings.background,
        boundary: settings.boundary,
        count: replacements.len(),
        replacements,
    });
    Ok(())
}

fn cmd_scan(cli: &Cli, out: &dyn Output, args: &cli::ScanArgs) -> Result<()> {
    let settings = effective_settings(cli, out, &args.flatten, None)?;
    let input = Location::from(args.input.as_path());

    let doc = document::read_document(&input)?;
    let replacements = settings.rewriter().find(&doc);

    out.scanned(&ScanReport {
        input: input.to_string(),
        background: settings.background,
        boundary: settings.boundary,
        count: replacements.len(),
        replacements,
    });
    Ok(())
}

fn cmd_check(cli: &Cli, out: &dyn Output, args: &cli::CheckArgs) -> Result<()> {
    let flatten = FlattenOptions {
        background: None,
        boundary: args.boundary,
    };
    let settings = effective_settings(cli, out, &flatten, None)?;
    let input = Location::from(args.input.as_path());

    let doc = document::read_document(&input)?;
    let found = settings.rewriter().find(&doc);

    let mut locations: Vec<String> = found.iter().map(|r| r.pointer.clone()).collect();
    locations.dedup();

    out.checked(&CheckReport {
        input: input.to_string(),
        ok: found.is_empty(),
        transparent_count: found.len(),
        locations,
    });

    if found.is_empty() {
        Ok(())
    } else {
        Err(FlatError::TransparentColorsFound { count: found.len() })
    }
}

fn cmd_overlay(cli: &Cli, out: &dyn Output, args: &cli::OverlayArgs) -> Result<()> {
    let flatten = FlattenOptions {
        background: args.background,
        boundary: None,
    };
    let settings = effective_settings(cli, out, &flatten, None)?;

    let token = args.color.trim();
    let foreground: Rgba = token.parse()?;
    let result = color::flatten_token(token, settings.background)?;
    let rgb: Rgb = result.parse()?;

    out.overlaid(&OverlayReport {
        input: token.to_string(),
        background: settings.background,
        alpha: foreground.a,
        result,
        rgb,
    });
    Ok(())
}

fn cmd_init(out: &dyn Output, args: &cli::InitArgs) -> Result<()> {
    let path = match &args.path {
        Some(path) => config::expand_home(path)?,
        None => config::user_config_path().ok_or_else(|| {
            FlatError::ConfigInvalid("Could not determine the user config directory".to_string())
        })?,
    };

    if path.exists() && !args.force {
        return Err(FlatError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let settings = Settings::default();
    config::save_settings(&settings, &path)?;
    out.config_written(&path, &settings);
    Ok(())
}

fn cmd_config(cli: &Cli, out: &dyn Output, args: &cli::ConfigArgs) -> Result<()> {
    let loaded = config::resolve_settings(cli.config.as_deref())?;

    if args.path {
        out.settings_path(loaded.source.as_deref());
    } else {
        out.settings(&SettingsReport::from(&loaded));
    }
    Ok(())
}

fn cmd_version(out: &dyn Output) {
    out.version_info(&VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        git_dirty: build_info::git_dirty(),
        build_timestamp: build_info::build_timestamp(),
        rustc_version: build_info::rustc_semver(),
        target: build_info::target(),
    });
}

fn cmd_completions(args: &cli::CompletionsArgs) {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "hexflat", &mut io::stdout());
}
