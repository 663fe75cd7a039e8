//! Clap derive structures for the `pylights` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pylights -- remote control for a pylights show controller
#[derive(Debug, Parser)]
#[command(
    name = "pylights",
    version,
    about = "Control pylights music and light shows from the command line",
    long_about = "Play songs, switch lights, manage presets, and remap relays on a\n\
        pylights show controller over its HTTP API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "PYLIGHTS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device hostname or IP address (overrides profile)
    #[arg(long, env = "PYLIGHTS_HOST", global = true)]
    pub host: Option<String>,

    /// Device port (overrides profile)
    #[arg(long, env = "PYLIGHTS_PORT", global = true)]
    pub port: Option<u16>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PYLIGHTS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PYLIGHTS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what is playing plus a device summary
    Info,

    /// Browse and control song playback
    #[command(alias = "s")]
    Songs(SongsArgs),

    /// Switch individual lights or all of them
    #[command(alias = "l")]
    Lights(LightsArgs),

    /// Apply and create light presets
    Presets(PresetsArgs),

    /// Re-learn which relay drives which light
    Remap(RemapArgs),

    /// Device diagnostics and maintenance
    #[command(alias = "dev")]
    Developer(DeveloperArgs),

    /// Live now-playing view
    Watch,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SONGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SongsArgs {
    #[command(subcommand)]
    pub command: SongsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SongsCommand {
    /// List every song the device knows
    #[command(alias = "ls")]
    List,

    /// Start playing a song
    Play {
        /// Song title
        title: String,
    },

    /// Pause the current song
    Pause,

    /// Resume the paused song
    Resume,

    /// Stop playback
    Stop,

    /// Set output volume
    Volume {
        /// Volume percent (0-100)
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LIGHTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LightsArgs {
    #[command(subcommand)]
    pub command: LightsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightsCommand {
    /// List lights and their state
    #[command(alias = "ls")]
    List,

    /// Turn a light on
    On {
        /// Light name
        name: String,
    },

    /// Turn a light off
    Off {
        /// Light name
        name: String,
    },

    /// Flip a light
    Toggle {
        /// Light name
        name: String,
    },

    /// Turn every light on
    AllOn,

    /// Turn every light off
    AllOff,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRESETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PresetsCommand {
    /// List stored presets
    #[command(alias = "ls")]
    List,

    /// Apply a preset
    Activate {
        /// Preset name
        name: String,
    },

    /// Store a new preset
    Add {
        /// Preset name
        name: String,

        /// Lights to include (comma-separated or repeated)
        #[arg(long, short = 'l', value_delimiter = ',', required = true)]
        lights: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REMAP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RemapArgs {
    #[command(subcommand)]
    pub command: RemapCommand,
}

#[derive(Debug, Subcommand)]
pub enum RemapCommand {
    /// Start a remap session; the first light switches on
    Start,

    /// Name the light that is currently on and move to the next
    Next {
        /// Name for the lit light
        name: String,
    },

    /// Abandon the remap session
    Cancel,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVELOPER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DeveloperArgs {
    #[command(subcommand)]
    pub command: DeveloperCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeveloperCommand {
    /// Show device diagnostics
    Info,

    /// Rebuild light shows from source on the device
    Recompile,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
