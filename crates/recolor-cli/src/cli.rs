use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "recolor")]
#[command(about = "Sprite palette recolor tool for archives and the running game")]
#[command(version)]
pub struct Args {
    /// Configuration file (JSON). Falls back to defaults when missing or invalid
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract sprite entries from every archive in a directory
    Extract {
        /// Directory containing .pac archives
        pac_dir: String,

        /// Output directory (one subdirectory per archive)
        #[arg(short, long, default_value = "extracted_sprites")]
        output: String,
    },

    /// Extract sprite entries from a single archive
    ExtractOne {
        /// Archive file
        pac_file: String,

        /// Output directory
        #[arg(short, long, default_value = "extracted_sprites")]
        output: String,
    },

    /// List the entries of an archive
    List {
        /// Archive file
        pac_file: String,

        /// Only show sprite entries
        #[arg(long)]
        sprites_only: bool,
    },

    /// Extract sprites whose name contains a pattern (case-insensitive)
    Find {
        /// Directory containing .pac archives
        pac_dir: String,

        /// Name substring to search for
        pattern: String,

        /// Output directory
        #[arg(short, long, default_value = "found_sprites")]
        output: String,
    },

    /// Generate color variants for a sprite file or a directory of sprites
    Process {
        /// Sprite file or directory
        input: String,

        /// Output root (receives sprites_<scheme>/ directories)
        #[arg(short, long, default_value = "data")]
        output: String,
    },

    /// Extract all sprites, then generate their color variants
    Full {
        /// Directory containing .pac archives
        pac_dir: String,

        /// Output root
        #[arg(short, long, default_value = "output")]
        output: String,
    },

    /// Show the palette window of a sprite file
    Inspect {
        /// Sprite file
        sprite: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recolor palettes in the running game once
    Recolor {
        /// Color scheme name (see `recolor schemes`)
        scheme: String,

        /// Process ID (skips lookup by name)
        #[arg(long)]
        pid: Option<u32>,

        /// Scan and report without writing to memory
        #[arg(long)]
        dry_run: bool,
    },

    /// Keep recoloring palettes in the running game until Ctrl+C
    Watch {
        /// Color scheme name (see `recolor schemes`)
        scheme: String,

        /// Process ID (skips lookup by name)
        #[arg(long)]
        pid: Option<u32>,

        /// Delay between scan passes in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },

    /// Write the default configuration to a file
    Config {
        /// Destination file
        output: String,
    },

    /// List the built-in color schemes
    Schemes,
}
