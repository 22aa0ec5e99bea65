//! CLI argument parsing tests.
//!
//! These tests check how command-line arguments parse without running any
//! command, so no archives or game process are needed.

use clap::Parser;

// Mirror of the binary's Args, which is not exported
#[derive(Parser)]
#[command(name = "recolor")]
struct Args {
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    Extract {
        pac_dir: String,
        #[arg(short, long, default_value = "extracted_sprites")]
        output: String,
    },
    ExtractOne {
        pac_file: String,
        #[arg(short, long, default_value = "extracted_sprites")]
        output: String,
    },
    List {
        pac_file: String,
        #[arg(long)]
        sprites_only: bool,
    },
    Find {
        pac_dir: String,
        pattern: String,
        #[arg(short, long, default_value = "found_sprites")]
        output: String,
    },
    Full {
        pac_dir: String,
        #[arg(short, long, default_value = "output")]
        output: String,
    },
    Inspect {
        sprite: String,
        #[arg(long)]
        json: bool,
    },
    Recolor {
        scheme: String,
        #[arg(long)]
        pid: Option<u32>,
        #[arg(long)]
        dry_run: bool,
    },
    Watch {
        scheme: String,
        #[arg(long)]
        pid: Option<u32>,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
    Config {
        output: String,
    },
    Schemes,
}

#[test]
fn test_subcommand_required() {
    assert!(Args::try_parse_from(["recolor"]).is_err());
}

#[test]
fn test_parse_extract_defaults() {
    let args = Args::try_parse_from(["recolor", "extract", "pac"]).unwrap();
    assert!(args.config.is_none());
    match args.command {
        Command::Extract { pac_dir, output } => {
            assert_eq!(pac_dir, "pac");
            assert_eq!(output, "extracted_sprites");
        }
        _ => panic!("Expected Extract command"),
    }
}

#[test]
fn test_parse_extract_one_with_output() {
    let args =
        Args::try_parse_from(["recolor", "extract-one", "battle.pac", "-o", "out"]).unwrap();
    match args.command {
        Command::ExtractOne { pac_file, output } => {
            assert_eq!(pac_file, "battle.pac");
            assert_eq!(output, "out");
        }
        _ => panic!("Expected ExtractOne command"),
    }
}

#[test]
fn test_parse_list_sprites_only() {
    let args = Args::try_parse_from(["recolor", "list", "a.pac", "--sprites-only"]).unwrap();
    match args.command {
        Command::List {
            pac_file,
            sprites_only,
        } => {
            assert_eq!(pac_file, "a.pac");
            assert!(sprites_only);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_parse_find() {
    let args = Args::try_parse_from(["recolor", "find", "pac", "ramza", "--output", "r"]).unwrap();
    match args.command {
        Command::Find {
            pac_dir,
            pattern,
            output,
        } => {
            assert_eq!(pac_dir, "pac");
            assert_eq!(pattern, "ramza");
            assert_eq!(output, "r");
        }
        _ => panic!("Expected Find command"),
    }
}

#[test]
fn test_find_requires_pattern() {
    assert!(Args::try_parse_from(["recolor", "find", "pac"]).is_err());
}

#[test]
fn test_parse_full_default_output() {
    let args = Args::try_parse_from(["recolor", "full", "pac"]).unwrap();
    match args.command {
        Command::Full { output, .. } => assert_eq!(output, "output"),
        _ => panic!("Expected Full command"),
    }
}

#[test]
fn test_parse_inspect_json() {
    let args = Args::try_parse_from(["recolor", "inspect", "unit.spr", "--json"]).unwrap();
    match args.command {
        Command::Inspect { sprite, json } => {
            assert_eq!(sprite, "unit.spr");
            assert!(json);
        }
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_parse_recolor() {
    let args =
        Args::try_parse_from(["recolor", "recolor", "ocean_blue", "--pid", "1234", "--dry-run"])
            .unwrap();
    match args.command {
        Command::Recolor {
            scheme,
            pid,
            dry_run,
        } => {
            assert_eq!(scheme, "ocean_blue");
            assert_eq!(pid, Some(1234));
            assert!(dry_run);
        }
        _ => panic!("Expected Recolor command"),
    }
}

#[test]
fn test_parse_recolor_invalid_pid() {
    assert!(Args::try_parse_from(["recolor", "recolor", "red", "--pid", "abc"]).is_err());
}

#[test]
fn test_parse_watch_interval() {
    let args = Args::try_parse_from(["recolor", "watch", "red"]).unwrap();
    match args.command {
        Command::Watch {
            pid, interval_ms, ..
        } => {
            assert!(pid.is_none());
            assert_eq!(interval_ms, 1000);
        }
        _ => panic!("Expected Watch command"),
    }

    let args = Args::try_parse_from(["recolor", "watch", "red", "--interval-ms", "250"]).unwrap();
    match args.command {
        Command::Watch { interval_ms, .. } => assert_eq!(interval_ms, 250),
        _ => panic!("Expected Watch command"),
    }
}

#[test]
fn test_global_config_after_subcommand() {
    let args =
        Args::try_parse_from(["recolor", "schemes", "--config", "recolor.json"]).unwrap();
    assert_eq!(args.config.as_deref(), Some("recolor.json"));
    assert!(matches!(args.command, Command::Schemes));
}

#[test]
fn test_parse_config_output() {
    let args = Args::try_parse_from(["recolor", "config", "recolor.json"]).unwrap();
    match args.command {
        Command::Config { output } => assert_eq!(output, "recolor.json"),
        _ => panic!("Expected Config command"),
    }
}
