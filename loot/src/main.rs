use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use loot_config::{
    logging::LoggingConfig, LoadTomlConfiguration, LootConfiguration, DEFAULT_CONFIG_PATH,
};
use loot_core::EntityEquipment;
use loot_table::{LootError, LootTableRegistry};
use rand::{rngs::StdRng, SeedableRng};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the configuration file, created with defaults if missing
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the loaded loot tables
    List,
    /// Show every entry of a loot table
    Show { table: String },
    /// Generate loot from a loot table
    Roll {
        table: String,
        /// How many loot lists to generate
        #[arg(short, long, default_value_t = 1)]
        times: u32,
        /// Overrides the seed from the configuration
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Equip a mob from a loot table and show its gear
    Equip { table: String },
    /// Write every loot table to a directory in the configured save format
    Convert { output: PathBuf },
}

fn init_logger(config: &LoggingConfig) {
    if config.enabled {
        let mut logger = simple_logger::SimpleLogger::new();
        logger = logger.with_timestamp_format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));

        if !config.timestamp {
            logger = logger.without_timestamps();
        }

        logger = logger.with_level(LevelFilter::from(config.level));

        // Must come after the level, RUST_LOG overrides it
        if config.env {
            logger = logger.env();
        }

        logger = logger.with_colors(config.color);
        logger = logger.with_threads(config.threads);
        if let Err(err) = logger.init() {
            eprintln!("Couldn't initialize logger: {err}");
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match LootConfiguration::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logger(&config.logging);

    log::debug!("Starting loot {CARGO_PKG_VERSION} with {:?}", cli.config);

    match run(cli.command, &config) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            match unlogged_message(&err) {
                Some(message) => eprintln!("{message}"),
                None => err.log(),
            }
            ExitCode::FAILURE
        }
    }
}

/// The message to print for `err` when no logger would show it, e.g. with
/// logging disabled or a level filter above its severity.
fn unlogged_message(err: &LootError) -> Option<String> {
    if log::log_enabled!(err.severity()) {
        None
    } else {
        Some(err.to_string())
    }
}

fn load_registry(config: &LootConfiguration) -> Result<LootTableRegistry, LootError> {
    let dir = &config.loot_tables_directory;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| LootError::Io {
            path: dir.clone(),
            source,
        })?;
        log::info!("Created empty loot table directory {:?}", dir);
    }

    let mut registry = LootTableRegistry::new();
    registry.load_directory(dir)?;
    Ok(registry)
}

/// Runs `command` and returns the lines to print.
fn run(command: Command, config: &LootConfiguration) -> Result<Vec<String>, LootError> {
    let registry = load_registry(config)?;

    let mut lines = Vec::new();
    match command {
        Command::List => {
            for name in registry.names() {
                let table = registry.require(name)?;
                lines.push(format!("{name} ({} entries)", table.len()));
            }
        }
        Command::Show { table } => {
            let table = registry.require(&table)?;
            lines.push(table.to_string());
            for entry in table.entries() {
                lines.push(format!(
                    "  {:<16} {:>7.2}%  {}",
                    entry.id(),
                    entry.chance(),
                    entry.item()
                ));
            }
        }
        Command::Roll { table, times, seed } => {
            let table = registry.require(&table)?;
            let mut rng = match seed.or(config.seed) {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for roll in 1..=times {
                let loot = table.generate_loot(&mut rng);
                let items: Vec<String> = loot.iter().map(ToString::to_string).collect();
                lines.push(format!("#{roll}: [{}]", items.join(", ")));
            }
        }
        Command::Equip { table } => {
            let table = registry.require(&table)?;
            let mut equipment = if config.off_hand {
                EntityEquipment::new()
            } else {
                EntityEquipment::legacy()
            };
            table.apply_equipment(&mut equipment);
            for (slot, equipped) in equipment.iter() {
                let item = equipped
                    .item
                    .as_ref()
                    .map_or_else(|| "-".to_string(), ToString::to_string);
                lines.push(format!(
                    "{:<12} {:<32} drop chance {:.3}",
                    slot.to_string(),
                    item,
                    equipped.drop_chance
                ));
            }
        }
        Command::Convert { output } => {
            registry.save_all(&output, config.save_format)?;
            log::info!(
                "Wrote {} loot tables to {:?} as {}",
                registry.len(),
                output,
                config.save_format
            );
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod test {
    use std::{fs, path::Path};

    use loot_config::LootConfiguration;
    use loot_core::TableFormat;
    use loot_table::LootError;

    use super::{run, unlogged_message, Command};

    const SKELETON: &str = r#"
[mainHand]
item = "bow"
chance = 10

[offHand]
item = "shield"
chance = 20

[bones]
item = "bone"
chance = 50

[arrows]
item = { id = "arrow", count = 3 }
chance = 50
"#;

    fn config(dir: &Path) -> LootConfiguration {
        LootConfiguration {
            loot_tables_directory: dir.join("loot_tables"),
            ..LootConfiguration::default()
        }
    }

    fn with_skeleton(dir: &Path) -> LootConfiguration {
        let config = config(dir);
        fs::create_dir_all(&config.loot_tables_directory).unwrap();
        fs::write(config.loot_tables_directory.join("skeleton.toml"), SKELETON).unwrap();
        config
    }

    #[test]
    fn test_missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        assert!(!config.loot_tables_directory.exists());

        assert!(run(Command::List, &config).unwrap().is_empty());
        assert!(config.loot_tables_directory.is_dir());
    }

    #[test]
    fn test_list_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let config = with_skeleton(dir.path());

        assert_eq!(
            run(Command::List, &config).unwrap(),
            ["skeleton (4 entries)"]
        );

        let lines = run(
            Command::Show {
                table: "skeleton".to_string(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(lines[0], "LootTable{Name=skeleton}");
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().any(|line| line.contains("3x minecraft:arrow")));
    }

    #[test]
    fn test_unknown_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = with_skeleton(dir.path());

        let err = run(
            Command::Show {
                table: "creeper".to_string(),
            },
            &config,
        )
        .unwrap_err();
        assert!(matches!(&err, LootError::UnknownTable(name) if name == "creeper"));

        // Tests run without a logger, so the error must still be reported
        assert_eq!(
            unlogged_message(&err).as_deref(),
            Some("Unknown loot table 'creeper'")
        );
    }

    #[test]
    fn test_seeded_roll_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let config = with_skeleton(dir.path());
        let roll = |seed| {
            run(
                Command::Roll {
                    table: "skeleton".to_string(),
                    times: 20,
                    seed: Some(seed),
                },
                &config,
            )
            .unwrap()
        };

        let first = roll(7);
        assert_eq!(first.len(), 20);
        assert!(first[0].starts_with("#1: ["));
        assert_eq!(first, roll(7));

        // The seed from the configuration applies when none is given
        let seeded = LootConfiguration {
            seed: Some(7),
            ..config.clone()
        };
        let from_config = run(
            Command::Roll {
                table: "skeleton".to_string(),
                times: 20,
                seed: None,
            },
            &seeded,
        )
        .unwrap();
        assert_eq!(first, from_config);
    }

    #[test]
    fn test_equip() {
        let dir = tempfile::tempdir().unwrap();
        let config = with_skeleton(dir.path());
        let equip = |config: &LootConfiguration| {
            run(
                Command::Equip {
                    table: "skeleton".to_string(),
                },
                config,
            )
            .unwrap()
        };

        let lines = equip(&config);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("mainHand") && lines[0].contains("minecraft:bow"));
        assert!(lines[1].starts_with("offHand") && lines[1].contains("minecraft:shield"));

        let legacy = LootConfiguration {
            off_hand: false,
            ..config.clone()
        };
        let lines = equip(&legacy);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| !line.starts_with("offHand")));
        assert!(lines.iter().all(|line| !line.contains("shield")));
    }

    #[test]
    fn test_convert() {
        let dir = tempfile::tempdir().unwrap();
        let config = LootConfiguration {
            save_format: TableFormat::Json,
            ..with_skeleton(dir.path())
        };
        let output = dir.path().join("converted");

        run(
            Command::Convert {
                output: output.clone(),
            },
            &config,
        )
        .unwrap();
        let converted = loot_table::LootTable::load(output.join("skeleton.json")).unwrap();
        assert_eq!(converted.len(), 4);
        assert_eq!(converted.entry("offHand").unwrap().chance(), 20.0);
    }
}
