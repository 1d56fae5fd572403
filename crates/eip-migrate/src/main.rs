use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use eip_migrate::{logging, FileOutcome, Migrator, MigratorConfig, RunObserver, DEFAULT_DATA_DIR};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("migrate-eip-status")
        .version(eip_migrate::VERSION)
        .about("Move EIP fork relationships from `status` to `statusHistory`")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .default_value(DEFAULT_DATA_DIR)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the EIP JSON files"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Report what would change without writing files"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the summary as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr (RUST_LOG overrides)"),
        )
}

fn config_from(args: &ArgMatches) -> MigratorConfig {
    let data_dir = args
        .get_one::<PathBuf>("data-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    MigratorConfig::new(data_dir).with_dry_run(args.get_flag("dry-run"))
}

/// Human-readable progress on stdout
struct ConsoleReport {
    dry_run: bool,
}

impl RunObserver for ConsoleReport {
    fn discovered(&mut self, files: &[PathBuf]) {
        println!("Found {} EIP JSON files", files.len());
        println!();
    }

    fn file_done(&mut self, outcome: &FileOutcome) {
        if let FileOutcome::Migrated { name, .. } = outcome {
            if self.dry_run {
                println!("✓ Would migrate: {name}");
            } else {
                println!("✓ Migrated: {name}");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = cli().get_matches();
    logging::init(args.get_flag("verbose"))?;

    let config = config_from(&args);
    let migrator = Migrator::new(config.clone());

    if args.get_flag("json") {
        let summary = migrator
            .run()
            .with_context(|| format!("cannot migrate {}", config.data_dir().display()))?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let mut report = ConsoleReport {
            dry_run: config.dry_run,
        };
        let summary = migrator
            .run_with(&mut report)
            .with_context(|| format!("cannot migrate {}", config.data_dir().display()))?;
        println!();
        println!("{summary}");
    }

    Ok(())
}
