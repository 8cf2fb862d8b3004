//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::services::Preset;
use crate::cli::args::{Cli, Commands, ConfigCommands, InventoryCommands, PlanArgs};
use crate::cli::{output, report, CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Log, PlanGoal, PlanRequest, RandomSource};
use crate::infrastructure::traits::StdRandom;
use crate::infrastructure::{InfraError, ServiceContainer};
use crate::util::path::expand_path;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `logwall --help`".into(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    match command {
        Commands::Config { command } => config_command(&settings, command),
        Commands::Plan(args) => plan(&ServiceContainer::new(settings), args),
        Commands::Inventory { command } => {
            inventory_command(&ServiceContainer::new(settings), command)
        }
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let config_file = cli.config.as_deref().map(expand_path);
    let mut settings = Settings::load(config_file.as_deref())?;
    if let Some(path) = &cli.inventory {
        settings.inventory_path = expand_path(path);
    }
    debug!("inventory: {}", settings.inventory_path.display());
    Ok(settings)
}

#[instrument(skip(container))]
fn plan(container: &ServiceContainer, args: &PlanArgs) -> CliResult<()> {
    let settings = &container.settings;
    let parameters = args.apply_to(settings.wall.clone());
    let goal = match (args.courses, args.height) {
        (None, None) => PlanGoal::Courses(settings.course_count),
        (courses, height) => {
            PlanGoal::from_options(courses, height).map_err(ApplicationError::from)?
        }
    };
    let existing_logs = if args.scratch {
        Vec::new()
    } else {
        container.inventory.list()?
    };

    let request = PlanRequest {
        existing_logs,
        goal,
        parameters,
    };
    let plan = match args.seed {
        Some(seed) => {
            let mut rng = StdRandom::new(Some(seed));
            container
                .planning
                .plan(&request, Some(&mut rng as &mut dyn RandomSource))?
        }
        None => container.planning.plan(&request, None)?,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&plan).map_err(|e| {
            InfraError::io("serialize plan", io::Error::other(e))
        })?;
        output::info(&json);
    } else {
        report::print_plan(&plan, goal);
    }
    Ok(())
}

#[instrument(skip(container))]
fn inventory_command(container: &ServiceContainer, command: &InventoryCommands) -> CliResult<()> {
    let inventory = &container.inventory;
    match command {
        InventoryCommands::List => {
            let logs = inventory.list()?;
            report::print_inventory(&logs, &inventory.summary()?);
        }
        InventoryCommands::Add { length, diameter } => {
            let log = Log::new((*length).into(), *diameter);
            inventory.add(log)?;
            output::success(&format!("added {log}"));
        }
        InventoryCommands::Remove { index } => {
            if *index == 0 {
                return Err(CliError::InvalidArgs("log numbers start at 1".into()));
            }
            match inventory.remove(index - 1)? {
                Some(log) => output::success(&format!("removed {log}")),
                None => output::warning(&format!("no log number {index}")),
            }
        }
        InventoryCommands::Clear => {
            inventory.clear()?;
            output::success("inventory cleared");
        }
        InventoryCommands::Import { file } => {
            let path = expand_path(file);
            let json = container
                .fs
                .read_to_string(&path)
                .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
            let count = inventory.import(&json)?;
            output::success(&format!("{count} logs loaded"));
        }
        InventoryCommands::Export => {
            let logs = inventory.list()?;
            let json = serde_json::to_string_pretty(&logs).map_err(|e| {
                InfraError::io("serialize inventory", io::Error::other(e))
            })?;
            output::info(&json);
        }
        InventoryCommands::Preset { name } => {
            let preset: Preset = name.parse()?;
            let count = inventory.apply_preset(preset)?;
            output::success(&format!("inventory replaced with preset '{name}' ({count} logs)"));
        }
    }
    Ok(())
}

fn config_command(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
