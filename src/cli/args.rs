//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{BuckingMode, LengthClass, WallParameters};

/// Log wall planner: which trees to fell, how to buck them, and how to stack the courses
#[derive(Parser, Debug)]
#[command(name = "logwall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, applied on top of the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Inventory file (default from config)
    #[arg(long, global = true, env = "LOGWALL_INVENTORY", value_hint = ValueHint::FilePath)]
    pub inventory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan trees and courses from the stored inventory
    Plan(PlanArgs),

    /// Manage existing logs
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Number of courses to build
    #[arg(short = 'n', long, conflicts_with = "height")]
    pub courses: Option<usize>,

    /// Target wall height in mm (searches for the course count)
    #[arg(long)]
    pub height: Option<f64>,

    /// Diameter catalog in mm, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub diameters: Option<Vec<u32>>,

    /// Long log length in mm
    #[arg(long)]
    pub long_length: Option<u32>,

    /// Short log length in mm
    #[arg(long)]
    pub short_length: Option<u32>,

    /// Stem taper in mm of diameter per meter
    #[arg(long)]
    pub reduction: Option<f64>,

    /// Drying shrinkage in percent
    #[arg(long)]
    pub shrinkage: Option<f64>,

    /// Bark thickness per face in mm
    #[arg(long)]
    pub bark: Option<f64>,

    /// Belly groove height loss in mm
    #[arg(long)]
    pub groove: Option<f64>,

    /// How the diameter catalog is read
    #[arg(long, value_enum)]
    pub bucking: Option<BuckingArg>,

    /// Seed for fixed-root bucking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ignore the stored inventory and plan from scratch
    #[arg(long)]
    pub scratch: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    /// Overlay the given flags onto configured parameters.
    pub fn apply_to(&self, mut params: WallParameters) -> WallParameters {
        if let Some(d) = &self.diameters {
            params.diameters = d.clone();
        }
        if let Some(v) = self.long_length {
            params.long_length_mm = v;
        }
        if let Some(v) = self.short_length {
            params.short_length_mm = v;
        }
        if let Some(v) = self.reduction {
            params.reduction_per_meter = v;
        }
        if let Some(v) = self.shrinkage {
            params.shrinkage_percent = v;
        }
        if let Some(v) = self.bark {
            params.bark_thickness_mm = v;
        }
        if let Some(v) = self.groove {
            params.belly_groove_mm = v;
        }
        if let Some(b) = self.bucking {
            params.bucking = b.into();
        }
        params
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuckingArg {
    FixedRoot,
    TargetMidpoint,
}

impl From<BuckingArg> for BuckingMode {
    fn from(arg: BuckingArg) -> Self {
        match arg {
            BuckingArg::FixedRoot => BuckingMode::FixedRoot,
            BuckingArg::TargetMidpoint => BuckingMode::TargetMidpoint,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthArg {
    Long,
    Short,
}

impl From<LengthArg> for LengthClass {
    fn from(arg: LengthArg) -> Self {
        match arg {
            LengthArg::Long => LengthClass::Long,
            LengthArg::Short => LengthClass::Short,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List stored logs
    List,

    /// Add a log
    Add {
        /// Length class
        #[arg(value_enum)]
        length: LengthArg,
        /// Diameter in mm
        diameter: u32,
    },

    /// Remove a log by its list number (1-based)
    Remove {
        index: usize,
    },

    /// Remove all logs
    Clear,

    /// Replace the inventory with a JSON file
    Import {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the inventory as JSON
    Export,

    /// Replace the inventory with a starter set
    Preset {
        #[arg(value_parser = crate::application::services::Preset::NAMES)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show global config file location
    Path,
    /// Print a commented config template
    Template,
}
