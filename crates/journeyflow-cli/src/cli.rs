use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use journeyflow_core::JourneySort;
use journeyflow_core::models::{JourneyId, StepType};

pub use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "journeyflow")]
#[command(version, about = "JourneyFlow - marketing journey designer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Journey API base URL (defaults to the config file, then http://localhost:5000)
    #[arg(long, global = true, env = "JOURNEYFLOW_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Journey management
    Journey {
        #[command(subcommand)]
        command: JourneyCommands,
    },

    /// Step management
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },

    /// Connect two steps of a journey
    Connect(ConnectArgs),

    /// Remove the connection between two steps
    Disconnect(ConnectArgs),

    /// Open an interactive designer on a journey ("new" for an unsaved one)
    Design {
        journey: JourneyId,

        /// Also remove connections when a step is deleted
        #[arg(long)]
        cascade: bool,
    },
}

#[derive(Subcommand)]
pub enum JourneyCommands {
    /// List journeys
    List {
        #[arg(long, value_enum, default_value = "recent")]
        sort: SortKey,
    },

    /// Show a journey with its steps and connections
    Show { id: i64 },

    /// Create an empty journey
    Create {
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a journey
    Rename {
        id: i64,
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a journey
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Add a step to a journey
    Add {
        journey: i64,
        name: String,

        #[command(flatten)]
        fields: StepFields,
    },

    /// Edit a step; omitted fields keep their value
    Edit {
        journey: i64,
        step: String,

        /// New step name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: StepFields,
    },

    /// Delete a step
    Remove {
        journey: i64,
        step: String,

        /// Also remove connections touching the step
        #[arg(long)]
        cascade: bool,
    },

    /// Move a step on the canvas
    Move {
        journey: i64,
        step: String,
        x: f64,
        y: f64,
    },
}

#[derive(Args, Default)]
pub struct StepFields {
    /// Step type (default, ad, post, campaign)
    #[arg(long = "type")]
    pub step_type: Option<StepType>,

    #[arg(long)]
    pub channel: Option<String>,

    #[arg(long)]
    pub budget: Option<f64>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ConnectArgs {
    pub journey: i64,
    pub source: String,
    pub target: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortKey {
    Id,
    Name,
    Recent,
}

impl From<SortKey> for JourneySort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Id => JourneySort::Id,
            SortKey::Name => JourneySort::Name,
            SortKey::Recent => JourneySort::Recent,
        }
    }
}
