use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::io;

use crate::catalog::SearchField;
use crate::settings::{FormField, SettingsTab};

#[derive(Parser)]
#[command(name = "flowset")]
#[command(about = "Controller settings from the command line")]
#[command(version)]
pub struct Cli {
    /// Base URL of the controller REST API (overrides FLOWSET_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(self) -> crate::error::Result<()> {
        self.command.run(self.api_url.as_deref()).await
    }
}

/// Output format flags shared by every command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// General controller settings
    General {
        #[command(subcommand)]
        action: GeneralAction,
    },

    /// Browse controller service or reporting task types
    Types {
        /// Which catalog to list
        #[arg(value_enum, default_value_t = TypeCatalogKind::ControllerServices)]
        kind: TypeCatalogKind,

        /// Case-insensitive regular expression
        #[arg(short, long)]
        filter: Option<String>,

        /// Match the filter against the type name or the tags
        #[arg(long, default_value = "type", value_parser = parse_search_field)]
        by: SearchField,

        /// Only show types carrying this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Collapse the category with this type (repeatable)
        #[arg(long)]
        collapse: Vec<String>,

        /// Show details of this type
        #[arg(short, long)]
        select: Option<String>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum GeneralAction {
    /// Show the current settings
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Change one or more settings
    Set {
        /// Data flow name
        #[arg(long)]
        name: Option<String>,

        /// Data flow comments
        #[arg(long)]
        comments: Option<String>,

        /// Maximum timer driven thread count
        #[arg(long)]
        max_timer_driven_threads: Option<String>,

        /// Maximum event driven thread count
        #[arg(long)]
        max_event_driven_threads: Option<String>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Create a new flow archive
    Archive {
        #[command(flatten)]
        output: OutputOptions,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (api.url, api.timeout, client.id)
        key: String,
        /// Value to set
        value: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (api.url, api.timeout, client.id)
        key: String,

        #[command(flatten)]
        output: OutputOptions,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeCatalogKind {
    ControllerServices,
    ReportingTasks,
}

impl From<TypeCatalogKind> for SettingsTab {
    fn from(kind: TypeCatalogKind) -> Self {
        match kind {
            TypeCatalogKind::ControllerServices => SettingsTab::ControllerServices,
            TypeCatalogKind::ReportingTasks => SettingsTab::ReportingTasks,
        }
    }
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self, api_url: Option<&str>) -> crate::error::Result<()> {
        use crate::commands::{
            TypesOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_general_archive,
            cmd_general_set, cmd_general_show, cmd_types,
        };

        match self {
            Commands::General { action } => match action {
                GeneralAction::Show { output } => cmd_general_show(api_url, output).await,
                GeneralAction::Set {
                    name,
                    comments,
                    max_timer_driven_threads,
                    max_event_driven_threads,
                    output,
                } => {
                    let edits = [
                        (FormField::Name, name),
                        (FormField::Comments, comments),
                        (FormField::MaxTimerDrivenThreadCount, max_timer_driven_threads),
                        (FormField::MaxEventDrivenThreadCount, max_event_driven_threads),
                    ]
                    .into_iter()
                    .filter_map(|(field, value)| value.map(|v| (field, v)))
                    .collect();
                    cmd_general_set(api_url, edits, output).await
                }
                GeneralAction::Archive { output } => cmd_general_archive(api_url, output).await,
            },

            Commands::Types {
                kind,
                filter,
                by,
                tags,
                collapse,
                select,
                output,
            } => {
                let options = TypesOptions {
                    tab: kind.into(),
                    filter,
                    field: by,
                    tags,
                    collapse,
                    select,
                };
                cmd_types(api_url, options, output).await
            }

            Commands::Config { action } => match action {
                ConfigAction::Show { output } => cmd_config_show(output),
                ConfigAction::Set { key, value, output } => cmd_config_set(&key, &value, output),
                ConfigAction::Get { key, output } => cmd_config_get(&key, output),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_search_field(s: &str) -> Result<SearchField, String> {
    s.parse()
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "flowset", &mut io::stdout());
}
