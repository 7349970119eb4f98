// Command-line surface and dispatch.

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use chrono::TimeZone;
use clap::{Args, Parser, Subcommand};

use crate::api::{InfectionReport, DEFAULT_BASE_URL};
use crate::commands::Session;
use crate::error::Result;
use crate::ui::{resolve, resolve_secret, Prompt};

#[derive(Debug, Parser)]
#[command(name = "hvz", version, about = "Humans vs. Zombies command-line client")]
pub struct Cli {
    /// Base URL of the HvZ API
    #[arg(long, env = "HVZ_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// File holding the API key [default: ~/.hvz.api]
    #[arg(long, env = "HVZ_KEY_FILE", global = true)]
    pub key_file: Option<PathBuf>,

    /// Fail instead of prompting for missing arguments
    #[arg(long, global = true)]
    pub no_input: bool,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate and store your API key
    #[command(name = "api-key")]
    ApiKey {
        /// You can find your API key online
        #[arg(long, env = "HVZ_API_KEY", hide_env_values = true)]
        key: Option<String>,
    },
    /// Show the game rules
    Rules,
    /// Show missions for your team
    Missions,
    /// Register an infection
    Infect(InfectArgs),
    /// Use an antivirus
    Antivirus {
        #[arg(long)]
        antivirus: Option<String>,
        #[arg(long)]
        zombie: Option<String>,
    },
    /// Check whether an antivirus can be used right now
    #[command(name = "antivirus-valid")]
    AntivirusValid,
    /// Show your profile
    Profile,
    /// Set your clan name
    #[command(name = "set-clan")]
    SetClan { clan: String },
    /// Show game status and team sizes
    Status,
    /// Show a player's public information
    Playerinfo { player_id: String },
    /// List every player
    #[command(name = "list-players")]
    ListPlayers {
        #[arg(long, default_value = "team")]
        sort: String,
    },
    /// Search players by name
    #[command(name = "find-player")]
    FindPlayer { name: String },
    /// List every infection
    #[command(name = "list-infections")]
    ListInfections,
}

#[derive(Debug, Args)]
pub struct InfectArgs {
    #[arg(long)]
    pub human: Option<String>,
    #[arg(long)]
    pub zombie: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<String>,
}

/// Resolve missing arguments through `prompt` and run `command`.
pub fn run<Tz, W>(command: Command, session: &Session<Tz>, prompt: &mut dyn Prompt, out: &mut W) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    match command {
        Command::ApiKey { key } => {
            let key = resolve_secret(key, "Your HvZ API Key", prompt)?;
            session.set_api_key(out, &key)
        }
        Command::Rules => session.rules(out),
        Command::Missions => session.missions(out),
        Command::Infect(args) => {
            let report = InfectionReport {
                human: resolve(args.human, "Human ID", prompt)?,
                zombie: resolve(args.zombie, "Zombie ID", prompt)?,
                latitude: args.latitude,
                longitude: args.longitude,
            };
            session.infect(out, &report)
        }
        Command::Antivirus { antivirus, zombie } => {
            let antivirus = resolve(antivirus, "Antivirus ID", prompt)?;
            let zombie = resolve(zombie, "Zombie ID", prompt)?;
            session.antivirus(out, &antivirus, &zombie)
        }
        Command::AntivirusValid => session.antivirus_valid(out),
        Command::Profile => session.profile(out),
        Command::SetClan { clan } => session.set_clan(out, &clan),
        Command::Status => session.status(out),
        Command::Playerinfo { player_id } => session.player_info(out, &player_id),
        Command::ListPlayers { sort } => session.list_players(out, &sort),
        Command::FindPlayer { name } => session.find_player(out, &name),
        Command::ListInfections => session.list_infections(out),
    }
}
