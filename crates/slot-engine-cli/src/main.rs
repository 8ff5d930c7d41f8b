//! `slotfinder` CLI: find, check and book meeting slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Best slot for a request plus per-participant busy intervals
//! slotfinder find -i input.json --now 2026-03-01T00:00:00Z
//!
//! # Top 5 slots instead of just the best one
//! slotfinder find -i input.json --alternatives 5
//!
//! # Why is 11:00 not available?
//! slotfinder check -i input.json --start 2026-03-02T11:00:00Z
//!
//! # Book against a JSON calendar store (written back in place)
//! slotfinder add-user --store store.json --name Alice
//! slotfinder schedule -i request.json --store store.json
//! slotfinder calendar --store store.json --user <id> --start .. --end ..
//! ```
//!
//! `find` and `check` read `{"request": {...}, "calendars": {"<id>": [{"start": .., "end": ..}]}}`.
//! Logs go to stderr; results are JSON on stdout.

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use slot_engine::config::parse_timezone;
use slot_engine::{
    find_conflicts, find_optimal_slot, rank_slots, BusyIndex, BusyInterval, Clock,
    Conflict, EngineConfig, FixedClock, InMemoryCalendarStore, ParticipantCalendar,
    ScheduleRequest, SchedulerService, SystemClock, TimeRange, User,
};

#[derive(Parser)]
#[command(
    name = "slotfinder",
    version,
    about = "Find the best meeting slot for a group of participants"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// IANA timezone used for working-hours scoring (overrides the config file)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Evaluate the request as if it were this instant (RFC 3339)
    #[arg(long, global = true)]
    now: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best slot for a request and a set of busy calendars
    Find {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print this many ranked slots instead of only the best one (at least 1)
        #[arg(long)]
        alternatives: Option<NonZeroUsize>,
    },
    /// List the busy intervals that block a specific slot
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Slot start (RFC 3339); the slot length is the request duration
        #[arg(long)]
        start: String,
    },
    /// Find a slot and book it for every participant in a calendar store
    Schedule {
        /// Request file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Calendar store file, updated in place
        #[arg(long)]
        store: PathBuf,
    },
    /// Show a user's events within a window
    Calendar {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        user: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Add a user to a calendar store, creating the store if needed
    AddUser {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        name: String,
    },
}

/// Input shape for `find` and `check`.
#[derive(Deserialize)]
struct SearchInput {
    request: ScheduleRequest,
    #[serde(default)]
    calendars: BTreeMap<String, Vec<BusyInterval>>,
}

#[derive(Serialize)]
struct CheckReport {
    slot: TimeRange,
    free: bool,
    conflicts: Vec<Conflict>,
    merged_busy: Vec<BusyInterval>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_deref(), cli.timezone.as_deref())?;
    let clock: Box<dyn Clock> = match cli.now.as_deref() {
        Some(now) => Box::new(FixedClock(parse_instant(now)?)),
        None => Box::new(SystemClock),
    };

    match cli.command {
        Commands::Find {
            input,
            alternatives,
        } => {
            let input = read_search_input(input.as_deref())?;
            let calendars = participant_calendars(&input);

            match alternatives {
                Some(limit) => {
                    let ranked =
                        rank_slots(&input.request, &calendars, &*clock, &config, limit.get())
                            .context("Invalid scheduling request")?;
                    if ranked.is_empty() {
                        bail!("no available time slot found for all participants");
                    }
                    println!("{}", serde_json::to_string_pretty(&ranked)?);
                }
                None => {
                    let slot = find_optimal_slot(&input.request, &calendars, &*clock, &config)
                        .context("Invalid scheduling request")?;
                    match slot {
                        Some(slot) => println!("{}", serde_json::to_string_pretty(&slot)?),
                        None => bail!("no available time slot found for all participants"),
                    }
                }
            }
        }
        Commands::Check { input, start } => {
            let input = read_search_input(input.as_deref())?;
            let calendars = participant_calendars(&input);
            let minutes = u32::try_from(input.request.duration_minutes)
                .ok()
                .filter(|&m| m > 0)
                .with_context(|| {
                    format!(
                        "Request duration must be positive, got {}",
                        input.request.duration_minutes
                    )
                })?;

            let slot = TimeRange::starting_at(parse_instant(&start)?, minutes);
            let conflicts = find_conflicts(&slot, &calendars);
            let report = CheckReport {
                slot,
                free: conflicts.is_empty(),
                conflicts,
                merged_busy: BusyIndex::new(&calendars).merged().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Schedule { input, store } => {
            let request: ScheduleRequest = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Failed to parse scheduling request")?;
            let calendar_store = load_store(&store)?;

            let mut service = SchedulerService::new(calendar_store, &*clock, config);
            let response = service
                .schedule(&request)
                .context("Failed to schedule meeting")?;

            save_store(&store, &service.into_store())?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Calendar {
            store,
            user,
            start,
            end,
        } => {
            let service = SchedulerService::new(load_store(&store)?, &*clock, config);
            let events = service
                .user_calendar(&user, parse_instant(&start)?, parse_instant(&end)?)
                .with_context(|| format!("Failed to read calendar for {}", user))?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        Commands::AddUser { store, name } => {
            let mut calendar_store = if store.exists() {
                load_store(&store)?
            } else {
                InMemoryCalendarStore::new()
            };
            let user = User::new(name, &*clock);
            let id = user.id.clone();
            calendar_store.add_user(user);
            save_store(&store, &calendar_store)?;
            println!("{}", id);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, timezone: Option<&str>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(name) = timezone {
        config.scoring.timezone = parse_timezone(name)?;
    }
    debug!(?config, "engine configuration");
    Ok(config)
}

/// One calendar per requested participant, in request order. Participants
/// without an entry are treated as having no busy intervals.
fn participant_calendars(input: &SearchInput) -> Vec<ParticipantCalendar> {
    for id in input.calendars.keys() {
        if !input.request.participant_ids.contains(id) {
            warn!(participant = %id, "ignoring calendar of a non-participant");
        }
    }

    input
        .request
        .participant_ids
        .iter()
        .map(|id| {
            let busy = input.calendars.get(id).cloned().unwrap_or_default();
            ParticipantCalendar::new(id.clone(), busy)
        })
        .collect()
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid RFC 3339 datetime: {}", raw))
}

fn read_search_input(path: Option<&str>) -> Result<SearchInput> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse search input")
}

fn load_store(path: &Path) -> Result<InMemoryCalendarStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read store: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid store file: {}", path.display()))
}

fn save_store(path: &Path, store: &InMemoryCalendarStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write store: {}", path.display()))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
