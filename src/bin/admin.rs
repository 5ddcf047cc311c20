//! CLI administration tool for event-booking.
//!
//! Offline helpers for support staff: checking a child's age against slot
//! bounds, pricing a selection from a catalog dump, minting booking
//! references and inspecting saved registration drafts.
//!
//! # Usage
//!
//! ```bash
//! # Age of a child on a given event date
//! cargo run --bin admin -- age --dob 2021-03-15 --on 2026-11-02
//!
//! # Price a selection against a dumped event and add-on catalog
//! cargo run --bin admin -- quote --file selection.json
//!
//! # Mint a manual booking reference
//! cargo run --bin admin -- ref --manual --seed "Asha Rao"
//!
//! # Inspect or remove a draft
//! cargo run --bin admin -- draft show Xy3kP0aB-9_q
//! cargo run --bin admin -- draft clear Xy3kP0aB-9_q
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`:
//!   draft store used by the `draft` commands

use event_booking::config::Config;
use event_booking::domain::draft::DraftToken;
use event_booking::domain::entities::{AddOn, Event};
use event_booking::domain::repositories::DraftStore;
use event_booking::domain::rules::{
    AddOnLine, AgeBoundUnit, BookingReference, LineKind, SelectionSet, SlotChange,
    age_in_months, format_age, is_eligible, quote,
};
use event_booking::infrastructure::drafts::RedisDraftStore;
use event_booking::infrastructure::http::{parse_add_on, parse_event};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// CLI tool for event-booking support staff.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show a child's age in months on a date
    Age {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,

        /// Reference date, defaults to today (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Price a selection offline from a JSON file
    Quote {
        /// Path to the selection file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Generate a booking reference
    Ref {
        /// Reference for an admin-entered booking (MAN prefix)
        #[arg(long, conflicts_with = "online", required_unless_present = "online")]
        manual: bool,

        /// Reference for an online booking (PPT prefix)
        #[arg(long)]
        online: bool,

        /// Seed for the trailing digits, random when omitted
        #[arg(long)]
        seed: Option<String>,
    },

    /// Inspect saved registration drafts
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

/// Draft subcommands.
#[derive(Subcommand)]
enum DraftAction {
    /// Print a draft as JSON
    Show {
        /// Draft token
        token: String,
    },

    /// Delete a draft
    Clear {
        /// Draft token
        token: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Offline quote input.
///
/// `event` and `add_ons` use the same loose shape the catalog webhooks
/// return, so a captured response can be pasted in as-is.
#[derive(Debug, Deserialize)]
struct QuoteFile {
    event: Value,
    #[serde(default)]
    add_ons: Vec<Value>,
    slot_ids: Vec<i64>,
    #[serde(default)]
    add_on_lines: Vec<AddOnLine>,
    #[serde(default)]
    discount: f64,
    /// When present, every selected slot is checked against the child's age.
    date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    age_bound_unit: AgeBoundUnit,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Age { dob, on } => handle_age(dob, on),
        Commands::Quote { file } => handle_quote(&file),
        Commands::Ref { manual, seed, .. } => handle_ref(manual, seed),
        Commands::Draft { action } => {
            let store = connect_draft_store().await?;
            match action {
                DraftAction::Show { token } => show_draft(&store, &token).await?,
                DraftAction::Clear { token, yes } => clear_draft(&store, &token, yes).await?,
            }
            Ok(())
        }
    }
}

async fn connect_draft_store() -> Result<RedisDraftStore> {
    let redis_url = Config::load_redis_url()
        .context("REDIS_URL (or REDIS_HOST) must be set for draft commands")?;

    RedisDraftStore::connect(&redis_url)
        .await
        .context("Failed to connect to Redis")
}

fn handle_age(dob: NaiveDate, on: Option<NaiveDate>) -> Result<()> {
    let on = on.unwrap_or_else(|| Utc::now().date_naive());
    let months = age_in_months(dob, on);

    if months < 0 {
        bail!("Date of birth {} is after {}", dob, on);
    }

    println!("{}", "👶 Child age".bright_blue().bold());
    println!("  {} {}", "Born:".bright_black(), dob);
    println!("  {} {}", "On:".bright_black(), on);
    println!("  {} {}", "Months:".bright_black(), months.to_string().bright_white().bold());
    println!("  {} {}", "Label:".bright_black(), format_age(months).green());

    Ok(())
}

fn handle_quote(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let input: QuoteFile = serde_json::from_str(&raw).context("Invalid quote file")?;

    let event: Event = parse_event(&input.event)
        .ok_or_else(|| anyhow!("'event' is missing an id, title or date"))?;
    let add_ons: Vec<AddOn> = input.add_ons.iter().filter_map(parse_add_on).collect();

    let age_months = input
        .date_of_birth
        .map(|dob| age_in_months(dob, event.date));

    let mut selection = SelectionSet::new();
    for slot_id in &input.slot_ids {
        let slot = event
            .slot(*slot_id)
            .ok_or_else(|| anyhow!("Slot {} is not part of event {}", slot_id, event.id))?;

        if let Some(age) = age_months
            && !is_eligible(slot, age, input.age_bound_unit)
        {
            println!(
                "{} {} is outside the age range of '{}'",
                "⚠".yellow(),
                format_age(age),
                slot.game_title
            );
        }

        if let SlotChange::Replaced { previous_slot_id } = selection.select_slot(slot)? {
            println!(
                "{} Slot {} replaced slot {} of the same game",
                "⚠".yellow(),
                slot_id,
                previous_slot_id
            );
        }
    }
    for line in &input.add_on_lines {
        selection.set_add_on(line.add_on_id, line.variant_id, line.quantity);
    }

    let priced = quote(&selection, &event.slots, &add_ons, input.discount)?;

    println!("{}", format!("🧾 Quote for {}", event.title).bright_blue().bold());
    println!("{}", "─".repeat(75).bright_black());
    println!(
        "{:<8} {:<36} {:>8} {:>6} {:>12}",
        "Kind".bold(),
        "Item".bold(),
        "Unit".bold(),
        "Qty".bold(),
        "Total".bold()
    );
    println!("{}", "─".repeat(75).bright_black());

    for line in &priced.lines {
        let kind = match line.kind {
            LineKind::Game => "game",
            LineKind::AddOn => "add-on",
        };
        println!(
            "{:<8} {:<36} {:>8.2} {:>6} {:>12.2}",
            kind,
            truncate(&line.label, 36),
            line.unit_price,
            line.quantity,
            line.total
        );
    }

    println!("{}", "─".repeat(75).bright_black());
    println!("{:<60} {:>14.2}", "Games", priced.games_total);
    println!("{:<60} {:>14.2}", "Add-ons", priced.add_ons_total);
    println!("{:<60} {:>14.2}", "Subtotal", priced.subtotal);
    if priced.discount > 0.0 {
        println!(
            "{:<60} {:>14}",
            "Discount",
            format!("-{:.2}", priced.discount).green()
        );
    }
    println!(
        "{:<60} {:>14}",
        "Total".bold(),
        format!("{:.2}", priced.total).bright_white().bold()
    );

    Ok(())
}

fn handle_ref(manual: bool, seed: Option<String>) -> Result<()> {
    let today = Utc::now().date_naive();
    let seed = seed.unwrap_or_else(|| Utc::now().timestamp_micros().to_string());

    let reference = if manual {
        BookingReference::manual(&seed, today)
    } else {
        BookingReference::online(&seed, today)
    };

    println!("{}", reference.as_str().bright_yellow().bold());
    Ok(())
}

async fn show_draft(store: &RedisDraftStore, raw: &str) -> Result<()> {
    let token = DraftToken::parse(raw)?;

    let Some(draft) = store.load(&token).await? else {
        println!("{} Draft {} not found or expired", "✗".red(), raw.yellow());
        return Ok(());
    };

    println!("{}", format!("📝 Draft {}", token).bright_blue().bold());
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

async fn clear_draft(store: &RedisDraftStore, raw: &str, yes: bool) -> Result<()> {
    let token = DraftToken::parse(raw)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete draft '{}'?", token))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    if store.clear(&token).await? {
        println!("{} Draft {} deleted", "✓".green(), token.to_string().yellow());
    } else {
        println!("{} Draft {} not found or expired", "✗".red(), token.to_string().yellow());
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
