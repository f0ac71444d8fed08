//! Replays a scripted booking session and prints what the view would receive.
//!
//! The script is a JSON array of events, for example
//! `[{"event": "choose_type", "booking_type": "nets"}]`. Each notification is
//! written to stdout as one JSON line; logs go to stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turf_booking::booking::parse_iso_date;
use turf_booking::config::Config;
use turf_booking::{BookingEvent, BookingSession, Notification};

#[derive(Debug, Parser)]
#[command(name = "booking-sim", about = "Replay a booking session script")]
struct Args {
    /// Event script; reads stdin when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Session date as YYYY-MM-DD; defaults to the local date
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Stop at the first refused event
    #[arg(long)]
    strict: bool,
}

fn parse_today(input: &str) -> Result<NaiveDate, String> {
    parse_iso_date(input).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turf_booking=info,booking_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(mode = ?config.availability_mode, "Configuration loaded");

    let script = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };
    let events: Vec<BookingEvent> =
        serde_json::from_str(&script).context("Script is not a list of booking events")?;

    let source = config.availability_source();
    let mut session = match args.today {
        Some(today) => BookingSession::new(today, source),
        None => BookingSession::starting_today(source),
    };

    let mut notifications: Vec<Notification> = Vec::new();
    session.start(&mut notifications);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    flush(&mut out, &mut notifications)?;

    let mut refused = 0usize;
    for (index, event) in events.into_iter().enumerate() {
        let result = session.apply(event, &mut notifications);
        flush(&mut out, &mut notifications)?;

        if let Err(e) = result {
            refused += 1;
            warn!(event = index, "Event refused: {}", e);
            if args.strict {
                anyhow::bail!("event {} refused: {}", index, e);
            }
        }
    }

    info!(
        session = %session.id(),
        refused,
        total = session.quote().total,
        ready = session.is_ready(),
        "Script finished"
    );
    Ok(())
}

/// Write pending notifications as JSON lines.
fn flush(out: &mut impl Write, notifications: &mut Vec<Notification>) -> anyhow::Result<()> {
    for notification in notifications.drain(..) {
        serde_json::to_writer(&mut *out, &notification)?;
        writeln!(out)?;
    }
    Ok(())
}
