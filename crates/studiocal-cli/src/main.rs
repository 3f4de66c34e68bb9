use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use studiocal_calendar::{
    available_slots, CalendarClient, CalendarStore, CreateBookingRequest, EquipmentItem,
};
use studiocal_core::StatusFallback;

#[derive(Debug, Parser)]
#[command(name = "studiocal-cli")]
#[command(about = "Studio booking calendar command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the studio × period occupancy grid for a date.
    Calendar {
        /// Date as yyyy-MM-dd; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Restrict to one studio.
        #[arg(long)]
        studio: Option<String>,
    },
    /// List genuinely free (studio, period) slots for a date.
    Slots {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        studio: Option<String>,
    },
    /// Create a booking.
    Book {
        #[arg(long)]
        studio: String,
        #[arg(long)]
        period: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Reservation type token, e.g. 学生レンタル.
        #[arg(long = "type")]
        reservation_type: String,
        /// Member identifier; repeatable.
        #[arg(long = "member")]
        members: Vec<String>,
        /// Equipment line as ID:QTY; repeatable.
        #[arg(long = "equipment")]
        equipment: Vec<String>,
        /// Event name, required only for event reservations.
        #[arg(long)]
        event_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = studiocal_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .context("invalid STUDIOCAL_LOG_LEVEL")?,
        )
        .init();

    let client = CalendarClient::from_config(&config)?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Calendar { date, studio } => {
            let mut store = CalendarStore::with_date(
                date.unwrap_or_else(today),
                config.unknown_status_fallback,
            );
            store.set_studio_filter(studio);
            store.load(&client).await;

            if let Some(error) = store.error() {
                bail!("calendar load failed: {error}");
            }

            println!("{} — periods: {}", store.usage_date(), store.periods().join(" "));
            for studio in store.display_studios(StatusFallback::Free) {
                println!("{} ({})", studio.name, studio.id);
                for period in &studio.periods {
                    let extra = match (&period.reservation_type, &period.event_name) {
                        (Some(t), Some(e)) => format!("  {t} / {e}"),
                        (Some(t), None) => format!("  {t}"),
                        _ => String::new(),
                    };
                    println!(
                        "  {}  {}  {}{extra}",
                        period.label, period.time_range, period.status
                    );
                }
            }
        }
        Commands::Slots { date, studio } => {
            let grid = client
                .fetch_calendar(date.unwrap_or_else(today), studio.as_deref())
                .await?;
            let slots = available_slots(&grid);
            if slots.is_empty() {
                println!("no available slots on {}", grid.usage_date);
            }
            for slot in slots {
                println!("{}  {}  {}", slot.usage_date, slot.studio_id, slot.period);
            }
        }
        Commands::Book {
            studio,
            period,
            date,
            reservation_type,
            members,
            equipment,
            event_name,
        } => {
            let equipment_items = equipment
                .iter()
                .map(|raw| parse_equipment(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let request = CreateBookingRequest {
                studio_id: studio,
                period,
                usage_date: date.unwrap_or_else(today),
                reservation_type,
                members,
                equipment_items,
                event_name,
            };
            let ack = client.create_booking(&request).await?;
            println!(
                "booked {} / {} on {}: {} ({})",
                ack.studio_id, ack.period, ack.usage_date, ack.booking_id, ack.message
            );
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an equipment line of the form `ID:QTY`.
fn parse_equipment(raw: &str) -> anyhow::Result<EquipmentItem> {
    let Some((id, qty)) = raw.rsplit_once(':') else {
        bail!("equipment must be ID:QTY, got '{raw}'");
    };
    if id.is_empty() {
        bail!("equipment must be ID:QTY, got '{raw}'");
    }
    let quantity: u32 = qty
        .parse()
        .with_context(|| format!("invalid equipment quantity in '{raw}'"))?;
    Ok(EquipmentItem {
        equipment_id: id.to_string(),
        quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_equipment_splits_id_and_quantity() {
        let item = parse_equipment("amp-1:2").unwrap();
        assert_eq!(item.equipment_id, "amp-1");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn parse_equipment_rejects_missing_quantity() {
        assert!(parse_equipment("amp-1").is_err());
        assert!(parse_equipment("amp-1:two").is_err());
        assert!(parse_equipment(":2").is_err());
    }
}
