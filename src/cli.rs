use std::{io, path::PathBuf};

use chrono::{Datelike, Local, NaiveDate};

use room_availability::{
    availability::{
        build_month_grid, matches, project_checkout, resolve_duration, resolve_earliest_bookable,
        AvailabilityModel, MonthCell,
    },
    calendar::date_math::parse_date,
    catalog::{FeedClient, FileCatalog, Room, RoomCatalog},
    listing::{search_rooms, ListingFilter, Page},
    reservation::{format_months, quote, stay_length_issue, ReservationDraft},
    storage::{config::Config, drafts::DraftStore},
};

pub const USAGE: &str = "Usage: room-availability [--feed PATH] [--today YYYY-MM-DD] <mode>
Modes:
  --search [--city C] [--max-price P] [--check-in D] [--check-out D] [--page N]
  --grid ROOM_ID
  --duration CHECK_IN CHECK_OUT [--min MONTHS]
  --checkout CHECK_IN MONTHS
  --reserve ROOM_ID [--check-in D] [--months M | --check-out D]";

/// Options that only make sense for some modes.
const MODE_OPTIONS: [&str; 7] = [
    "--city", "--max-price", "--check-in", "--check-out", "--months", "--page", "--min",
];

const MONTH_NAMES_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq)]
pub enum StayInput {
    Months(f64),
    CheckOut(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Help,
    Search { filter: ListingFilter, page: usize },
    Grid { room_id: u64 },
    Duration { check_in: NaiveDate, check_out: NaiveDate, minimum: Option<f64> },
    Checkout { check_in: NaiveDate, months: f64 },
    Reserve { room_id: u64, check_in: Option<NaiveDate>, stay: Option<StayInput> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub feed: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub mode: CliMode,
}

pub fn parse_cli_mode() -> Result<CliOptions, String> {
    parse_args(std::env::args().skip(1))
}

pub fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = String>,
{
    let mut feed = None;
    let mut today = None;
    let mut mode = None;
    let mut filter = ListingFilter::default();
    let mut page = 1;
    let mut minimum = None;
    let mut check_in = None;
    let mut stay = None;
    let mut mode_options = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if MODE_OPTIONS.contains(&arg.as_str()) {
            mode_options.push(arg.clone());
        }

        match arg.as_str() {
            "--feed" => feed = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "--today" => today = Some(next_date(&mut args, &arg)?),
            "--help" => mode = Some(CliMode::Help),
            "--search" => mode = Some(CliMode::Search { filter: ListingFilter::default(), page: 1 }),
            "--city" => filter.city = Some(next_value(&mut args, &arg)?),
            "--max-price" => filter.max_price = Some(next_number(&mut args, &arg)?),
            "--check-in" => check_in = Some(next_date(&mut args, &arg)?),
            "--check-out" => stay = Some(StayInput::CheckOut(next_date(&mut args, &arg)?)),
            "--months" => stay = Some(StayInput::Months(next_number(&mut args, &arg)?)),
            "--page" => page = next_value(&mut args, &arg)?
                .parse()
                .map_err(|_| "Page must be a positive whole number.".to_string())?,
            "--min" => minimum = Some(next_number(&mut args, &arg)?),
            "--grid" => mode = Some(CliMode::Grid { room_id: next_room_id(&mut args, &arg)? }),
            "--duration" => {
                let check_in = next_date(&mut args, &arg)?;
                let check_out = next_date(&mut args, &arg)?;
                mode = Some(CliMode::Duration { check_in, check_out, minimum: None });
            }
            "--checkout" => {
                let check_in = next_date(&mut args, &arg)?;
                let months = next_number(&mut args, &arg)?;
                mode = Some(CliMode::Checkout { check_in, months });
            }
            "--reserve" => mode = Some(CliMode::Reserve {
                room_id: next_room_id(&mut args, &arg)?,
                check_in: None,
                stay: None,
            }),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    let mode = match mode {
        Some(CliMode::Search { .. }) => {
            filter.check_in = check_in;
            filter.check_out = match stay {
                Some(StayInput::CheckOut(date)) => Some(date),
                _ => None,
            };
            CliMode::Search { filter, page }
        }
        Some(CliMode::Duration { check_in, check_out, .. }) => {
            CliMode::Duration { check_in, check_out, minimum }
        }
        Some(CliMode::Reserve { room_id, .. }) => CliMode::Reserve { room_id, check_in, stay },
        Some(other) => other,
        None => return Err("No mode given.".to_string()),
    };

    let (mode_flag, accepted) = accepted_options(&mode);
    if let Some(option) = mode_options.iter().find(|option| !accepted.contains(&option.as_str())) {
        return Err(format!("{} does not apply to {}.", option, mode_flag));
    }

    Ok(CliOptions { feed, today, mode })
}

fn accepted_options(mode: &CliMode) -> (&'static str, &'static [&'static str]) {
    const NONE: &[&str] = &[];
    const SEARCH: &[&str] = &["--city", "--max-price", "--check-in", "--check-out", "--page"];
    const DURATION: &[&str] = &["--min"];
    const RESERVE: &[&str] = &["--check-in", "--check-out", "--months"];

    match mode {
        CliMode::Help => ("--help", NONE),
        CliMode::Search { .. } => ("--search", SEARCH),
        CliMode::Grid { .. } => ("--grid", NONE),
        CliMode::Duration { .. } => ("--duration", DURATION),
        CliMode::Checkout { .. } => ("--checkout", NONE),
        CliMode::Reserve { .. } => ("--reserve", RESERVE),
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .filter(|value| !value.starts_with("--"))
        .ok_or_else(|| format!("{} needs a value.", flag))
}

fn next_date(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<NaiveDate, String> {
    let value = next_value(args, flag)?;
    parse_date(&value).map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", value))
}

fn next_number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64, String> {
    let value = next_value(args, flag)?;
    value.parse().map_err(|_| format!("Invalid number '{}' for {}.", value, flag))
}

fn next_room_id(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<u64, String> {
    let value = next_value(args, flag)?;
    value.parse().map_err(|_| format!("Invalid room id '{}'.", value))
}

pub async fn run(options: CliOptions) -> Result<(), io::Error> {
    let today = options.today.unwrap_or_else(|| Local::now().date_naive());

    match options.mode {
        CliMode::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliMode::Duration { check_in, check_out, minimum } => {
            let months = resolve_duration(Some(check_in), Some(check_out), minimum)
                .map_err(io::Error::other)?;
            println!("{}", format_months(months));
            Ok(())
        }
        CliMode::Checkout { check_in, months } => {
            let check_out = project_checkout(check_in, months).map_err(io::Error::other)?;
            println!("{}", check_out);
            Ok(())
        }
        mode => {
            let config = Config::load_or_create().map_err(|e| io::Error::other(e.to_string()))?;
            let catalog = build_catalog(&config, options.feed);
            run_with_catalog(mode, catalog.as_ref(), &config, today).await
        }
    }
}

fn build_catalog(config: &Config, feed: Option<PathBuf>) -> Box<dyn RoomCatalog> {
    match feed.or_else(|| config.feed.snapshot_path.clone()) {
        Some(path) => Box::new(FileCatalog::new(path)),
        None => Box::new(FeedClient::new(config.feed.url.clone())),
    }
}

async fn run_with_catalog(
    mode: CliMode,
    catalog: &dyn RoomCatalog,
    config: &Config,
    today: NaiveDate,
) -> Result<(), io::Error> {
    match mode {
        CliMode::Search { filter, page } => {
            let results = search_rooms(catalog, &filter, today, page, config.listing.items_per_page)
                .await
                .map_err(|e| io::Error::other(e.to_string()))?;
            println!("{}", format_search_results(&results, today));
        }
        CliMode::Grid { room_id } => {
            let room = find_room(catalog, room_id).await?;
            let cells = build_month_grid(&room.availability, today, config.calendar.years_to_show)
                .map_err(io::Error::other)?;
            println!("{}", room.title);
            println!("{}", format_stay_limits(&room.availability));
            println!("{}", format_grid(&cells));
        }
        CliMode::Reserve { room_id, check_in, stay } => {
            let room = find_room(catalog, room_id).await?;
            let draft = build_draft(&room, today, check_in, stay, config).map_err(io::Error::other)?;
            println!("{}", format_reservation(&room, &draft, today, config));

            match DraftStore::open(&config.storage.drafts_db) {
                Ok(store) => {
                    if let Err(e) = store.store_draft(&draft) {
                        tracing::warn!("Could not save reservation draft: {}", e);
                    }
                }
                Err(e) => tracing::warn!("Draft storage unavailable: {}", e),
            }
        }
        CliMode::Help | CliMode::Duration { .. } | CliMode::Checkout { .. } => {}
    }

    Ok(())
}

async fn find_room(catalog: &dyn RoomCatalog, room_id: u64) -> Result<Room, io::Error> {
    catalog.fetch_room_by_id(room_id)
        .await
        .map_err(|e| io::Error::other(e.to_string()))?
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("Room {} not found", room_id)))
}

fn build_draft(
    room: &Room,
    today: NaiveDate,
    check_in: Option<NaiveDate>,
    stay: Option<StayInput>,
    config: &Config,
) -> Result<ReservationDraft, room_availability::availability::AvailabilityError> {
    let mut draft = ReservationDraft::for_room(room, today, config.booking.default_minimum_stay_months)?;
    if let Some(check_in) = check_in {
        draft.set_check_in(check_in)?;
    }
    match stay {
        Some(StayInput::Months(months)) => draft.set_duration(months)?,
        Some(StayInput::CheckOut(check_out)) => draft.set_check_out(check_out)?,
        None => {}
    }
    Ok(draft)
}

pub fn availability_label(model: &AvailabilityModel, today: NaiveDate) -> String {
    match resolve_earliest_bookable(model, today) {
        Some(date) if date == today => "Available now".to_string(),
        Some(date) => format!("From {}", date.format("%d %b %Y")),
        None => "Ask for availability".to_string(),
    }
}

fn format_search_results(results: &Page<Room>, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    if results.items.is_empty() {
        lines.push("No rooms match these filters.".to_string());
    }
    for room in &results.items {
        lines.push(format!(
            "#{:<6} {:<40} {:<12} {:>8.2} {}  {}",
            room.id,
            room.title,
            room.city,
            room.monthly_price,
            room.currency_symbol,
            availability_label(&room.availability, today)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Page {} of {} ({} rooms)",
        results.number,
        results.total_pages.max(1),
        results.total_items
    ));

    lines.join("\n")
}

fn format_stay_limits(model: &AvailabilityModel) -> String {
    let minimum = model.minimum_stay_months
        .map(format_months)
        .unwrap_or_else(|| "not specified".to_string());
    let maximum = model.maximum_stay_months
        .map(format_months)
        .unwrap_or_else(|| "no maximum".to_string());
    format!("Minimum stay: {}. Maximum stay: {}.", minimum, maximum)
}

pub fn format_grid(cells: &[MonthCell]) -> String {
    let mut rows: Vec<(i32, Vec<String>)> = Vec::new();

    for cell in cells {
        let marker = if cell.is_selectable { "free" } else { "taken" };
        let entry = format!("{} {}", MONTH_NAMES_SHORT[cell.month_index as usize % 12], marker);
        match rows.last_mut() {
            Some((year, entries)) if *year == cell.year => entries.push(entry),
            _ => rows.push((cell.year, vec![entry])),
        }
    }

    rows.into_iter()
        .map(|(year, entries)| format!("{}: {}", year, entries.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_reservation(room: &Room, draft: &ReservationDraft, today: NaiveDate, config: &Config) -> String {
    let mut lines = vec![format!("Reservation draft {} for {}", draft.id, room.title)];

    if let (Some(check_in), Some(check_out)) = (draft.check_in, draft.check_out) {
        lines.push(format!(
            "Check-in {} ({}), check-out {}",
            check_in,
            check_in.weekday(),
            check_out
        ));
    }

    let months = draft.duration_months.unwrap_or(config.booking.default_minimum_stay_months);
    lines.push(format!("Duration: {}", format_months(months)));

    if !matches(&room.availability, &draft.window(), today) {
        lines.push("Warning: the room is not available for these dates.".to_string());
    }
    if let Some(issue) = stay_length_issue(&room.availability, months) {
        lines.push(format!("Warning: {}.", issue));
    }

    let price = quote(room.monthly_price, months, &config.booking);
    lines.push(format!(
        "First month: {:.2} {} (rent {:.2} + platform fee {:.2})",
        price.first_month_total, room.currency_symbol, price.monthly_price, price.platform_fee
    ));
    lines.push(format!("Advance payment: {:.2} {}", price.advance_payment, room.currency_symbol));

    lines.join("\n")
}
