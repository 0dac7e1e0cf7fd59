// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Petmily — walking-service booking
//
// Entry point. Initialises logging and backend services, then runs one
// command.

mod script;
mod services;

use std::path::Path;
use std::process::ExitCode;

use petmily_booking::format_won;
use petmily_core::error::{PetmilyError, Result};
use petmily_core::human_errors::humanize_error;
use petmily_core::types::{SubscriptionCycle, WalkType};

use services::app_services::AppServices;

const USAGE: &str = "\
usage: petmily <command>

  book <script.json>                          replay a booking script and confirm it
  history                                     list confirmed bookings, newest first
  quote <minutes> <single|package>            price a walk
  subscribe <unit-price> <cycle> <quantity> [day]
                                              quote a product subscription";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let services = match AppServices::init() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "persistent storage failed, using in-memory fallback");
            match AppServices::fallback() {
                Ok(s) => s,
                Err(e) => return report(&e),
            }
        }
    };

    let rest = &args[1..];
    let outcome = match (command.as_str(), rest) {
        ("book", [path]) => book(&services, Path::new(path)),
        ("history", []) => history(&services),
        ("quote", [minutes, walk_type]) => quote(&services, minutes, walk_type),
        ("subscribe", [price, cycle, quantity]) => subscribe(&services, price, cycle, quantity, None),
        ("subscribe", [price, cycle, quantity, day]) => {
            subscribe(&services, price, cycle, quantity, Some(day))
        }
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &PetmilyError) -> ExitCode {
    let human = humanize_error(e);
    eprintln!("{}\n  {}", human.message, human.suggestion);
    tracing::debug!(error = %e, retriable = human.retriable, "command failed");
    ExitCode::FAILURE
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| PetmilyError::InvalidInput(format!("{what} must be a whole number, got {raw:?}")))
}

fn book(services: &AppServices, path: &Path) -> Result<()> {
    let script = script::BookingScript::load(path)?;
    let outcome = script::run(services, &script)?;
    let s = &outcome.summary;

    println!("예약이 확정되었습니다 ({})", outcome.booking.id());
    println!("  일정    {}", s.schedule);
    println!("  산책    {}", s.walk);
    println!("  장소    {}", s.location);
    if let Some(walker) = &s.walker {
        println!("  워커    {walker}");
    }
    if let Some(pet) = &s.pet {
        println!("  반려견  {pet}");
    }
    if !s.cautions.is_empty() {
        println!("  주의    {}", s.cautions.join(", "));
    }
    println!("  결제    {}", s.payment_method);
    println!("  금액    {}", format_won(outcome.booking.pricing().final_price));
    if let Some(fp) = &outcome.fingerprint {
        println!("  기록    {fp}");
    }
    Ok(())
}

fn history(services: &AppServices) -> Result<()> {
    let Some(history) = services.history() else {
        println!("예약 기록을 보관하지 않도록 설정되어 있습니다.");
        return Ok(());
    };
    let bookings = history.all()?;
    if bookings.is_empty() {
        println!("확정된 예약이 없습니다.");
    }
    for b in bookings {
        let d = b.draft();
        println!(
            "{}  {}  {} • {}분  {}",
            b.confirmed_at().format("%Y-%m-%d %H:%M"),
            b.id(),
            d.walk_type.label(),
            d.duration_minutes,
            format_won(b.pricing().final_price),
        );
    }
    Ok(())
}

fn quote(services: &AppServices, minutes: &str, walk_type: &str) -> Result<()> {
    let minutes: u32 = parse_number(minutes, "minutes")?;
    let walk_type: WalkType = walk_type.parse()?;
    for line in services.pricing().price_lines(minutes, walk_type)? {
        println!("{:<24}{:>12}", line.label, line.display_amount());
    }
    Ok(())
}

fn subscribe(
    services: &AppServices,
    price: &str,
    cycle: &str,
    quantity: &str,
    day: Option<&String>,
) -> Result<()> {
    let unit_price: u64 = parse_number(price, "unit price")?;
    let cycle: SubscriptionCycle = cycle.parse()?;
    let quantity: u32 = parse_number(quantity, "quantity")?;
    let day = match day {
        Some(raw) => raw.parse()?,
        None => services.config().default_delivery_day,
    };

    let planner = services.planner();
    let settings = planner.settings(cycle, quantity, day)?;
    let quote = planner.quote(cycle, unit_price, quantity)?;

    println!("{} 배송 · {} · {}개", cycle.label(), settings.delivery_day.label(), quantity);
    println!("  할인율       {}%", settings.discount);
    println!("  개당 가격    {}", format_won(quote.discounted_unit_price));
    println!("  정가 합계    {}", format_won(quote.subtotal));
    println!("  절약 금액    -{}", format_won(quote.savings()));
    println!("  총 결제 금액 {}", format_won(quote.total_price));
    Ok(())
}
