//! Calendar discovery.
//!
//! Prints the calendars visible to the authenticated account so users can
//! find valid `--calendar-id` values. Read-only.

use calgen_providers::{CalendarService, CalendarSummary};

/// Width of the rule printed between entries.
const RULE_WIDTH: usize = 40;

/// Runs the calendar listing, printing either the entries or a one-line
/// diagnostic.
pub async fn run(service: &dyn CalendarService) {
    match service.list_calendars().await {
        Ok(calendars) => print!("{}", render(&calendars)),
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Renders each calendar as a two-line block separated by a rule.
fn render(calendars: &[CalendarSummary]) -> String {
    let mut out = String::new();
    for calendar in calendars {
        out.push_str(&format!("Calendar ID: {}\n", calendar.id));
        if calendar.primary {
            out.push_str(&format!("Name: {} (primary)\n", calendar.name));
        } else {
            out.push_str(&format!("Name: {}\n", calendar.name));
        }
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
    }
    out
}
