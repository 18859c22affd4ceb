//! Single-event creation.

use calgen_core::{EventRequest, build_payload, parse_attendee_list};
use calgen_providers::{CalendarService, CreatedEvent};

use crate::cli::CreateArgs;
use crate::error::CliResult;

use super::calendars;

/// Runs the `create` command.
///
/// With `--list-calendars` the command only enumerates calendars; no event
/// is created. Any failure is reported as a one-line diagnostic.
pub async fn run(args: &CreateArgs, service: &dyn CalendarService) {
    if args.calendar.list_calendars {
        calendars::run(service).await;
        return;
    }

    match create_event(args, service).await {
        Ok(created) => {
            println!("Event created successfully! Event ID: {}", created.id);
            if let Some(link) = created.html_link {
                println!("View it at: {}", link);
            }
        }
        Err(e) => eprintln!("Error creating event: {}", e),
    }
}

async fn create_event(
    args: &CreateArgs,
    service: &dyn CalendarService,
) -> CliResult<CreatedEvent> {
    let request = request_from_args(args);
    let payload = build_payload(&request)?;
    let created = service.insert_event(&request.calendar_id, &payload).await?;
    Ok(created)
}

fn request_from_args(args: &CreateArgs) -> EventRequest {
    let mut request = EventRequest::new(&args.title, &args.date)
        .with_times(&args.start_time, &args.end_time)
        .with_timezone(&args.timezone)
        .with_calendar_id(&args.calendar.calendar_id);

    if let Some(ref raw) = args.attendees {
        let attendees = parse_attendee_list(raw);
        if !attendees.is_empty() {
            request = request.with_attendees(attendees);
        }
    }

    request
}
