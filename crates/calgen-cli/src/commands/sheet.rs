//! Batch creation from a CSV sheet.

use std::path::Path;

use tracing::debug;

use calgen_core::{build_payload, read_sheet};
use calgen_providers::CalendarService;

use crate::cli::FromSheetArgs;
use crate::error::CliResult;

use super::calendars;

/// Runs the `from-sheet` command.
///
/// With `--list-calendars` the command only enumerates calendars. Otherwise
/// rows are submitted strictly in file order and the first failure aborts
/// the rest of the batch.
pub async fn run(args: &FromSheetArgs, service: &dyn CalendarService) {
    if args.calendar.list_calendars {
        calendars::run(service).await;
        return;
    }

    match process_sheet(
        &args.file,
        &args.timezone,
        &args.calendar.calendar_id,
        service,
    )
    .await
    {
        Ok(count) => println!("Successfully created {} events!", count),
        Err(e) => eprintln!("Error processing sheet: {}", e),
    }
}

/// Validates the sheet, submits one event per row, and returns how many
/// were created.
///
/// Header validation happens before any provider call; a row-level failure
/// (validation or submission) stops the batch immediately.
async fn process_sheet(
    path: &Path,
    default_timezone: &str,
    calendar_id: &str,
    service: &dyn CalendarService,
) -> CliResult<usize> {
    let rows = read_sheet(path)?;

    let mut created = 0;
    for row in rows {
        let request = row.into_request(default_timezone, calendar_id);
        let payload = build_payload(&request)?;
        let event = service.insert_event(&request.calendar_id, &payload).await?;
        debug!("created event {}", event.id);
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CalendarOpts, FromSheetArgs};
    use crate::commands::mock::MockService;

    use std::io::Write;

    fn write_sheet(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn submits_one_event_per_row_in_order() {
        let file = write_sheet(
            "Title,Date,Timezone\n\
             Launch,2024-04-01,Europe/Paris\n\
             Retro,2024-04-02,\n",
        );

        let service = MockService::new();
        let count = process_sheet(file.path(), "UTC", "primary", &service)
            .await
            .unwrap();

        assert_eq!(count, 2);
        let inserted = service.inserted();
        assert_eq!(inserted.len(), 2);

        // Row timezone wins; the blank cell falls back to the default.
        assert_eq!(inserted[0].1.summary, "Launch");
        assert_eq!(inserted[0].1.start.time_zone, "Europe/Paris");
        assert_eq!(inserted[1].1.summary, "Retro");
        assert_eq!(inserted[1].1.start.time_zone, "UTC");
        assert_eq!(inserted[1].1.start.date_time, "2024-04-02T00:00:00+00:00");
    }

    #[tokio::test]
    async fn blank_timezone_uses_the_command_default_not_utc() {
        let file = write_sheet(
            "Title,Date,Timezone\n\
             Launch,2024-04-01,\n",
        );

        let service = MockService::new();
        process_sheet(file.path(), "Asia/Tokyo", "primary", &service)
            .await
            .unwrap();

        assert_eq!(service.inserted()[0].1.start.time_zone, "Asia/Tokyo");
    }

    #[tokio::test]
    async fn country_column_is_ignored() {
        let file = write_sheet(
            "Country,Title,Date,Timezone\n\
             France,Launch,2024-04-01,Europe/Paris\n",
        );

        let service = MockService::new();
        let count = process_sheet(file.path(), "UTC", "primary", &service)
            .await
            .unwrap();

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn missing_column_rejects_the_sheet_before_any_call() {
        let file = write_sheet("Title,Date\nLaunch,2024-04-01\n");

        let service = MockService::new();
        let result = process_sheet(file.path(), "UTC", "primary", &service).await;

        assert!(result.is_err());
        assert!(service.inserted().is_empty());
    }

    #[tokio::test]
    async fn unknown_row_timezone_aborts_the_batch() {
        let file = write_sheet(
            "Title,Date,Timezone\n\
             Launch,2024-04-01,Mars/Olympus\n\
             Retro,2024-04-02,UTC\n",
        );

        let service = MockService::new();
        let result = process_sheet(file.path(), "UTC", "primary", &service).await;

        assert!(result.is_err());
        // The bad first row means nothing is ever submitted.
        assert!(service.inserted().is_empty());
    }

    #[tokio::test]
    async fn submission_failure_aborts_remaining_rows() {
        let file = write_sheet(
            "Title,Date,Timezone\n\
             One,2024-04-01,UTC\n\
             Two,2024-04-02,UTC\n\
             Three,2024-04-03,UTC\n",
        );

        // Second insertion fails.
        let service = MockService::failing_on(1);
        let result = process_sheet(file.path(), "UTC", "primary", &service).await;

        assert!(result.is_err());
        // Rows one and two were attempted; row three never was.
        assert_eq!(service.inserted().len(), 2);
    }

    #[tokio::test]
    async fn rows_inherit_the_requested_calendar() {
        let file = write_sheet(
            "Title,Date,Timezone\n\
             Launch,2024-04-01,UTC\n",
        );

        let service = MockService::new();
        process_sheet(file.path(), "UTC", "team@group.calendar.google.com", &service)
            .await
            .unwrap();

        assert_eq!(service.inserted()[0].0, "team@group.calendar.google.com");
    }

    #[tokio::test]
    async fn list_calendars_flag_creates_nothing() {
        let args = FromSheetArgs {
            file: std::path::PathBuf::from("does-not-exist.csv"),
            timezone: "UTC".to_string(),
            calendar: CalendarOpts {
                calendar_id: "primary".to_string(),
                list_calendars: true,
            },
        };

        let service = MockService::new();
        run(&args, &service).await;

        assert!(service.inserted().is_empty());
        assert_eq!(service.list_calls(), 1);
    }
}
