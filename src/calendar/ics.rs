//! ICS payload parsing on top of the icalendar crate's parser

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use icalendar::parser::{Component, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};
use log::warn;

use super::CalendarEvent;
use crate::error::CalendarError;

/// Parse every VEVENT in `content`, tagging events with `source`.
///
/// A document without a `BEGIN:VCALENDAR` line is an error. Each VEVENT block
/// is read on its own, so an event with broken syntax (a line without a
/// colon, a missing `END:VEVENT`) or unresolvable dates is skipped with a
/// warning and its siblings still parse.
pub fn parse_events(content: &str, source: &str) -> Result<Vec<CalendarEvent>, CalendarError> {
    let content = content.trim_start_matches('\u{feff}');
    let unfolded = unfold(content);

    if !unfolded.lines().any(|line| is_line(line, "BEGIN:VCALENDAR")) {
        return Err(CalendarError::Parse("missing BEGIN:VCALENDAR".to_string()));
    }

    let events = vevent_blocks(&unfolded, source)
        .iter()
        .filter_map(|block| match parse_block(block, source) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Failed to parse an event in calendar {}: {}", source, e);
                None
            }
        })
        .collect();

    Ok(events)
}

fn is_line(line: &str, expected: &str) -> bool {
    line.trim().eq_ignore_ascii_case(expected)
}

/// Split unfolded text into standalone `BEGIN:VEVENT` .. `END:VEVENT` blocks.
/// Unterminated blocks are dropped.
fn vevent_blocks(unfolded: &str, source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in unfolded.lines() {
        if is_line(line, "BEGIN:VEVENT") {
            if current.is_some() {
                warn!("Unterminated event in calendar {}", source);
            }
            current = Some(String::new());
        }

        let Some(block) = current.as_mut() else {
            continue;
        };
        block.push_str(line.trim_end_matches('\r'));
        block.push_str("\r\n");

        if is_line(line, "END:VEVENT") {
            blocks.extend(current.take());
        }
    }

    if current.is_some() {
        warn!("Unterminated event in calendar {}", source);
    }

    blocks
}

fn parse_block(block: &str, source: &str) -> Result<CalendarEvent, CalendarError> {
    let parsed = read_calendar(block).map_err(|e| CalendarError::InvalidEvent(e.to_string()))?;
    let vevent = parsed
        .components
        .iter()
        .find(|c| c.name == "VEVENT")
        .ok_or_else(|| CalendarError::InvalidEvent("unreadable VEVENT".to_string()))?;

    parse_vevent(vevent, source)
}

fn parse_vevent(vevent: &Component<'_>, source: &str) -> Result<CalendarEvent, CalendarError> {
    let dtstart = vevent
        .find_prop("DTSTART")
        .ok_or_else(|| CalendarError::InvalidEvent("missing DTSTART".to_string()))?;
    let start = DatePerhapsTime::try_from(dtstart)
        .map_err(|_| CalendarError::InvalidEvent(format!("bad DTSTART {}", dtstart.val.as_ref())))?;
    let start_date = resolve(&start)?;

    let end_date = match vevent.find_prop("DTEND") {
        Some(dtend) => {
            let end = DatePerhapsTime::try_from(dtend).map_err(|_| {
                CalendarError::InvalidEvent(format!("bad DTEND {}", dtend.val.as_ref()))
            })?;
            resolve(&end)?
        }
        None => match vevent.find_prop("DURATION") {
            Some(duration) => {
                let value = duration.val.as_ref();
                start_date
                    .checked_add_signed(parse_duration(value)?)
                    .ok_or_else(|| CalendarError::InvalidEvent(format!("bad DURATION {}", value)))?
            }
            None if matches!(start, DatePerhapsTime::Date(_)) => start_date
                .checked_add_signed(Duration::days(1))
                .ok_or_else(|| CalendarError::InvalidEvent("all-day event out of range".to_string()))?,
            None => start_date,
        },
    };

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape(p.val.as_ref()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "(No title)".to_string());

    let location = vevent
        .find_prop("LOCATION")
        .map(|p| unescape(p.val.as_ref()))
        .filter(|s| !s.is_empty());

    Ok(CalendarEvent {
        summary,
        start_date,
        end_date,
        location,
        source: source.to_string(),
    })
}

/// Resolve an ICS date or date-time to an absolute instant
fn resolve(value: &DatePerhapsTime) -> Result<DateTime<Utc>, CalendarError> {
    match value {
        DatePerhapsTime::Date(date) => local_midnight(*date),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Ok(*dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => from_local(naive),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            match tzid.parse::<chrono_tz::Tz>() {
                Ok(tz) => tz
                    .from_local_datetime(date_time)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok_or_else(|| nonexistent(date_time)),
                // Unknown zones are read as floating time
                Err(_) => from_local(date_time),
            }
        }
    }
}

fn local_midnight(date: NaiveDate) -> Result<DateTime<Utc>, CalendarError> {
    from_local(&date.and_time(chrono::NaiveTime::MIN))
}

fn from_local(naive: &NaiveDateTime) -> Result<DateTime<Utc>, CalendarError> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| nonexistent(naive))
}

fn nonexistent(naive: &NaiveDateTime) -> CalendarError {
    CalendarError::InvalidEvent(format!("nonexistent local time {}", naive))
}

fn parse_duration(value: &str) -> Result<Duration, CalendarError> {
    let value = value.trim().trim_start_matches('+');
    let parsed = iso8601::duration(value)
        .map_err(|_| CalendarError::InvalidEvent(format!("bad DURATION {}", value)))?;
    let std_duration: std::time::Duration = parsed.into();

    Duration::from_std(std_duration)
        .map_err(|_| CalendarError::InvalidEvent(format!("bad DURATION {}", value)))
}

/// Strip ICS text escapes
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(events: &str) -> String {
        format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//EN\r\n{}END:VCALENDAR\r\n",
            events
        )
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_utc_event() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Soccer Practice\r\nLOCATION:Field 3\r\n\
DTSTART:20260210T170000Z\r\nDTEND:20260210T183000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Hunter").unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.summary, "Soccer Practice");
        assert_eq!(event.location.as_deref(), Some("Field 3"));
        assert_eq!(event.start_date, utc(2026, 2, 10, 17, 0));
        assert_eq!(event.end_date, utc(2026, 2, 10, 18, 30));
        assert_eq!(event.source, "Hunter");
    }

    #[test]
    fn test_parse_tzid_event() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Dentist\r\n\
DTSTART;TZID=America/Chicago:20260210T090000\r\n\
DTEND;TZID=America/Chicago:20260210T100000\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Mom").unwrap();

        // CST is UTC-6 in February
        assert_eq!(events[0].start_date, utc(2026, 2, 10, 15, 0));
        assert_eq!(events[0].end_date, utc(2026, 2, 10, 16, 0));
    }

    #[test]
    fn test_unknown_tzid_is_floating() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Custom\r\n\
DTSTART;TZID=Custom/Zone:20260210T090000\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Dad").unwrap();

        let naive = NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(events[0].start_date, from_local(&naive).unwrap());
    }

    #[test]
    fn test_all_day_event_defaults_to_one_day() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Field Trip\r\n\
DTSTART;VALUE=DATE:20260212\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Harper").unwrap();

        let day = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
        assert_eq!(events[0].start_date, local_midnight(day).unwrap());
        assert_eq!(events[0].end_date - events[0].start_date, Duration::days(1));
    }

    #[test]
    fn test_duration_used_when_dtend_missing() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Call\r\n\
DTSTART:20260210T170000Z\r\nDURATION:PT45M\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Dad").unwrap();
        assert_eq!(events[0].end_date, utc(2026, 2, 10, 17, 45));
    }

    #[test]
    fn test_instant_event_when_no_end() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Reminder\r\n\
DTSTART:20260210T170000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Dad").unwrap();
        assert_eq!(events[0].start_date, events[0].end_date);
    }

    #[test]
    fn test_missing_summary_and_escapes() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nLOCATION:Room 1\\, Building A\\; east\r\n\
DTSTART:20260210T170000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Mom").unwrap();
        assert_eq!(events[0].summary, "(No title)");
        assert_eq!(events[0].location.as_deref(), Some("Room 1, Building A; east"));
    }

    #[test]
    fn test_folded_summary() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Parent teacher\r\n  conference\r\n\
DTSTART:20260210T170000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Mom").unwrap();
        assert_eq!(events[0].summary, "Parent teacher conference");
    }

    #[test]
    fn test_malformed_event_does_not_drop_siblings() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Broken\r\nDTSTART:not-a-date\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nUID:2\r\nSUMMARY:No start\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nUID:3\r\nSUMMARY:Fine\r\nDTSTART:20260210T170000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Dad").unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Fine");
    }

    #[test]
    fn test_broken_syntax_does_not_drop_siblings() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Garbled\r\nGARBAGE LINE NO COLON\r\n\
DTSTART:20260210T170000Z\r\nEND:VEVENT\r\n\
BEGIN:VEVENT\r\nUID:2\r\nSUMMARY:Unterminated\r\nDTSTART:20260211T170000Z\r\n\
BEGIN:VEVENT\r\nUID:3\r\nSUMMARY:Fine\r\nDTSTART:20260212T170000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Dad").unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Fine");
    }

    #[test]
    fn test_event_with_alarm() {
        let ics = calendar(
            "BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Piano\r\nDTSTART:20260210T170000Z\r\n\
BEGIN:VALARM\r\nACTION:DISPLAY\r\nTRIGGER:-PT15M\r\nEND:VALARM\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Harper").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Piano");
    }

    #[test]
    fn test_not_a_calendar() {
        let result = parse_events("<html>Not found</html>", "Dad");
        assert!(matches!(result, Err(CalendarError::Parse(_))));
    }

    #[test]
    fn test_non_event_components_ignored() {
        let ics = calendar(
            "BEGIN:VTODO\r\nUID:t\r\nSUMMARY:Buy milk\r\nEND:VTODO\r\n\
BEGIN:VEVENT\r\nUID:1\r\nSUMMARY:Event\r\nDTSTART:20260210T170000Z\r\nEND:VEVENT\r\n",
        );

        let events = parse_events(&ics, "Dad").unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\,b\;c\\d\ne"), "a,b;c\\d\ne");
        assert_eq!(unescape("plain"), "plain");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
