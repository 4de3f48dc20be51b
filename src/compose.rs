use crate::models::{EventType, JobConfig};
use chrono::{DateTime, Local};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Every report goes to the same dispatch inbox.
pub const RECIPIENT: &str = "norfolksouthern@safetynetinstalls.com";

/// RFC 3986 unreserved characters pass through; everything else is escaped,
/// so spaces become `%20` and newlines `%0A` inside the mailto query.
const MAILTO_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone)]
pub struct ComposedEmail {
    pub subject: String,
    pub body: String,
    /// Formatted clock string, kept for the day log.
    pub time: String,
}

pub fn compose(event: EventType, cfg: &JobConfig, reason: Option<&str>) -> ComposedEmail {
    compose_at(Local::now(), event, cfg, reason)
}

pub fn compose_at(
    now: DateTime<Local>,
    event: EventType,
    cfg: &JobConfig,
    reason: Option<&str>,
) -> ComposedEmail {
    let date = long_date(&now);
    let time = clock_time(&now);
    let label = event.label();

    let subject = format!("{label} - {} - {} - {date}", cfg.client, cfg.jobsite);

    let mut body = format!("{label}\n{}\n\n", "=".repeat(label.len()));
    body.push_str(&format!("Name: {}\n", cfg.name));
    body.push_str(&format!("Email: {}\n", cfg.email));
    body.push_str(&format!("Client: {}\n", cfg.client));
    body.push_str(&format!("Jobsite: {}\n", cfg.jobsite));
    body.push_str(&format!("Date: {date}\n"));
    body.push_str(&format!("Time: {time}\n"));

    if let Some(reason) = reason {
        body.push_str(&format!("\nDelay Reason:\n{reason}\n"));
    }

    if let Some(line) = closing_line(event) {
        body.push_str(&format!("\n{line}\n"));
    }

    body.push_str("\n---\nSent via Field Emailer");

    ComposedEmail {
        subject,
        body,
        time,
    }
}

pub fn mailto_uri(subject: &str, body: &str) -> String {
    format!(
        "mailto:{RECIPIENT}?subject={}&body={}",
        utf8_percent_encode(subject, MAILTO_SET),
        utf8_percent_encode(body, MAILTO_SET),
    )
}

fn closing_line(event: EventType) -> Option<&'static str> {
    match event {
        EventType::StartOfDay => Some("Arriving on site. Start of day check-in."),
        EventType::EndOfDay => Some("End of day. Leaving site."),
        EventType::DelayReport => None,
    }
}

/// Long en-US date, e.g. `Monday, January 5, 2026`.
fn long_date(now: &DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// Two-digit clock with seconds, e.g. `08:05:09 AM`.
fn clock_time(now: &DateTime<Local>) -> String {
    now.format("%I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn cfg() -> JobConfig {
        JobConfig {
            name: "J Smith".to_string(),
            email: "j@x.com".to_string(),
            client: "Acme".to_string(),
            jobsite: "Site 5".to_string(),
        }
    }

    fn monday_morning() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 5, 8, 5, 9).unwrap()
    }

    #[test]
    fn subject_follows_the_fixed_pattern() {
        let email = compose_at(monday_morning(), EventType::StartOfDay, &cfg(), None);
        assert_eq!(
            email.subject,
            "Start of Day - Acme - Site 5 - Monday, January 5, 2026"
        );
    }

    #[test]
    fn body_lists_every_config_field_verbatim() {
        let email = compose_at(monday_morning(), EventType::StartOfDay, &cfg(), None);
        assert!(email.body.contains("Name: J Smith\n"));
        assert!(email.body.contains("Email: j@x.com\n"));
        assert!(email.body.contains("Client: Acme\n"));
        assert!(email.body.contains("Jobsite: Site 5\n"));
        assert!(email.body.contains("Date: Monday, January 5, 2026\n"));
        assert!(email.body.contains("Time: 08:05:09 AM\n"));
        assert_eq!(email.time, "08:05:09 AM");
    }

    #[test]
    fn header_underline_matches_label_length() {
        let email = compose_at(monday_morning(), EventType::EndOfDay, &cfg(), None);
        assert!(email.body.starts_with("End of Day\n==========\n\n"));
    }

    #[test]
    fn start_and_end_append_their_fixed_statements() {
        let start = compose_at(monday_morning(), EventType::StartOfDay, &cfg(), None);
        assert!(
            start
                .body
                .contains("\nArriving on site. Start of day check-in.\n")
        );

        let end = compose_at(monday_morning(), EventType::EndOfDay, &cfg(), None);
        assert!(end.body.contains("\nEnd of day. Leaving site.\n"));
        assert!(!end.body.contains("Delay Reason:"));
    }

    #[test]
    fn delay_report_carries_the_reason_block_and_nothing_else() {
        let email = compose_at(
            monday_morning(),
            EventType::DelayReport,
            &cfg(),
            Some("Stuck in traffic"),
        );
        assert!(email.body.contains("\nDelay Reason:\nStuck in traffic\n"));
        assert!(!email.body.contains("Arriving on site"));
        assert!(!email.body.contains("Leaving site"));
    }

    #[test]
    fn footer_signs_off_every_body() {
        let email = compose_at(monday_morning(), EventType::DelayReport, &cfg(), Some("x"));
        assert!(email.body.ends_with("\n---\nSent via Field Emailer"));
    }

    #[test]
    fn mailto_uri_targets_the_fixed_recipient() {
        let uri = mailto_uri("End of Day - Acme", "line one\nline two");
        assert!(uri.starts_with("mailto:norfolksouthern@safetynetinstalls.com?subject="));
        assert!(uri.contains("subject=End%20of%20Day%20-%20Acme"));
        assert!(uri.contains("body=line%20one%0Aline%20two"));
    }

    #[test]
    fn mailto_uri_escapes_query_metacharacters() {
        let uri = mailto_uri("a&b=c", "50% done?");
        assert!(uri.contains("subject=a%26b%3Dc"));
        assert!(uri.contains("body=50%25%20done%3F"));
    }
}
