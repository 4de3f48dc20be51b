use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The one job-configuration record. All four fields must be non-empty
/// before the main screen is allowed to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub email: String,
    pub client: String,
    pub jobsite: String,
}

impl JobConfig {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.client, &self.jobsite]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            client: self.client.trim().to_string(),
            jobsite: self.jobsite.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "Start of Day")]
    StartOfDay,
    #[serde(rename = "End of Day")]
    EndOfDay,
    #[serde(rename = "Delay Report")]
    DelayReport,
}

impl EventType {
    /// Parse the short action form used by the buttons and the send API.
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "start" => Some(Self::StartOfDay),
            "end" => Some(Self::EndOfDay),
            "delay" => Some(Self::DelayReport),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::StartOfDay => "Start of Day",
            Self::EndOfDay => "End of Day",
            Self::DelayReport => "Delay Report",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub time: String,
}

/// Date-key (`YYYY-MM-DD`, local time) to ordered entries. Serialized as the
/// bare mapping so the log file holds nothing but the days themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogBook {
    pub days: BTreeMap<String, Vec<LogEntry>>,
}

impl LogBook {
    pub fn day(&self, key: &str) -> &[LogEntry] {
        self.days.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn append(&mut self, key: String, entry: LogEntry) {
        self.days.entry(key).or_default().push(entry);
    }
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub action: String,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub mailto: String,
    pub entry: LogEntry,
}

/// Body of the scriptless delay-form fallback.
#[derive(Debug, Deserialize)]
pub struct DelayForm {
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: EventType) -> LogEntry {
        LogEntry {
            kind,
            time: "08:05:09 AM".to_string(),
        }
    }

    #[test]
    fn config_with_blank_field_is_incomplete() {
        let cfg = JobConfig {
            name: "J Smith".to_string(),
            email: "j@x.com".to_string(),
            client: "   ".to_string(),
            jobsite: "Site 5".to_string(),
        };
        assert!(!cfg.is_complete());
        assert!(
            JobConfig {
                client: "Acme".to_string(),
                ..cfg
            }
            .is_complete()
        );
    }

    #[test]
    fn action_parsing_covers_the_three_events() {
        assert_eq!(EventType::from_action("start"), Some(EventType::StartOfDay));
        assert_eq!(EventType::from_action("end"), Some(EventType::EndOfDay));
        assert_eq!(
            EventType::from_action("delay"),
            Some(EventType::DelayReport)
        );
        assert_eq!(EventType::from_action("lunch"), None);
    }

    #[test]
    fn entries_serialize_with_full_labels() {
        let json = serde_json::to_string(&entry(EventType::DelayReport)).unwrap();
        assert!(json.contains(r#""type":"Delay Report""#));
    }

    #[test]
    fn append_keeps_insertion_order_within_a_day() {
        let mut log = LogBook::default();
        let key = "2026-01-05".to_string();
        log.append(key.clone(), entry(EventType::StartOfDay));
        log.append(key.clone(), entry(EventType::DelayReport));
        log.append(key.clone(), entry(EventType::EndOfDay));

        let kinds: Vec<EventType> = log.day(&key).iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventType::StartOfDay,
                EventType::DelayReport,
                EventType::EndOfDay
            ]
        );
    }

    #[test]
    fn append_on_a_new_day_leaves_prior_days_untouched() {
        let mut log = LogBook::default();
        log.append("2026-01-05".to_string(), entry(EventType::StartOfDay));
        log.append("2026-01-06".to_string(), entry(EventType::StartOfDay));
        log.append("2026-01-06".to_string(), entry(EventType::EndOfDay));

        assert_eq!(log.day("2026-01-05").len(), 1);
        assert_eq!(log.day("2026-01-06").len(), 2);
        assert!(log.day("2026-01-07").is_empty());
    }
}
