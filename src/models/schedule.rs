// src/models/schedule.rs
// DOCUMENTATION: Structured weekly opening hours
// PURPOSE: Day-keyed schedule where "closed" (no ranges) and "unknown" (no entry) stay distinct

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::json::string_field;
use super::opening_hours;

/// Day of the week, in the order schedules are iterated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lower-case key used in persisted records
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// English display name, as the provider writes it
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Match an English weekday name or a stored key, ignoring case
    pub fn parse(name: &str) -> Option<Weekday> {
        let name = name.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.key().eq_ignore_ascii_case(name))
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One opening interval, both ends in 24-hour `HH:MM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The range a provider reports as "Open 24 hours"
    pub fn all_day() -> Self {
        Self::new("00:00", "24:00")
    }

    pub fn is_all_day(&self) -> bool {
        self.start == "00:00" && self.end == "24:00"
    }
}

/// Opening hours for a week
/// DOCUMENTATION: `None` for a day means the provider never reported it;
/// `Some(vec![])` means closed all day. Ranges keep provider order and are
/// not checked for overlap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeeklySchedule {
    days: [Option<Vec<TimeRange>>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: Weekday) -> Option<&[TimeRange]> {
        self.days[day.index()].as_deref()
    }

    pub fn is_known(&self, day: Weekday) -> bool {
        self.days[day.index()].is_some()
    }

    pub fn is_closed(&self, day: Weekday) -> bool {
        matches!(&self.days[day.index()], Some(ranges) if ranges.is_empty())
    }

    /// True when no day is known at all
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    /// Replace the ranges for one day
    pub fn set(&mut self, day: Weekday, ranges: Vec<TimeRange>) {
        self.days[day.index()] = Some(ranges);
    }

    /// New schedule with one day replaced
    pub fn with_day(mut self, day: Weekday, ranges: Vec<TimeRange>) -> Self {
        self.set(day, ranges);
        self
    }

    /// Known days in week order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[TimeRange])> {
        Weekday::ALL
            .into_iter()
            .filter_map(move |day| self.get(day).map(|ranges| (day, ranges)))
    }

    /// Export as `{ "monday": [{start, end}], ... }`, omitting unknown days
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        for (day, ranges) in self.iter() {
            let ranges = ranges
                .iter()
                .map(|range| {
                    let mut entry = Map::new();
                    entry.insert("start".to_string(), Value::String(range.start.clone()));
                    entry.insert("end".to_string(), Value::String(range.end.clone()));
                    Value::Object(entry)
                })
                .collect();
            obj.insert(day.key().to_string(), Value::Array(ranges));
        }
        Value::Object(obj)
    }

    /// Read a stored schedule
    /// DOCUMENTATION: Accepts the structured object (unknown keys and
    /// non-object ranges ignored) or the legacy list of provider weekday
    /// strings, which is run through the opening-hours normalizer.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(obj)) => {
                let mut schedule = WeeklySchedule::new();
                for (key, ranges) in obj {
                    let Some(day) = Weekday::parse(key) else {
                        log::debug!("Ignoring unknown weekday key in stored hours: {}", key);
                        continue;
                    };
                    let ranges = match ranges {
                        Value::Array(items) => items
                            .iter()
                            .filter_map(Value::as_object)
                            .map(|range| {
                                TimeRange::new(
                                    string_field(range, "start"),
                                    string_field(range, "end"),
                                )
                            })
                            .collect(),
                        _ => Vec::new(),
                    };
                    schedule.set(day, ranges);
                }
                schedule
            }
            Some(Value::Array(lines)) => {
                let lines: Vec<&str> = lines.iter().filter_map(Value::as_str).collect();
                opening_hours::normalize(&lines)
            }
            _ => WeeklySchedule::new(),
        }
    }

    /// Render back into the provider's weekday text
    /// DOCUMENTATION: Produces lines such as "Monday: 9:00 AM – 5:00 PM",
    /// "Tuesday: Closed" or "Sunday: Open 24 hours" for every known day.
    pub fn to_weekday_text(&self) -> Vec<String> {
        self.iter()
            .map(|(day, ranges)| {
                let body = if ranges.is_empty() {
                    "Closed".to_string()
                } else if ranges.len() == 1 && ranges[0].is_all_day() {
                    "Open 24 hours".to_string()
                } else {
                    ranges
                        .iter()
                        .map(|range| {
                            format!("{} – {}", to_twelve_hour(&range.start), to_twelve_hour(&range.end))
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                format!("{}: {}", day.name(), body)
            })
            .collect()
    }

    /// Lines for the place detail view, open days only
    pub fn display_lines(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, ranges)| !ranges.is_empty())
            .map(|(day, ranges)| {
                let slots = ranges
                    .iter()
                    .map(|range| format!("{} - {}", range.start, range.end))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}: {}", day.name(), slots)
            })
            .collect()
    }
}

/// "18:30" -> "6:30 PM"; anything unparseable is passed through
fn to_twelve_hour(time: &str) -> String {
    let parsed = time
        .split_once(':')
        .and_then(|(h, m)| Some((h.parse::<u32>().ok()?, m.parse::<u32>().ok()?)));

    match parsed {
        Some((hours, minutes)) => {
            let marker = if hours % 24 >= 12 { "PM" } else { "AM" };
            let hours = match hours % 12 {
                0 => 12,
                h => h,
            };
            format!("{}:{:02} {}", hours, minutes, marker)
        }
        None => time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weekday_parse() {
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("sunday"), Some(Weekday::Sunday));
        assert_eq!(Weekday::parse(" FRIDAY "), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("Lunedì"), None);
    }

    #[test]
    fn test_closed_and_unknown_are_distinct() {
        let schedule = WeeklySchedule::new().with_day(Weekday::Tuesday, vec![]);
        assert!(schedule.is_closed(Weekday::Tuesday));
        assert!(schedule.is_known(Weekday::Tuesday));
        assert!(!schedule.is_known(Weekday::Wednesday));
        assert!(!schedule.is_closed(Weekday::Wednesday));
    }

    #[test]
    fn test_to_json_omits_unknown_days() {
        let schedule = WeeklySchedule::new()
            .with_day(Weekday::Monday, vec![TimeRange::new("09:00", "17:00")])
            .with_day(Weekday::Tuesday, vec![]);

        assert_eq!(
            schedule.to_json(),
            json!({
                "monday": [{"start": "09:00", "end": "17:00"}],
                "tuesday": []
            })
        );
    }

    #[test]
    fn test_from_json_structured() {
        let value = json!({
            "friday": [{"start": "12:30", "end": "15:00"}, {"start": "18:30"}, 7],
            "sunday": "closed",
            "holiday": []
        });
        let schedule = WeeklySchedule::from_json(Some(&value));

        assert_eq!(
            schedule.get(Weekday::Friday),
            Some(&[TimeRange::new("12:30", "15:00"), TimeRange::new("18:30", "")][..])
        );
        assert!(schedule.is_closed(Weekday::Sunday));
        assert_eq!(schedule.iter().count(), 2);
    }

    #[test]
    fn test_from_json_legacy_text() {
        let value = json!(["Monday: 9:00 AM – 5:00 PM", "Tuesday: Closed"]);
        let schedule = WeeklySchedule::from_json(Some(&value));

        assert_eq!(
            schedule.get(Weekday::Monday),
            Some(&[TimeRange::new("09:00", "17:00")][..])
        );
        assert!(schedule.is_closed(Weekday::Tuesday));
    }

    #[test]
    fn test_from_json_missing() {
        assert!(WeeklySchedule::from_json(None).is_empty());
        assert!(WeeklySchedule::from_json(Some(&json!(3))).is_empty());
    }

    #[test]
    fn test_to_weekday_text() {
        let schedule = WeeklySchedule::new()
            .with_day(
                Weekday::Friday,
                vec![TimeRange::new("12:30", "15:00"), TimeRange::new("18:30", "00:00")],
            )
            .with_day(Weekday::Monday, vec![])
            .with_day(Weekday::Sunday, vec![TimeRange::all_day()]);

        assert_eq!(
            schedule.to_weekday_text(),
            vec![
                "Monday: Closed",
                "Friday: 12:30 PM – 3:00 PM, 6:30 PM – 12:00 AM",
                "Sunday: Open 24 hours",
            ]
        );
    }

    #[test]
    fn test_display_lines_skip_closed() {
        let schedule = WeeklySchedule::new()
            .with_day(Weekday::Monday, vec![])
            .with_day(
                Weekday::Saturday,
                vec![TimeRange::new("09:00", "13:00"), TimeRange::new("16:00", "20:00")],
            );

        assert_eq!(
            schedule.display_lines(),
            vec!["Saturday: 09:00 - 13:00, 16:00 - 20:00"]
        );
    }

    #[test]
    fn test_twelve_hour_conversion() {
        assert_eq!(to_twelve_hour("00:00"), "12:00 AM");
        assert_eq!(to_twelve_hour("09:05"), "9:05 AM");
        assert_eq!(to_twelve_hour("12:00"), "12:00 PM");
        assert_eq!(to_twelve_hour("23:59"), "11:59 PM");
        assert_eq!(to_twelve_hour(""), "");
    }
}
