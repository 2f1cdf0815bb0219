// src/models/opening_hours.rs
// DOCUMENTATION: Opening-hours normalizer
// PURPOSE: Turn provider weekday text ("Monday: 9:00 AM – 5:00 PM") into a WeeklySchedule

use super::{TimeRange, Weekday, WeeklySchedule};

/// Time used when a clock string carries no AM/PM marker or cannot be read
const FALLBACK_TIME: &str = "00:00";

/// Normalize provider weekday text into a structured schedule
/// DOCUMENTATION: One line per reported day. Unknown weekday names are
/// skipped, "Closed" (or an empty remainder) yields a day with no ranges,
/// days never mentioned stay unknown. A later line for the same day wins.
///
/// # Arguments
/// * `lines` - Provider strings such as "Friday: 12:30 PM – 3:00 PM, 6:30 PM – 12:00 AM"
pub fn normalize<S: AsRef<str>>(lines: &[S]) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::new();

    for line in lines {
        let line = normalize_spaces(line.as_ref());
        let (name, remainder) = match line.split_once(':') {
            Some((name, remainder)) => (name, remainder.trim()),
            None => (line.as_str(), ""),
        };

        let Some(day) = Weekday::parse(name) else {
            log::debug!("Skipping opening hours for unknown weekday: {:?}", name);
            continue;
        };

        schedule.set(day, parse_ranges(remainder));
    }

    schedule
}

/// Parse the part after "<Weekday>:" into ranges
fn parse_ranges(remainder: &str) -> Vec<TimeRange> {
    if remainder.is_empty() || remainder.eq_ignore_ascii_case("closed") {
        return Vec::new();
    }

    if remainder.eq_ignore_ascii_case("open 24 hours") {
        return vec![TimeRange::all_day()];
    }

    remainder
        .split(',')
        .filter_map(|segment| {
            let Some((start, end)) = segment.split_once(is_dash) else {
                log::debug!("Skipping opening hours segment without a range: {:?}", segment);
                return None;
            };
            Some(TimeRange::new(to_24_hour(start), to_24_hour(end)))
        })
        .collect()
}

fn is_dash(c: char) -> bool {
    matches!(c, '–' | '—' | '-')
}

/// Replace every non-ASCII (or otherwise unusual) whitespace with a plain space
fn normalize_spaces(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

/// Convert a 12-hour clock string to 24-hour `HH:MM`
/// DOCUMENTATION: "6:30 PM" -> "18:30", "12:00 AM" -> "00:00". Strings without
/// an AM/PM marker, whose numbers do not parse, or whose hour is outside
/// 1-12 (minutes outside 0-59) become "00:00".
pub fn to_24_hour(time: &str) -> String {
    let time = normalize_spaces(time);
    let time = time.trim();

    // ASCII uppercasing keeps byte offsets aligned with `time`
    let upper = time.to_ascii_uppercase();
    let marker = match (upper.find("AM"), upper.find("PM")) {
        (Some(am), Some(pm)) if pm < am => Some((pm, true)),
        (Some(am), _) => Some((am, false)),
        (None, Some(pm)) => Some((pm, true)),
        (None, None) => None,
    };

    let Some((index, is_pm)) = marker else {
        log::debug!("No AM/PM marker in {:?}, using {}", time, FALLBACK_TIME);
        return FALLBACK_TIME.to_string();
    };

    let clock = time[..index].trim();
    let (hours, minutes) = match clock.split_once(':') {
        Some((h, m)) => (h.trim().parse::<u32>(), m.trim().parse::<u32>()),
        None => (clock.parse::<u32>(), Ok(0)),
    };

    let (Ok(mut hours), Ok(minutes)) = (hours, minutes) else {
        log::debug!("Unreadable clock time {:?}, using {}", time, FALLBACK_TIME);
        return FALLBACK_TIME.to_string();
    };

    if !(1..=12).contains(&hours) || minutes > 59 {
        log::debug!("Clock time out of range {:?}, using {}", time, FALLBACK_TIME);
        return FALLBACK_TIME.to_string();
    }

    if is_pm && hours != 12 {
        hours += 12;
    } else if !is_pm && hours == 12 {
        hours = 0;
    }

    format!("{:02}:{:02}", hours, minutes)
}
