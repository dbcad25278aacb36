use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];

/// Offsets keep the local wall-clock reading; a bare date is midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt);
    }
    date_only(s).map(|d| d.and_time(NaiveTime::MIN))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    // a full timestamp in the date field still names a date
    date_only(s).or_else(|| parse_timestamp(s).map(|dt| dt.date()))
}

fn date_only(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}

pub fn combine_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let d = parse_date(date)?;
    let joined = format!("{} {}", d.format("%Y-%m-%d"), time.trim());
    parse_timestamp(&joined).or_else(|| {
        let t = time.trim().to_uppercase();
        TIME_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(&t, f).ok())
            .map(|t| d.and_time(t))
    })
}

/// Stable ascending order of `timestamps`, nulls last.
pub fn chronological_order(timestamps: &[Option<NaiveDateTime>]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..timestamps.len()).collect();
    idx.sort_by(|&a, &b| match (&timestamps[a], &timestamps[b]) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    idx
}

pub fn inverse_order(order: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; order.len()];
    for (pos, &i) in order.iter().enumerate() {
        inv[i] = pos;
    }
    inv
}
