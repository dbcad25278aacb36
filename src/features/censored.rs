use serde::{Deserialize, Serialize};

// a plain number or lab notation text such as `<0.5`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReading {
    Number(f64),
    Text(String),
}

/// `<x` becomes `x / 2` and `>x` becomes `x`. Blank, `-` and non-numeric text are null.
pub fn parse_censored(reading: Option<&RawReading>) -> Option<f64> {
    match reading? {
        RawReading::Number(v) => Some(*v).filter(|v| !v.is_nan()),
        RawReading::Text(s) => parse_censored_str(s),
    }
}

pub fn parse_censored_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    if let Some(rest) = s.strip_prefix('<') {
        return parse_plain(rest).map(|v| v / 2.0);
    }
    if let Some(rest) = s.strip_prefix('>') {
        return parse_plain(rest);
    }
    parse_plain(s)
}

// "nan" parses as a float but is a missing reading
fn parse_plain(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn censor_notation() {
        assert_eq!(parse_censored_str("<4.0"), Some(2.0));
        assert_eq!(parse_censored_str(">10"), Some(10.0));
        assert_eq!(parse_censored_str(" 3.5 "), Some(3.5));
        assert_eq!(parse_censored_str("-"), None);
        assert_eq!(parse_censored_str(""), None);
        assert_eq!(parse_censored_str("<"), None);
        assert_eq!(parse_censored_str("n/a"), None);
    }

    #[test]
    fn nan_text_is_missing() {
        assert_eq!(parse_censored_str("NaN"), None);
        assert_eq!(parse_censored_str("<nan"), None);
        assert_eq!(parse_censored_str(">NaN"), None);
        assert_eq!(parse_censored(Some(&RawReading::Number(f64::NAN))), None);
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(parse_censored(Some(&RawReading::Number(2.5))), Some(2.5));
        assert_eq!(parse_censored(None), None);
    }

    #[test]
    fn deserializes_either_shape() {
        let v: Vec<RawReading> = serde_json::from_str(r#"[0.7, "<0.1"]"#).unwrap();
        assert_eq!(v[0], RawReading::Number(0.7));
        assert_eq!(v[1], RawReading::Text("<0.1".into()));
    }
}
