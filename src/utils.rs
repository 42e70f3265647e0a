use rust_decimal::prelude::*;

/// Format a number for use as an attribute value.
///
/// Values are rounded to 3 decimal places and trailing zeros are dropped, so
/// output never depends on the platform locale.
/// # Examples
///
/// ```
/// # use flexplot::utils::format_number;
/// assert_eq!(format_number(12.5), "12.5");
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(1.0 / 3.0), "0.333");
/// ```
pub fn format_number(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => value.to_string(),
    }
}

/// Format an axis label with a single decimal place.
///
/// The value is first rounded to 6 decimal places and then truncated, not
/// rounded, to one decimal place.
/// # Examples
///
/// ```
/// # use flexplot::utils::format_label;
/// assert_eq!(format_label(2.56), "2.5");
/// assert_eq!(format_label(3.0), "3.0");
/// assert_eq!(format_label(-1.25), "-1.2");
/// ```
pub fn format_label(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let mut truncated = d
                .round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero)
                .round_dp_with_strategy(1, RoundingStrategy::ToZero);
            if truncated.is_zero() {
                truncated.set_sign_positive(true);
            }
            truncated.rescale(1);
            truncated.to_string()
        }
        None => value.to_string(),
    }
}

/// Evenly spaced values from `min` to `max` inclusive, `intervals + 1` in total.
pub fn spaced_values(min: f64, max: f64, intervals: usize) -> Vec<f64> {
    if intervals == 0 {
        return vec![min];
    }
    let step = (max - min) / intervals as f64;
    (0..=intervals).map(|i| min + i as f64 * step).collect()
}

pub fn linear_scale_float(value: f64, domain: &[f64; 2], range: &[f64; 2]) -> f64 {
    let proportion = (value - domain[0]) / (domain[1] - domain[0]);
    (range[1] - range[0]) * proportion + range[0]
}

/// Minimum and maximum of a list of floats, ignoring NaN.
pub fn float_extent(values: &[f64]) -> Option<[f64; 2]> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |extent, &v| match extent {
            None => Some([v, v]),
            Some([min, max]) => Some([min.min(v), max.max(v)]),
        })
}

pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label_truncates() {
        assert_eq!(format_label(0.3), "0.3");
        assert_eq!(format_label(9.99), "9.9");
        assert_eq!(format_label(-0.04), "0.0");
        assert_eq!(format_label(1000.0), "1000.0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(1.23456), "1.235");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_spaced_values() {
        assert_eq!(spaced_values(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(spaced_values(3.0, 3.0, 0), vec![3.0]);
    }

    #[test]
    fn test_float_extent() {
        assert_eq!(float_extent(&[3.0, -1.0, f64::NAN, 7.5]), Some([-1.0, 7.5]));
        assert_eq!(float_extent(&[]), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
