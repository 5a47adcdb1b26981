//! Text rendering shared by the Energinet tools.
//!
//! Everything here is pure: records in, text out.

use serde_json::Value;

use super::models::Record;

/// Message rendered for an empty record set.
pub const NO_RECORDS: &str = "No records found.";

/// Placeholder for a value that is displayed directly but missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing label (timestamp, area, name).
pub const UNKNOWN: &str = "Unknown";

/// Render up to `max_records` records as labeled blocks.
///
/// Each block is `Record <n>:` followed by one `  key: value` line per field
/// in the record's own order. Blocks are separated by a blank line. When
/// records are left out a trailing `... and <k> more records` line is added.
pub fn format_records(records: &[Record], max_records: usize) -> String {
    if records.is_empty() {
        return NO_RECORDS.to_string();
    }

    let blocks: Vec<String> = records
        .iter()
        .take(max_records)
        .enumerate()
        .map(|(i, record)| {
            let mut block = format!("Record {}:\n", i + 1);
            for (key, value) in record {
                block.push_str(&format!("  {}: {}\n", key, display_value(value)));
            }
            block
        })
        .collect();

    let mut output = blocks.join("\n");
    if records.len() > max_records {
        output.push_str(&format!(
            "\n... and {} more records",
            records.len() - max_records
        ));
    }
    output
}

/// Render a JSON value as plain text: strings unquoted, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a field, treating `null` as missing.
pub fn field<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

/// First present field among `keys`, rendered as text, or `fallback`.
pub fn text_field(record: &Record, keys: &[&str], fallback: &str) -> String {
    keys.iter()
        .find_map(|key| field(record, key))
        .map(display_value)
        .unwrap_or_else(|| fallback.to_string())
}

/// A field shown directly: numbers to `decimals` places, other values as-is,
/// missing as `N/A`.
pub fn measure_field(record: &Record, key: &str, decimals: usize) -> String {
    match field(record, key) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => format_fixed(v, decimals),
            None => n.to_string(),
        },
        Some(other) => display_value(other),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// A field used in arithmetic: missing or non-numeric counts as zero.
pub fn numeric_or_zero(record: &Record, key: &str) -> f64 {
    field(record, key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Format `value` with exactly `decimals` fractional digits.
///
/// Rounds half away from zero on the shortest decimal representation of the
/// value, so `100.005` gives `100.01` even though the nearest binary double
/// sits just below the midpoint.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let frac: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();
    let round_up = frac.get(decimals).is_some_and(|d| *d >= 5);
    digits.extend((0..decimals).map(|i| frac.get(i).copied().unwrap_or(0)));

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - decimals;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let mut out = String::new();
    if value.is_sign_negative() && value != 0.0 {
        out.push('-');
    }
    out.push_str(&render(&digits[..split]));
    if decimals > 0 {
        out.push('.');
        out.push_str(&render(&digits[split..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n).map(|i| record(json!({"id": i}))).collect()
    }

    #[test]
    fn test_format_records_empty() {
        assert_eq!(format_records(&[], 10), "No records found.");
    }

    #[test]
    fn test_format_records_block_layout() {
        let rows = vec![
            record(json!({"HourDK": "2024-01-01T00:00:00", "SpotPriceDKK": 512.5})),
            record(json!({"HourDK": "2024-01-01T01:00:00", "SpotPriceDKK": null})),
        ];
        assert_eq!(
            format_records(&rows, 10),
            "Record 1:\n  HourDK: 2024-01-01T00:00:00\n  SpotPriceDKK: 512.5\n\n\
             Record 2:\n  HourDK: 2024-01-01T01:00:00\n  SpotPriceDKK: null\n"
        );
    }

    #[test]
    fn test_format_records_keeps_field_order() {
        let rows = vec![record(json!({"z": 1, "a": 2, "m": 3}))];
        assert_eq!(format_records(&rows, 1), "Record 1:\n  z: 1\n  a: 2\n  m: 3\n");
    }

    #[test]
    fn test_format_records_block_counts() {
        for len in 0..6 {
            for cap in 1..6 {
                let out = format_records(&records(len), cap);
                let blocks = out.matches("Record ").count();
                assert_eq!(blocks, len.min(cap), "len={len} cap={cap}");

                let summary = format!("... and {} more records", len.saturating_sub(cap));
                assert_eq!(out.contains(&summary), len > cap, "len={len} cap={cap}");
                assert_eq!(out.contains("more records"), len > cap);
            }
        }
    }

    #[test]
    fn test_format_records_summary_line() {
        let out = format_records(&records(5), 2);
        assert!(out.ends_with("\n\n... and 3 more records"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("DK1")), "DK1");
        assert_eq!(display_value(&json!(13.4)), "13.4");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "null");
    }

    #[test]
    fn test_format_fixed_rounds_half_away_from_zero() {
        assert_eq!(format_fixed(100.005, 2), "100.01");
        assert_eq!(format_fixed(13.4, 2), "13.40");
        assert_eq!(format_fixed(123.45, 1), "123.5");
        assert_eq!(format_fixed(1.005, 2), "1.01");
        assert_eq!(format_fixed(9.995, 2), "10.00");
        assert_eq!(format_fixed(99.96, 1), "100.0");
        assert_eq!(format_fixed(0.0, 1), "0.0");
        assert_eq!(format_fixed(42.0, 2), "42.00");
        assert_eq!(format_fixed(-12.345, 2), "-12.35");
        assert_eq!(format_fixed(-0.04, 1), "-0.0");
        assert_eq!(format_fixed(7.25, 0), "7");
    }

    #[test]
    fn test_text_field_fallbacks() {
        let row = record(json!({"HourUTC": "2024-01-01T00:00:00", "HourDK": null}));
        assert_eq!(
            text_field(&row, &["HourDK", "HourUTC"], UNKNOWN),
            "2024-01-01T00:00:00"
        );
        assert_eq!(text_field(&row, &["PriceArea"], UNKNOWN), "Unknown");
    }

    #[test]
    fn test_measure_field() {
        let row = record(json!({"price": 100.005, "label": "n/a upstream"}));
        assert_eq!(measure_field(&row, "price", 2), "100.01");
        assert_eq!(measure_field(&row, "label", 2), "n/a upstream");
        assert_eq!(measure_field(&row, "missing", 2), "N/A");
    }

    #[test]
    fn test_numeric_or_zero() {
        let row = record(json!({"OnshoreWindPower": 12.5, "SolarPower": null, "Bad": "x"}));
        assert_eq!(numeric_or_zero(&row, "OnshoreWindPower"), 12.5);
        assert_eq!(numeric_or_zero(&row, "SolarPower"), 0.0);
        assert_eq!(numeric_or_zero(&row, "Bad"), 0.0);
        assert_eq!(numeric_or_zero(&row, "OffshoreWindPower"), 0.0);
    }
}
