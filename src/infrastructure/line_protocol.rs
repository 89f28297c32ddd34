//! InfluxDB line protocol serialization
//!
//! ```text
//! measurement[,tag=value...] field=value[,field=value...] timestamp_ns
//! ```
//!
//! Tag values, tag keys and field keys escape space, comma and `=`.
//! Measurement names escape space and comma. String field values are
//! double-quoted with `"` and `\` backslash-escaped. Line breaks and tabs
//! anywhere become the two-character sequences `\n`, `\r`, `\t` so a record
//! never spans more than one line.

use crate::domain::metric::{FieldValue, MetricRecord};
use std::io::{self, Write};

pub struct LineProtocolWriter;

impl LineProtocolWriter {
    /// Renders one record as a single line, without the trailing newline.
    pub fn render(record: &MetricRecord) -> String {
        let mut line = escape_measurement(record.measurement());

        for (key, value) in record.tags() {
            line.push(',');
            line.push_str(&escape_tag(key));
            line.push('=');
            line.push_str(&escape_tag(value));
        }

        line.push(' ');
        let fields = record
            .fields()
            .iter()
            .map(|(key, value)| format!("{}={}", escape_tag(key), render_field(value)))
            .collect::<Vec<_>>()
            .join(",");
        line.push_str(&fields);

        line.push(' ');
        line.push_str(&record.timestamp_ns().to_string());
        line
    }

    /// Writes every record as one `\n`-terminated line.
    pub fn write_all<W: Write>(out: &mut W, records: &[MetricRecord]) -> io::Result<()> {
        for record in records {
            writeln!(out, "{}", Self::render(record))?;
        }
        Ok(())
    }
}

pub fn escape_tag(value: &str) -> String {
    escape(value, &[' ', ',', '='])
}

pub fn escape_measurement(value: &str) -> String {
    escape(value, &[' ', ','])
}

pub fn quote_field_str(value: &str) -> String {
    format!("\"{}\"", escape(value, &['\\', '"']))
}

fn escape(value: &str, reserved: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if reserved.contains(&c) => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn render_field(value: &FieldValue) -> String {
    match value {
        FieldValue::Float(f) => render_float(*f),
        FieldValue::Integer(i) => format!("{}i", i),
        FieldValue::String(s) => quote_field_str(s),
        FieldValue::Boolean(b) => b.to_string(),
    }
}

/// Shortest round-trip decimal, always with a decimal point (`5.0`, `0.00012`).
fn render_float(value: f64) -> String {
    let rendered = value.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{}.0", rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig_record() -> MetricRecord {
        MetricRecord::builder("nicehash_rigs")
            .tag("rig_name", "Garage rig, left=1")
            .tag("rig_id", "0-abc")
            .tag("status", "MINING")
            .field("unpaid", 0.00012)
            .field("profitability", 0.0)
            .field("speed_accepted", 60.5)
            .field("speed_rejected", 1.0)
            .timestamp_ns(1_700_000_000_000_000_000)
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_rig_record() {
        assert_eq!(
            LineProtocolWriter::render(&rig_record()),
            "nicehash_rigs,rig_name=Garage\\ rig\\,\\ left\\=1,rig_id=0-abc,status=MINING \
             unpaid=0.00012,profitability=0.0,speed_accepted=60.5,speed_rejected=1.0 \
             1700000000000000000"
        );
    }

    #[test]
    fn test_render_without_tags() {
        let record = MetricRecord::builder("nicehash_account")
            .field("unpaid_total", 5.0)
            .field("next_payout_ts", "2023-11-14T22:00:00Z")
            .timestamp_ns(7)
            .build()
            .unwrap();

        assert_eq!(
            LineProtocolWriter::render(&record),
            "nicehash_account unpaid_total=5.0,next_payout_ts=\"2023-11-14T22:00:00Z\" 7"
        );
    }

    #[test]
    fn test_field_value_types() {
        let record = MetricRecord::builder("m")
            .field("i", 42_i64)
            .field("b", true)
            .field("s", "say \"hi\" \\")
            .timestamp_ns(1)
            .build()
            .unwrap();

        assert_eq!(
            LineProtocolWriter::render(&record),
            "m i=42i,b=true,s=\"say \\\"hi\\\" \\\\\" 1"
        );
    }

    #[test]
    fn test_escape_tag_leaves_no_unescaped_reserved_chars() {
        let input = "a b,c=d  ,,==";
        let escaped = escape_tag(input);

        assert_eq!(escaped, "a\\ b\\,c\\=d\\ \\ \\,\\,\\=\\=");
        let chars: Vec<char> = escaped.chars().collect();
        for (i, c) in chars.iter().enumerate() {
            if matches!(c, ' ' | ',' | '=') {
                assert!(i > 0 && chars[i - 1] == '\\', "unescaped {:?} at {}", c, i);
            }
        }
    }

    #[test]
    fn test_escape_measurement_and_quote() {
        assert_eq!(escape_measurement("a b,c=d"), "a\\ b\\,c=d");
        assert_eq!(quote_field_str(""), "\"\"");
        assert_eq!(quote_field_str("p-1"), "\"p-1\"");
    }

    #[test]
    fn test_line_breaks_never_split_a_record() {
        let record = MetricRecord::builder("nicehash_rigs")
            .tag("rig_name", "evil\nname")
            .tag("status", "A\r\tB")
            .field("note", "two\nlines")
            .timestamp_ns(1)
            .build()
            .unwrap();

        let mut out = Vec::new();
        LineProtocolWriter::write_all(&mut out, &[record]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "nicehash_rigs,rig_name=evil\\nname,status=A\\r\\tB note=\"two\\nlines\" 1\n"
        );
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_backslash_before_line_break_stays_unambiguous() {
        assert_eq!(quote_field_str("a\\\nb"), "\"a\\\\\\nb\"");
    }

    #[test]
    fn test_render_float() {
        assert_eq!(render_float(0.0), "0.0");
        assert_eq!(render_float(-3.0), "-3.0");
        assert_eq!(render_float(0.00001), "0.00001");
        assert_eq!(render_float(1e21), "1000000000000000000000.0");
    }

    #[test]
    fn test_write_all_one_line_per_record() {
        let records = vec![rig_record(), rig_record()];
        let mut out = Vec::new();
        LineProtocolWriter::write_all(&mut out, &records).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(text.ends_with("1700000000000000000\n"));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }
}
