//! Plain-text report for a single prediction. Output depends only on the
//! record and the locale table.

use std::fmt::Write;

use shared::domain::{Feature, PredictionRecord};

use crate::LocaleTable;

pub const REPORT_FILE_NAME: &str = "heart_report.txt";
pub const REPORT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

const RULE: &str = "------------------------------------";

pub fn render_report(record: &PredictionRecord, table: &LocaleTable) -> String {
    let verdict = if record.is_high_risk {
        table.text_or_key("high_risk")
    } else {
        table.text_or_key("low_risk")
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", table.text_or_key("report_header"));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{} {}",
        table.text_or_key("patient_name_label"),
        record.identity
    );
    let _ = writeln!(out, "{} {verdict}", table.text_or_key("report_pred"));
    let _ = writeln!(
        out,
        "{} {:.2}%",
        table.text_or_key("report_conf"),
        record.confidence * 100.0
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", table.text_or_key("patient_data"));
    for feature in Feature::ALL {
        let value = match feature {
            Feature::Sex if record.features.sex == 1 => table.text_or_key("male").to_string(),
            Feature::Sex => table.text_or_key("female").to_string(),
            _ => record.features.display_value(feature),
        };
        let _ = writeln!(out, "{}: {value}", table.text_or_key(feature.name()));
    }
    let _ = writeln!(out, "{RULE}");
    out
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
