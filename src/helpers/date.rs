//! Date helper functions

use chrono::NaiveDate;

/// Format an optional post date; undated posts render as an empty string
pub fn format_date(date: Option<NaiveDate>, format: &str) -> String {
    date.map(|d| d.format(format).to_string())
        .unwrap_or_default()
}

/// Generate a <time> HTML element
pub fn time_tag(date: Option<NaiveDate>, format: &str) -> String {
    match date {
        Some(d) => format!(
            r#"<time datetime="{}">{}</time>"#,
            d.format("%Y-%m-%d"),
            d.format(format)
        ),
        None => String::new(),
    }
}
