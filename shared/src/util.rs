use chrono::NaiveDate;

/// Render a date the way the console lists show it (`dd-mm-yyyy`)
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
