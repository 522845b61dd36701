//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use mapnations_core::Country;
use serde::Serialize;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print any serializable value as pretty JSON
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Group digits in thousands: 67391582 -> "67,391,582"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Comma-separated list, or "-" when empty
pub fn join_or_dash<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let joined = items.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

/// One row per country, as shown on the catalog and favorites pages
pub fn country_table(countries: &[Country], favorites: &[String]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["", "Code", "Name", "Capital", "Region", "Population", "Languages"]);

    for country in countries {
        let star = if favorites.iter().any(|code| code.eq_ignore_ascii_case(&country.cca3)) {
            "★".yellow().to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            star,
            country.cca3.clone(),
            country.display_name().to_string(),
            join_or_dash(country.capital.iter().map(String::as_str)),
            country.region.clone(),
            format_number(country.population),
            join_or_dash(country.language_names()),
        ]);
    }

    table
}
