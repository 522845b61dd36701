//! Country commands - browse the catalog and show one country

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mapnations_core::services::catalog::{available_languages, sort_by_name};
use mapnations_core::services::CatalogQuery;
use mapnations_core::{Country, LogEvent, MapNationsContext, OperationResult, RegionFilter, Route};
use serde::Serialize;

use super::{get_context, get_logger, log_event};
use crate::output;

/// Spinner on stderr while a request is in flight; hidden when not a terminal
fn spinner(msg: &str, json: bool) -> ProgressBar {
    if json || atty::isnt(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn favorite_codes(ctx: &MapNationsContext) -> Result<Vec<String>> {
    Ok(ctx
        .favorites_service
        .list()?
        .into_iter()
        .map(|c| c.cca3)
        .collect())
}

pub fn list(
    search: Option<String>,
    region: Option<String>,
    language: Option<String>,
    languages: bool,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    ctx.navigation_service.visit(&Route::Home)?;
    let logger = get_logger();

    if languages {
        let pb = spinner("Loading languages...", json);
        let all = ctx.catalog_service.browse(&CatalogQuery::all());
        pb.finish_and_clear();
        let names = available_languages(&all?);

        if json {
            return output::json(&OperationResult::ok(names));
        }
        for name in names {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut query = CatalogQuery::all();
    if let Some(region) = region {
        query = query.region(region.parse::<RegionFilter>()?);
    }
    if let Some(language) = language {
        query = query.language(language);
    }
    if let Some(term) = search {
        query = query.search(term);
    }

    let pb = spinner("Fetching countries...", json);
    let result = ctx.catalog_service.browse(&query);
    pb.finish_and_clear();
    let mut countries = result?;
    sort_by_name(&mut countries);

    log_event(
        &logger,
        LogEvent::new("countries_listed")
            .with_command("countries")
            .with_source(ctx.catalog_service.source_name()),
    );

    if json {
        return output::json(&OperationResult::ok(countries));
    }

    if countries.is_empty() {
        output::warning("No countries found.");
        return Ok(());
    }

    let favorites = favorite_codes(&ctx)?;
    println!("{}", output::country_table(&countries, &favorites));
    println!("{} countries", countries.len());
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CountryDetail {
    country: Country,
    borders: Vec<Country>,
    is_favorite: bool,
}

pub fn show(code: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let code = code.trim().to_uppercase();

    let pb = spinner("Fetching country...", json);
    let result = ctx.open_country(&code);
    pb.finish_and_clear();
    let (country, borders) = result?;
    let is_favorite = ctx.favorites_service.contains(&country.cca3)?;

    log_event(
        &get_logger(),
        LogEvent::new("country_viewed")
            .with_command("country")
            .with_source(ctx.catalog_service.source_name()),
    );

    if json {
        return output::json(&OperationResult::ok(CountryDetail {
            country,
            borders,
            is_favorite,
        }));
    }

    let title = if is_favorite {
        format!("{} ★", country.display_name())
    } else {
        country.display_name().to_string()
    };
    println!("{}", title.bold());
    if country.name.official != country.name.common {
        println!("{}", country.name.official.dimmed());
    }
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Code".to_string(), country.cca3.clone()]);
    table.add_row(vec![
        "Capital".to_string(),
        output::join_or_dash(country.capital.iter().map(String::as_str)),
    ]);
    let region = match &country.subregion {
        Some(sub) => format!("{} ({})", country.region, sub),
        None => country.region.clone(),
    };
    table.add_row(vec!["Region".to_string(), region]);
    table.add_row(vec!["Population".to_string(), output::format_number(country.population)]);
    table.add_row(vec!["Area".to_string(), format!("{} km²", output::format_number(country.area.round() as u64))]);
    table.add_row(vec!["Languages".to_string(), output::join_or_dash(country.language_names())]);
    table.add_row(vec![
        "Currencies".to_string(),
        output::join_or_dash(
            country
                .currencies
                .values()
                .map(|c| c.name.as_str()),
        ),
    ]);
    table.add_row(vec![
        "Timezones".to_string(),
        output::join_or_dash(country.timezones.iter().map(String::as_str)),
    ]);
    table.add_row(vec![
        "Borders".to_string(),
        output::join_or_dash(borders.iter().map(|c| c.display_name())),
    ]);
    if let Some(flag) = country.flag_url() {
        table.add_row(vec!["Flag".to_string(), flag.to_string()]);
    }
    if let Some(maps) = &country.maps {
        if !maps.google_maps.is_empty() {
            table.add_row(vec!["Map".to_string(), maps.google_maps.clone()]);
        }
    }
    println!("{}", table);

    if !is_favorite {
        println!();
        println!("Add to favorites with 'mn favorites add {}'", country.cca3);
    }
    Ok(())
}
