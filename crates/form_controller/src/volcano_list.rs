//! Loading the volcano selector's lookup table.
//!
//! Two on-disk forms are accepted: a TOML table of `[[volcano]]` entries, and
//! the colon-separated Puff Volcano Listing File used by the model itself:
//!
//! ```text
//! Puff Volcano Listing File
//! Spurr:Alaska:61.30:N:152.25:W:3374
//! ```

use std::{fs, path::Path};

use anyhow::Context;
use shared::{
    domain::{Volcano, VolcanoTable},
    error::FormError,
};
use tracing::info;

pub const LISTING_HEADER: &str = "Puff Volcano Listing File";
pub const MAX_VOLCANOES: usize = 2000;
pub const MAX_TEXT_LEN: usize = 100;

/// Parses a listing file. Listing records carry no source area, so every
/// entry gets `default_area`; the vent elevation becomes the plume bottom.
pub fn parse_volcano_list(text: &str, default_area: f64) -> Result<VolcanoTable, FormError> {
    let mut lines = text.lines().enumerate();

    let header_ok = lines
        .next()
        .is_some_and(|(_, line)| line.starts_with(LISTING_HEADER));
    if !header_ok {
        return Err(list_error(1, format!("missing \"{LISTING_HEADER}\" header")));
    }

    let mut volcanoes = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if volcanoes.len() == MAX_VOLCANOES {
            return Err(list_error(
                line_no,
                format!("more than {MAX_VOLCANOES} volcano records"),
            ));
        }
        volcanoes.push(parse_record(line, line_no, default_area)?);
    }

    Ok(VolcanoTable::new(volcanoes))
}

fn parse_record(line: &str, line_no: usize, default_area: f64) -> Result<Volcano, FormError> {
    let parts: Vec<&str> = line.split(':').map(str::trim).collect();
    let [name, location, lat, lat_dir, lon, lon_dir, elevation, ..] = parts.as_slice() else {
        return Err(list_error(
            line_no,
            format!("expected 7 colon-separated fields, found {}", parts.len()),
        ));
    };

    for (label, text) in [("name", name), ("location", location)] {
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(list_error(
                line_no,
                format!("volcano {label} exceeds {MAX_TEXT_LEN} characters"),
            ));
        }
    }
    if name.is_empty() {
        return Err(list_error(line_no, "volcano name is empty"));
    }

    let lat = parse_number(lat, "latitude", line_no)?;
    let lon = parse_number(lon, "longitude", line_no)?;
    let elevation = parse_number(elevation, "elevation", line_no)?;

    let lat = match hemisphere(lat_dir) {
        Some('N') => lat,
        Some('S') => -lat,
        _ => {
            return Err(list_error(
                line_no,
                format!("latitude direction must be N or S, got {lat_dir:?}"),
            ))
        }
    };
    let lon = match hemisphere(lon_dir) {
        Some('E') => lon,
        Some('W') => -lon,
        _ => {
            return Err(list_error(
                line_no,
                format!("longitude direction must be E or W, got {lon_dir:?}"),
            ))
        }
    };

    Ok(Volcano {
        name: name.to_string(),
        location: (!location.is_empty()).then(|| location.to_string()),
        lat,
        lon,
        plume_min: elevation,
        area: default_area,
    })
}

fn hemisphere(text: &str) -> Option<char> {
    text.chars().next().map(|c| c.to_ascii_uppercase())
}

fn parse_number(text: &str, what: &str, line_no: usize) -> Result<f64, FormError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| list_error(line_no, format!("invalid {what} {text:?}")))
}

fn list_error(line: usize, reason: impl Into<String>) -> FormError {
    FormError::VolcanoList {
        line,
        reason: reason.into(),
    }
}

/// Reads a `.toml` table or a listing file, chosen by extension.
pub fn load_volcano_table(path: &Path, default_area: f64) -> anyhow::Result<VolcanoTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read volcano table '{}'", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let table = if is_toml {
        toml::from_str::<VolcanoTable>(&raw)
            .with_context(|| format!("invalid volcano table '{}'", path.display()))?
    } else {
        parse_volcano_list(&raw, default_area)
            .with_context(|| format!("invalid volcano listing '{}'", path.display()))?
    };

    info!(path = %path.display(), count = table.len(), "loaded volcano table");
    Ok(table)
}

#[cfg(test)]
#[path = "tests/volcano_list_tests.rs"]
mod tests;
