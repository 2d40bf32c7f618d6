//! City records: one `identifier x y` triple per line.
//!
//! The identifier is skipped; cities are numbered by their position in the
//! input. Blank lines are ignored. Empty input is a valid zero-city problem.

use std::{fs, io::Read, path::Path};

use crate::{City, CitySet, Error, Result, constants::MAX_COORDINATE};

const FIELDS_PER_RECORD: usize = 3;

/// Reads cities from `path`, or from stdin when `path` is `None`.
pub fn read_cities(path: Option<&Path>) -> Result<CitySet> {
    let text = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::other(format!("failed to read input file {}: {e}", path.display()))
        })?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    parse_cities(&text)
}

pub fn parse_cities(text: &str) -> Result<CitySet> {
    let mut cities = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let fields: Vec<&str> = raw_line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != FIELDS_PER_RECORD {
            return Err(Error::malformed_input(
                line_no,
                format!(
                    "expected 'id x y' but got {} field(s): {}",
                    fields.len(),
                    raw_line.trim()
                ),
            ));
        }

        let x = parse_coordinate(line_no, "x", fields[1])?;
        let y = parse_coordinate(line_no, "y", fields[2])?;
        let city = City::new(x, y);
        if !city.is_valid() {
            return Err(Error::malformed_input(
                line_no,
                format!("non-finite coordinates: {city}"),
            ));
        }
        cities.push(city);
    }

    log::debug!("input: parsed n={}", cities.len());
    Ok(CitySet::new(cities))
}

fn parse_coordinate(line_no: usize, axis: &str, raw: &str) -> Result<f64> {
    let value = raw.parse::<f64>().map_err(|_| {
        Error::malformed_input(line_no, format!("invalid {axis} coordinate: {raw}"))
    })?;
    // non-finite values are reported per city
    if value.is_finite() && value.abs() > MAX_COORDINATE {
        return Err(Error::malformed_input(
            line_no,
            format!(
                "{axis} coordinate {raw} exceeds the supported magnitude {MAX_COORDINATE:e}"
            ),
        ));
    }
    Ok(value)
}
