// src/readings/parse.rs

use crate::config::consts::{
    COL_CONCENTRATION, COL_EVENT, COL_TIME, COL_WEIGHT, GLUCOSE_MATCH, WEIGHT_MATCH,
};
use crate::core::html::{HtmlTable, find_table};

use super::convert::{add_space, no_units, parse_timestamp};
use super::{GlucoseReading, ParseError, Readings, WeightReading};

/// Pull the weight and glucose tables out of the export document.
/// Any missing table/column or malformed cell fails the whole parse.
pub fn parse_readings(doc: &str) -> Result<Readings, ParseError> {
    let weight_table = find_table(doc, WEIGHT_MATCH).ok_or(ParseError::TableNotFound(WEIGHT_MATCH))?;
    let glucose_table = find_table(doc, GLUCOSE_MATCH).ok_or(ParseError::TableNotFound(GLUCOSE_MATCH))?;

    let weight = parse_weight(&weight_table)?;
    let glucose = parse_glucose(&glucose_table)?;
    logf!("Parsed {} glucose rows, {} weight rows", glucose.len(), weight.len());

    Ok(Readings { glucose, weight })
}

fn column(table: &HtmlTable, which: &'static str, name: &'static str) -> Result<usize, ParseError> {
    table
        .column(name)
        .ok_or(ParseError::MissingColumn { table: which, column: name })
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

fn parse_weight(table: &HtmlTable) -> Result<Vec<WeightReading>, ParseError> {
    let t_col = column(table, WEIGHT_MATCH, COL_TIME)?;
    let w_col = column(table, WEIGHT_MATCH, COL_WEIGHT)?;

    table
        .rows
        .iter()
        .map(|row| {
            Ok(WeightReading {
                at: parse_timestamp(cell(row, t_col))?,
                weight: no_units(cell(row, w_col))?,
            })
        })
        .collect()
}

fn parse_glucose(table: &HtmlTable) -> Result<Vec<GlucoseReading>, ParseError> {
    let t_col = column(table, GLUCOSE_MATCH, COL_TIME)?;
    let c_col = column(table, GLUCOSE_MATCH, COL_CONCENTRATION)?;
    let e_col = column(table, GLUCOSE_MATCH, COL_EVENT)?;

    table
        .rows
        .iter()
        .map(|row| {
            Ok(GlucoseReading {
                at: parse_timestamp(cell(row, t_col))?,
                concentration: no_units(cell(row, c_col))?,
                event: add_space(cell(row, e_col)),
            })
        })
        .collect()
}
