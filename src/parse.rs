//! Parse-then-validate helpers for textual input.
//!
//! Coordinate and channel values arrive as free text from entry fields and
//! command-line flags. These helpers turn them into signed integers with a
//! typed failure naming the offending field; range validation happens
//! afterwards at the operation boundary (`validate_color`, bounds checks),
//! never by catching a panic or a stringly-typed error.

use crate::error::EditError;

/// Parse one integer field. The field name ends up in the error message.
pub fn parse_int(field: &'static str, text: &str) -> Result<i64, EditError> {
    text.trim().parse::<i64>().map_err(|_| EditError::Parse {
        field,
        value: text.trim().to_string(),
    })
}

/// Parse a comma-separated list of exactly `expected` integers, as used by
/// the CLI flags (`--color 255,0,0`, `--fill-rect 2,3,10,12`).
pub fn parse_int_list(
    field: &'static str,
    text: &str,
    expected: usize,
) -> Result<Vec<i64>, EditError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(EditError::Parse {
            field,
            value: text.to_string(),
        });
    }
    parts
        .iter()
        .map(|p| {
            p.parse::<i64>().map_err(|_| EditError::Parse {
                field,
                value: text.to_string(),
            })
        })
        .collect()
}
