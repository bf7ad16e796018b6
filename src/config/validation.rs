use crate::config::defaults::{MAX_HEADING_LEVEL, MIN_HEADING_LEVEL};
use crate::config::selector::{is_heading_selector, levels_to_selector, read_range};
use crate::config::types::OptionsInput;
use crate::utils::error::{DoctocError, Result};

/// Replace `h_range` by the `h_min`/`h_max` pair it names
fn remove_range(input: &mut OptionsInput) -> Result<()> {
    let range = match input.h_range.take() {
        Some(range) => range,
        None => return Ok(()),
    };

    let (min, max) = read_range(&range).ok_or_else(|| {
        DoctocError::validation("hRange", &range, "is not a valid range value (expected hN-M with N, M in [1,6])")
    })?;

    input.h_min = Some(min);
    input.h_max = Some(max);
    Ok(())
}

/// Replace the `h_min`/`h_max` pair by the selector it names.
///
/// A missing bound defaults to 1 or 6 respectively.
fn remove_min_max(input: &mut OptionsInput) -> Result<()> {
    let (min, max) = match (input.h_min.take(), input.h_max.take()) {
        (None, None) => return Ok(()),
        (min, max) => (min.unwrap_or(MIN_HEADING_LEVEL), max.unwrap_or(MAX_HEADING_LEVEL)),
    };

    if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&min) {
        return Err(DoctocError::validation("hMin", min, "is an invalid integer value (expected 1..=6)"));
    }

    if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&max) {
        return Err(DoctocError::validation("hMax", max, "is an invalid integer value (expected 1..=6)"));
    }

    if min > max {
        return Err(DoctocError::validation(
            "hMin,hMax",
            format!("{},{}", min, max),
            "must satisfy hMin <= hMax",
        ));
    }

    input.h_selector = Some(levels_to_selector(min, max));
    Ok(())
}

/// Collapse the range-like fields into `h_selector`.
///
/// Precedence is fixed: `h_range` overrides `h_min`/`h_max`, which override
/// `h_selector`. Afterwards only `h_selector` is left set.
pub fn resolve_selector_fields(input: &mut OptionsInput) -> Result<()> {
    remove_range(input)?;
    remove_min_max(input)
}

/// Validate every supplied field of an already resolved layer
pub fn validate(candidate: &OptionsInput) -> Result<()> {
    if let Some(selector) = &candidate.h_selector {
        if !is_heading_selector(selector) {
            return Err(DoctocError::validation(
                "hSelector",
                selector,
                "is not a valid selector string (expected h1..h6 tokens separated by commas)",
            ));
        }
    }

    if let Some(limit) = candidate.id_length_limit {
        if limit <= 0 {
            return Err(DoctocError::validation(
                "idLengthLimit",
                limit,
                "is not a valid integer value (expected a positive integer)",
            ));
        }
    }

    Ok(())
}
