//! Turns user-facing calculator inputs (annual percentages, calendar dates,
//! typed currency strings) into the normalized values the solvers expect.

use chrono::{Datelike, NaiveDate};

use super::types::GoalError;

pub fn monthly_rate_from_annual_percent(annual_percent: f64) -> f64 {
    annual_percent / 12.0 / 100.0
}

/// Whole calendar months from `start` to `target`; the day of month is ignored.
pub fn months_between(start: NaiveDate, target: NaiveDate) -> i64 {
    let years = target.year() as i64 - start.year() as i64;
    let months = target.month() as i64 - start.month() as i64;
    years * 12 + months
}

pub fn horizon_from_dates(start: NaiveDate, target: NaiveDate) -> Result<u32, GoalError> {
    let months = months_between(start, target);
    if months <= 0 {
        return Err(GoalError::InvalidHorizon { months });
    }
    u32::try_from(months).map_err(|_| GoalError::InvalidHorizon { months })
}

pub fn parse_amount(input: &str) -> Result<f64, GoalError> {
    let invalid = || GoalError::InvalidAmount {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let digits: String = unsigned
        .strip_prefix('$')
        .unwrap_or(unsigned)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if digits.is_empty() {
        return Err(invalid());
    }

    let value: f64 = digits.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(if negative { -value } else { value })
}

pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
