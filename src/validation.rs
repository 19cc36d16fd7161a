//! Form validation run by the create and edit screens before calling the
//! store. The store itself accepts whatever it is given.

use crate::{
    error::ValidationError,
    state::{CreateTimerInput, DurationParts, TimerColor, TimerUpdate},
};

fn clean_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

fn check_duration(duration: DurationParts) -> Result<(), ValidationError> {
    match duration.checked_total_seconds() {
        None => Err(ValidationError::DurationTooLong),
        Some(0) => Err(ValidationError::ZeroDuration),
        Some(_) => Ok(()),
    }
}

/// Trimmed create input, or the first form error
pub fn validate_create(
    name: &str,
    description: Option<&str>,
    duration: DurationParts,
    color: TimerColor,
) -> Result<CreateTimerInput, ValidationError> {
    let name = clean_name(name)?;
    check_duration(duration)?;

    Ok(CreateTimerInput {
        name,
        description: clean_description(description),
        duration,
        color,
    })
}

/// Edit-screen update with the countdown restarted from the new duration
pub fn validate_edit(
    name: &str,
    description: Option<&str>,
    duration: DurationParts,
    color: TimerColor,
) -> Result<TimerUpdate, ValidationError> {
    let name = clean_name(name)?;
    check_duration(duration)?;

    Ok(TimerUpdate::edit(name, clean_description(description), duration, color))
}
