//! Jog distance resolution
//!
//! A chosen preset wins and is used as-is, already in display units.
//! Without one, the custom distance (millimeters) is converted to the
//! display unit and rounded.

use jogpad_core::units::to_unit_value;
use jogpad_core::{MeasurementSystem, PreferenceKey, Preferences};

/// Parse a distance the way the operator typed it; anything that is not a
/// finite, non-negative number is zero.
pub fn parse_distance(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Resolve the magnitude of one jog step
pub fn resolve_jog_distance(preferences: &dyn Preferences, units: MeasurementSystem) -> f64 {
    if let Some(selected) = preferences
        .preference(PreferenceKey::SelectedDistance)
        .filter(|s| !s.is_empty())
    {
        return parse_distance(&selected);
    }

    let custom = preferences
        .preference(PreferenceKey::CustomDistance)
        .map(|s| parse_distance(&s))
        .unwrap_or(0.0);
    to_unit_value(custom, units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jogpad_core::MemoryPreferences;

    fn prefs(selected: &str, custom: &str) -> MemoryPreferences {
        MemoryPreferences::new()
            .with(PreferenceKey::SelectedDistance, selected)
            .with(PreferenceKey::CustomDistance, custom)
    }

    #[test]
    fn test_preset_ignores_units() {
        let p = prefs("5", "100");
        assert_eq!(resolve_jog_distance(&p, MeasurementSystem::Metric), 5.0);
        assert_eq!(resolve_jog_distance(&p, MeasurementSystem::Imperial), 5.0);
    }

    #[test]
    fn test_custom_distance_by_units() {
        let p = prefs("", "25.4");
        assert_eq!(resolve_jog_distance(&p, MeasurementSystem::Imperial), 1.0);
        assert_eq!(resolve_jog_distance(&p, MeasurementSystem::Metric), 25.4);

        let p = prefs("", "1");
        assert_eq!(resolve_jog_distance(&p, MeasurementSystem::Imperial), 0.0394);
        let p = prefs("", "0.1236");
        assert_eq!(resolve_jog_distance(&p, MeasurementSystem::Metric), 0.124);
    }

    #[test]
    fn test_malformed_values_degrade_to_zero() {
        assert_eq!(resolve_jog_distance(&prefs("abc", "10"), MeasurementSystem::Metric), 0.0);
        assert_eq!(resolve_jog_distance(&prefs("", "abc"), MeasurementSystem::Metric), 0.0);
        assert_eq!(resolve_jog_distance(&prefs("-3", "10"), MeasurementSystem::Metric), 0.0);
        assert_eq!(resolve_jog_distance(&prefs("NaN", "10"), MeasurementSystem::Metric), 0.0);
        assert_eq!(
            resolve_jog_distance(&MemoryPreferences::new(), MeasurementSystem::Imperial),
            0.0
        );
    }

    #[test]
    fn test_zero_preset_does_not_fall_back() {
        assert_eq!(resolve_jog_distance(&prefs("0", "10"), MeasurementSystem::Metric), 0.0);
    }
}
