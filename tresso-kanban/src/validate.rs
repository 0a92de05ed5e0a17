//! Input normalization shared by the commands

use crate::error::{Result, TressoError};

/// Trim a required name or title; blank is a missing field
pub fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TressoError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

/// Orders must be finite
pub fn finite_order(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TressoError::invalid_value("order", "must be a finite number"))
    }
}

/// Accept `rrggbb` or `#rrggbb`, return lower-case `rrggbb`
pub fn color(value: &str) -> Result<String> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TressoError::invalid_value(
            "color",
            format!("'{value}' is not a 6-digit hex color"),
        ));
    }
    Ok(hex.to_ascii_lowercase())
}

/// Optional content: blank content clears it
pub fn content(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reject an update that sets nothing
pub fn has_changes(any: bool) -> Result<()> {
    if any {
        Ok(())
    } else {
        Err(TressoError::invalid_value("update", "nothing to change"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  To Do ").unwrap(), "To Do");
        let err = required_text("name", "   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_finite_order() {
        assert_eq!(finite_order(2.5).unwrap(), 2.5);
        assert!(finite_order(f64::NAN).is_err());
        assert!(finite_order(f64::INFINITY).is_err());
    }

    #[test]
    fn test_color() {
        assert_eq!(color("#FF00aa").unwrap(), "ff00aa");
        assert_eq!(color("123abc").unwrap(), "123abc");
        assert!(color("red").is_err());
        assert!(color("#12345").is_err());
    }

    #[test]
    fn test_content() {
        assert_eq!(content(Some("  notes ")), Some("notes".to_string()));
        assert_eq!(content(Some("   ")), None);
        assert_eq!(content(None), None);
    }
}
