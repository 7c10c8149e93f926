use super::config::ConversionTable;

/// Validate a conversion table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_conversion(table: &ConversionTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if table.version.trim().is_empty() {
        errors.push("conversion.version: must not be empty".to_string());
    }

    if table.media.is_empty() {
        errors.push("conversion.media: at least one medium is required".to_string());
    }

    for (medium, units) in &table.media {
        if units.is_empty() {
            errors.push(format!("conversion.media.{}: no units defined", medium));
        }
        for (unit, multiplier) in units {
            if unit.is_blank() {
                errors.push(format!("conversion.media.{}: unit name is empty", medium));
            }
            if !multiplier.is_finite() {
                errors.push(format!(
                    "conversion.media.{}.{}: multiplier must be a finite number",
                    medium, unit
                ));
            } else if *multiplier < 0.0 {
                errors.push(format!(
                    "conversion.media.{}.{}: multiplier must be non-negative (got {})",
                    medium, unit, multiplier
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
