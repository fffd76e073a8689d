use std::collections::HashSet;

use crate::error::{CutError, Result};
use crate::types::{DemandItem, DemandLine};

/// Largest quantity accepted on a single demand line.
pub const MAX_QUANTITY: f64 = 100_000.0;

/// Checks the demand table before anything is optimized.
///
/// Fractional quantities are accepted here; the expander floors them.
pub fn validate_demand(lines: &[DemandLine]) -> Result<()> {
    if lines.is_empty() {
        return Err(CutError::Validation(
            "demand table contains no rows".to_string(),
        ));
    }

    for (row, line) in lines.iter().enumerate() {
        let row = row + 1;
        if line.profile_code.trim().is_empty() {
            return Err(CutError::Validation(format!(
                "row {row}: profile code must not be empty"
            )));
        }
        if !line.length.is_finite() || line.length <= 0.0 {
            return Err(CutError::Validation(format!(
                "row {row}: length must be a positive number, got {}",
                line.length
            )));
        }
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(CutError::Validation(format!(
                "row {row}: quantity must be a positive number, got {}",
                line.quantity
            )));
        }
        if line.quantity > MAX_QUANTITY {
            return Err(CutError::Validation(format!(
                "row {row}: quantity {} exceeds the maximum of {MAX_QUANTITY}",
                line.quantity
            )));
        }
    }
    Ok(())
}

/// Rejects demand that flooring quantities reduced to nothing, either for the
/// whole table or for a single profile code.
pub fn validate_expansion(lines: &[DemandLine], items: &[DemandItem]) -> Result<()> {
    if items.is_empty() {
        return Err(CutError::Validation(
            "demand table yields no whole pieces; every quantity is below 1".to_string(),
        ));
    }

    let expanded: HashSet<&str> = items.iter().map(|i| i.profile_code.as_str()).collect();
    if let Some((row, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, l)| !expanded.contains(l.profile_code.as_str()))
    {
        return Err(CutError::Validation(format!(
            "row {}: profile {} yields no whole pieces (quantity {} floors to 0)",
            row + 1,
            line.profile_code,
            line.quantity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::expand_demand;

    #[test]
    fn test_valid_table() {
        let lines = vec![
            DemandLine::new("ALU001", 1200.0, 5.0),
            DemandLine::new("ALU002", 2000.0, 4.0),
        ];
        assert!(validate_demand(&lines).is_ok());
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(
            validate_demand(&[]),
            Err(CutError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_profile_code() {
        let lines = vec![DemandLine::new("  ", 1200.0, 1.0)];
        let err = validate_demand(&lines).unwrap_err();
        assert!(err.to_string().contains("row 1"), "got: {err}");
    }

    #[test]
    fn test_non_positive_values() {
        let zero_length = vec![
            DemandLine::new("A", 1200.0, 1.0),
            DemandLine::new("A", 0.0, 1.0),
        ];
        let err = validate_demand(&zero_length).unwrap_err();
        assert!(err.to_string().contains("row 2"), "got: {err}");

        let negative_qty = vec![DemandLine::new("A", 1200.0, -3.0)];
        assert!(validate_demand(&negative_qty).is_err());

        let nan_length = vec![DemandLine::new("A", f64::NAN, 1.0)];
        assert!(validate_demand(&nan_length).is_err());
    }

    #[test]
    fn test_quantity_upper_bound() {
        let lines = vec![DemandLine::new("A", 1200.0, 1e15)];
        let err = validate_demand(&lines).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"), "got: {err}");

        let lines = vec![DemandLine::new("A", 1200.0, MAX_QUANTITY)];
        assert!(validate_demand(&lines).is_ok());
    }

    #[test]
    fn test_expansion_with_no_items() {
        let lines = vec![DemandLine::new("A", 1200.0, 0.5)];
        let err = validate_expansion(&lines, &expand_demand(&lines)).unwrap_err();
        assert!(matches!(err, CutError::Validation(_)));
    }

    #[test]
    fn test_expansion_names_empty_profile() {
        let lines = vec![
            DemandLine::new("A", 1200.0, 2.0),
            DemandLine::new("B", 900.0, 0.7),
            DemandLine::new("B", 800.0, 0.2),
        ];
        let err = validate_expansion(&lines, &expand_demand(&lines)).unwrap_err();
        assert_eq!(
            err,
            CutError::Validation(
                "row 2: profile B yields no whole pieces (quantity 0.7 floors to 0)".to_string()
            )
        );
    }

    #[test]
    fn test_expansion_allows_partly_fractional_profile() {
        let lines = vec![
            DemandLine::new("A", 1200.0, 2.0),
            DemandLine::new("A", 800.0, 0.5),
        ];
        assert!(validate_expansion(&lines, &expand_demand(&lines)).is_ok());
    }

    #[test]
    fn test_fractional_quantity_passes() {
        let lines = vec![DemandLine::new("A", 1200.0, 2.5)];
        assert!(validate_demand(&lines).is_ok());
    }
}
