use log::{debug, warn};

use crate::utils::errors::UtilsError;

/// # Errors
///
/// Returns an error if `values` does not hold exactly `expected` finite numbers.
pub fn validate_values(values: &[f64], expected: usize) -> Result<(), UtilsError> {
    debug!("Validating {} values: {:?}", values.len(), values);

    if values.len() != expected {
        warn!("Expected {} values, got {}", expected, values.len());
        return Err(UtilsError::WrongValueCount {
            expected,
            actual: values.len(),
        });
    }

    if let Some((position, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        warn!("Value at position {} is not finite: {}", position, value);
        return Err(UtilsError::NonFiniteValue { position, value });
    }

    debug!("Value validation successful");
    Ok(())
}
