//! Investment valuation and fraction adjustments.
//!
//! The only two client-mutable fields of a holding each get a dedicated
//! endpoint and strict pre-submit validation: bad input never produces a
//! request, it produces an inline message.

use serde_json::json;

use crate::client::ApiClient;
use crate::decode::{decode_item, decode_list};
use crate::error::ApiError;
use crate::models::Investment;

pub async fn list(client: &ApiClient) -> Result<Vec<Investment>, ApiError> {
    let value = client.get("/admin/investments").await?;
    Ok(decode_list(&value, &["investments"]))
}

/// Parses and validates a valuation amount typed into the form.
pub fn validate_valuation(input: &str) -> Result<f64, String> {
    const MESSAGE: &str = "Enter a valid non-negative value";
    let value: f64 = input.trim().parse().map_err(|_| MESSAGE.to_string())?;
    if !value.is_finite() || value < 0.0 {
        return Err(MESSAGE.to_string());
    }
    Ok(value)
}

/// Parses and validates a fraction reduction against the current holding.
/// Each failure mode gets its own message so the admin knows what to fix.
pub fn validate_fraction_reduction(input: &str, fractions_owned: u32) -> Result<u32, String> {
    let Ok(amount) = input.trim().parse::<i64>() else {
        return Err("Enter a whole number of fractions".to_string());
    };
    if amount < 0 {
        return Err("Amount cannot be negative".to_string());
    }
    if amount == 0 {
        return Err("Amount must be greater than zero".to_string());
    }
    if amount > i64::from(fractions_owned) {
        return Err(format!(
            "Cannot reduce by more than the {fractions_owned} fractions held"
        ));
    }
    Ok(amount as u32)
}

pub async fn set_valuation(
    client: &ApiClient,
    id: &str,
    current_value: f64,
) -> Result<Option<Investment>, ApiError> {
    let value = client
        .patch(
            &format!("/admin/investments/{id}/valuation"),
            &json!({ "current_value": current_value }),
        )
        .await?;
    Ok(decode_item(value, &["investment"]).ok())
}

pub async fn reduce_fractions(
    client: &ApiClient,
    id: &str,
    amount: u32,
) -> Result<Option<Investment>, ApiError> {
    let value = client
        .patch(
            &format!("/admin/investments/{id}/fractions"),
            &json!({ "reduce_by": amount }),
        )
        .await?;
    Ok(decode_item(value, &["investment"]).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valuation_rejects_negative_and_garbage_input() {
        assert_eq!(
            validate_valuation("-5").unwrap_err(),
            "Enter a valid non-negative value"
        );
        assert_eq!(
            validate_valuation("twelve").unwrap_err(),
            "Enter a valid non-negative value"
        );
        assert_eq!(
            validate_valuation("").unwrap_err(),
            "Enter a valid non-negative value"
        );
        assert_eq!(validate_valuation("0").unwrap(), 0.0);
        assert_eq!(validate_valuation(" 125000.50 ").unwrap(), 125_000.50);
    }

    #[test]
    fn fraction_reduction_has_a_message_per_failure_mode() {
        assert_eq!(
            validate_fraction_reduction("2.5", 10).unwrap_err(),
            "Enter a whole number of fractions"
        );
        assert_eq!(
            validate_fraction_reduction("abc", 10).unwrap_err(),
            "Enter a whole number of fractions"
        );
        assert_eq!(
            validate_fraction_reduction("-3", 10).unwrap_err(),
            "Amount cannot be negative"
        );
        assert_eq!(
            validate_fraction_reduction("0", 10).unwrap_err(),
            "Amount must be greater than zero"
        );
        assert_eq!(
            validate_fraction_reduction("11", 10).unwrap_err(),
            "Cannot reduce by more than the 10 fractions held"
        );
        assert_eq!(validate_fraction_reduction("10", 10).unwrap(), 10);
        assert_eq!(validate_fraction_reduction(" 3 ", 10).unwrap(), 3);
    }
}
