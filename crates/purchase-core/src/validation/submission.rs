//! Cross-field rules checked before any file is encoded or sent.

use crate::constants::TOTAL_COST_CEILING;
use crate::error::{FormError, FormResult};
use crate::models::{FormFields, PurchaseBucket};

const TOTAL_COST_MESSAGE: &str = "Total cost must be a number less than 6001.";
const MISSING_BUCKET_MESSAGE: &str = "Please select a purchase value.";

/// Outcome of a successful validation: the chosen bucket and the parsed cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub bucket: PurchaseBucket,
    pub total_cost: f64,
}

/// Parse the leading decimal number of `input`, ignoring leading whitespace
/// and any trailing text ("12.5 USD" -> 12.5). Returns `None` when no digits
/// lead the value.
pub fn parse_total_cost(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let candidate: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .collect();

    // Longest prefix that still parses wins.
    (1..=candidate.len())
        .rev()
        .filter(|&end| candidate.is_char_boundary(end))
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Validate the form against the purchase-bucket and total-cost rules.
pub fn validate_submission(
    fields: &FormFields,
    attached_files: usize,
) -> FormResult<ValidatedSubmission> {
    let label = fields
        .purchase_value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| FormError::validation(MISSING_BUCKET_MESSAGE))?;

    let bucket = PurchaseBucket::from_label(label);

    if let Some((minimum, message)) = bucket.document_requirement() {
        if attached_files < minimum {
            return Err(FormError::validation(message));
        }
    }

    let total_cost = parse_total_cost(&fields.total_cost)
        .filter(|cost| *cost >= 0.0 && *cost < TOTAL_COST_CEILING)
        .ok_or_else(|| FormError::validation(TOTAL_COST_MESSAGE))?;

    Ok(ValidatedSubmission { bucket, total_cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorMetadata;

    fn form(bucket: &str, total_cost: &str) -> FormFields {
        FormFields {
            purchase_value: Some(bucket.to_string()),
            budget: "Ops".into(),
            items: "Chairs".into(),
            total_cost: total_cost.to_string(),
            remarks: None,
        }
    }

    fn message(result: FormResult<ValidatedSubmission>) -> String {
        result.unwrap_err().client_message()
    }

    #[test]
    fn reimbursement_requires_one_document() {
        let result = validate_submission(&form("Reimbursement Request (<$100)", "40"), 0);
        assert_eq!(
            message(result),
            "At least 1 document is required for Reimbursement Requests."
        );
        assert!(validate_submission(&form("Reimbursement Request (<$100)", "40"), 1).is_ok());
    }

    #[test]
    fn up_to_1000_requires_one_quote() {
        let result = validate_submission(&form("<=$1000", "999"), 0);
        assert_eq!(
            message(result),
            "At least 1 quote is required for purchases <=$1000."
        );
    }

    #[test]
    fn up_to_6000_requires_two_quotations() {
        let result = validate_submission(&form("$1001-$6000", "4500"), 1);
        assert_eq!(
            message(result),
            "At least 2 quotations are required for purchases $1001-$6000."
        );

        let ok = validate_submission(&form("$1001-$6000", "4500"), 2).unwrap();
        assert_eq!(ok.bucket, PurchaseBucket::UpToSixThousand);
        assert_eq!(ok.total_cost, 4500.0);
    }

    #[test]
    fn missing_bucket_is_rejected() {
        let mut fields = form("", "10");
        assert_eq!(
            message(validate_submission(&fields, 3)),
            "Please select a purchase value."
        );
        fields.purchase_value = None;
        assert!(validate_submission(&fields, 3).is_err());
    }

    #[test]
    fn unknown_bucket_has_no_document_minimum() {
        let ok = validate_submission(&form("Other", "10"), 0).unwrap();
        assert_eq!(ok.bucket, PurchaseBucket::Other("Other".into()));
    }

    #[test]
    fn padded_label_matches_no_bucket() {
        let ok = validate_submission(&form("$1001-$6000 ", "10"), 0).unwrap();
        assert_eq!(ok.bucket, PurchaseBucket::Other("$1001-$6000 ".into()));

        let ok = validate_submission(&form(" <=$1000", "10"), 0).unwrap();
        assert_eq!(ok.bucket, PurchaseBucket::Other(" <=$1000".into()));

        assert!(validate_submission(&form("   ", "10"), 3).is_err());
    }

    #[test]
    fn total_cost_boundaries() {
        assert_eq!(
            message(validate_submission(&form("<=$1000", "6001"), 1)),
            "Total cost must be a number less than 6001."
        );
        assert_eq!(
            validate_submission(&form("<=$1000", "6000.99"), 1)
                .unwrap()
                .total_cost,
            6000.99
        );
        assert!(validate_submission(&form("<=$1000", "0"), 1).is_ok());
        assert!(validate_submission(&form("<=$1000", "-1"), 1).is_err());
        assert!(validate_submission(&form("<=$1000", "abc"), 1).is_err());
        assert!(validate_submission(&form("<=$1000", ""), 1).is_err());
    }

    #[test]
    fn bucket_rule_is_checked_before_cost() {
        let result = validate_submission(&form("$1001-$6000", "99999"), 0);
        assert_eq!(
            message(result),
            "At least 2 quotations are required for purchases $1001-$6000."
        );
    }

    #[test]
    fn parse_total_cost_is_lenient_about_trailing_text() {
        assert_eq!(parse_total_cost("12abc"), Some(12.0));
        assert_eq!(parse_total_cost("  250.75 USD"), Some(250.75));
        assert_eq!(parse_total_cost("1e3"), Some(1000.0));
        assert_eq!(parse_total_cost("1e"), Some(1.0));
        assert_eq!(parse_total_cost(".5"), Some(0.5));
        assert_eq!(parse_total_cost("$40"), None);
        assert_eq!(parse_total_cost("Infinity"), None);
        assert_eq!(parse_total_cost(""), None);
    }
}
