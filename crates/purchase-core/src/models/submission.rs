use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use super::file::EncodedDocument;
use super::identity::Identity;

/// Raw form values as read from the UI at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub purchase_value: Option<String>,
    pub budget: String,
    pub items: String,
    pub total_cost: String,
    pub remarks: Option<String>,
}

/// Purchase-value bucket selected on the form.
///
/// Known buckets are matched on their exact label; anything else is carried
/// through as `Other` with no document requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseBucket {
    Reimbursement,
    UpToOneThousand,
    UpToSixThousand,
    Other(String),
}

impl PurchaseBucket {
    pub const REIMBURSEMENT_LABEL: &'static str = "Reimbursement Request (<$100)";
    pub const UP_TO_1000_LABEL: &'static str = "<=$1000";
    pub const UP_TO_6000_LABEL: &'static str = "$1001-$6000";

    pub fn from_label(label: &str) -> Self {
        match label {
            Self::REIMBURSEMENT_LABEL => PurchaseBucket::Reimbursement,
            Self::UP_TO_1000_LABEL => PurchaseBucket::UpToOneThousand,
            Self::UP_TO_6000_LABEL => PurchaseBucket::UpToSixThousand,
            other => PurchaseBucket::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PurchaseBucket::Reimbursement => Self::REIMBURSEMENT_LABEL,
            PurchaseBucket::UpToOneThousand => Self::UP_TO_1000_LABEL,
            PurchaseBucket::UpToSixThousand => Self::UP_TO_6000_LABEL,
            PurchaseBucket::Other(label) => label,
        }
    }

    /// Minimum number of attached documents, with the message shown when short.
    pub fn document_requirement(&self) -> Option<(usize, &'static str)> {
        match self {
            PurchaseBucket::Reimbursement => Some((
                1,
                "At least 1 document is required for Reimbursement Requests.",
            )),
            PurchaseBucket::UpToOneThousand => {
                Some((1, "At least 1 quote is required for purchases <=$1000."))
            }
            PurchaseBucket::UpToSixThousand => Some((
                2,
                "At least 2 quotations are required for purchases $1001-$6000.",
            )),
            PurchaseBucket::Other(_) => None,
        }
    }
}

/// Identity subset embedded in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionUser {
    pub name: String,
    pub email: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_provider: Option<String>,
}

impl From<&Identity> for SubmissionUser {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.display_name.clone(),
            email: identity.email_or_username.clone(),
            id: identity.stable_id.clone(),
            identity_provider: identity.provider.clone(),
        }
    }
}

/// JSON payload posted to the workflow webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub user: SubmissionUser,
    pub purchase_value: String,
    pub budget: String,
    pub items: String,
    pub total_cost: f64,
    pub remarks: String,
    pub documents: Vec<EncodedDocument>,
}

impl SubmissionRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        identity: &Identity,
        fields: &FormFields,
        total_cost: f64,
        documents: Vec<EncodedDocument>,
    ) -> Self {
        Self {
            timestamp,
            user: SubmissionUser::from(identity),
            purchase_value: fields.purchase_value.clone().unwrap_or_default(),
            budget: fields.budget.clone(),
            items: fields.items.clone(),
            total_cost,
            remarks: fields.remarks.clone().unwrap_or_default(),
            documents,
        }
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
