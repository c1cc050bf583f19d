use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Status code reported for a requisition whose accounts are linked.
pub const REQUISITION_LINKED: &str = "LN";

/// Decode an explicit JSON `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_accessed: String,
    #[serde(deserialize_with = "null_as_default")]
    pub iban: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution_id: String,
    /// Free-form upstream status such as `READY` or `EXPIRED`.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// Amount paired with its ISO 4217 currency. The amount is kept exactly as
/// sent; use [`Amount::decimal`] for arithmetic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Amount {
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
}

impl Amount {
    /// Parsed amount, `None` when empty or not a decimal number.
    pub fn decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount.trim()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountBalance {
    #[serde(deserialize_with = "null_as_default")]
    pub balance_amount: Amount,
    #[serde(deserialize_with = "null_as_default")]
    pub balance_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_change_date_time: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountBalances {
    #[serde(deserialize_with = "null_as_default")]
    pub balances: Vec<AccountBalance>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub account: AccountDescriptor,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountDescriptor {
    #[serde(deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub iban: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountTransactions {
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: TransactionList,
}

impl AccountTransactions {
    pub fn booked(&self) -> &[BookedTransaction] {
        &self.transactions.booked
    }

    pub fn pending(&self) -> &[PendingTransaction] {
        &self.transactions.pending
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionList {
    #[serde(deserialize_with = "null_as_default")]
    pub booked: Vec<BookedTransaction>,
    #[serde(deserialize_with = "null_as_default")]
    pub pending: Vec<PendingTransaction>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterpartyAccount {
    #[serde(deserialize_with = "null_as_default")]
    pub iban: String,
}

/// Finalized transaction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookedTransaction {
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub entry_reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub booking_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_amount: Amount,
    #[serde(deserialize_with = "null_as_default")]
    pub creditor_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creditor_account: CounterpartyAccount,
    #[serde(deserialize_with = "null_as_default")]
    pub ultimate_creditor: String,
    #[serde(deserialize_with = "null_as_default")]
    pub debtor_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub debtor_account: CounterpartyAccount,
    #[serde(deserialize_with = "null_as_default")]
    pub ultimate_debtor: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remittance_information_unstructured: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remittance_information_unstructured_array: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_transaction_code: String,
}

/// Provisional transaction; the upstream API guarantees far fewer fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PendingTransaction {
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_amount: Amount,
    #[serde(deserialize_with = "null_as_default")]
    pub value_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remittance_information_unstructured: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remittance_information_unstructured_array: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Institution {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bic: String,
    /// Length of the available transaction history in days, as sent upstream.
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_total_days: String,
    #[serde(deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
}

impl Institution {
    pub fn transaction_total_days_count(&self) -> Option<u32> {
        self.transaction_total_days.trim().parse().ok()
    }

    pub fn supports_country(&self, country: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
    }
}

/// Body of a create-requisition call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewRequisition {
    pub institution_id: String,
    pub redirect: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub agreement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_language: Option<String>,
}

impl NewRequisition {
    pub fn new(institution_id: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            institution_id: institution_id.into(),
            redirect: redirect.into(),
            ..Self::default()
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn agreement(mut self, agreement: impl Into<String>) -> Self {
        self.agreement = Some(agreement.into());
        self
    }

    pub fn user_language(mut self, user_language: impl Into<String>) -> Self {
        self.user_language = Some(user_language.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Requisition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub redirect: String,
    /// Free-form upstream status code such as `CR` or `LN`.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agreement: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accounts: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub user_language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

impl Requisition {
    pub fn is_linked(&self) -> bool {
        self.status == REQUISITION_LINKED
    }

    /// Keep what the caller sent for fields the server left out of its answer.
    pub(crate) fn backfill(mut self, sent: &NewRequisition) -> Self {
        fn fill(field: &mut String, sent: Option<&str>) {
            if field.is_empty() {
                if let Some(value) = sent {
                    field.push_str(value);
                }
            }
        }
        fill(&mut self.institution_id, Some(sent.institution_id.as_str()));
        fill(&mut self.redirect, Some(sent.redirect.as_str()));
        fill(&mut self.reference, Some(sent.reference.as_str()));
        fill(&mut self.agreement, sent.agreement.as_deref());
        fill(&mut self.user_language, sent.user_language.as_deref());
        self
    }
}

/// One page of requisitions. Cursors are returned as sent, never followed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Requisitions {
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<Requisition>,
}
