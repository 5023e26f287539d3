use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// The static dataset served by the API.
///
/// Records are kept as raw JSON so they pass through verbatim, in file order.
/// The typed wrappers below only add the defaulting rules the service needs.
/// The root must be a JSON object; any other root is a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Document {
    pub accounts: Vec<AccountRecord>,
    pub balances: Map<String, Value>,
    pub transactions: Map<String, Value>,
}

#[derive(Deserialize)]
struct DocumentSections {
    #[serde(default)]
    accounts: Vec<AccountRecord>,
    #[serde(default)]
    balances: Map<String, Value>,
    #[serde(default)]
    transactions: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Document {
    type Error = serde_json::Error;

    fn try_from(root: Map<String, Value>) -> Result<Self, Self::Error> {
        let sections: DocumentSections = serde_json::from_value(Value::Object(root))?;
        Ok(Self {
            accounts: sections.accounts,
            balances: sections.balances,
            transactions: sections.transactions,
        })
    }
}

impl Document {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Takes the balance record for `account_id`, consuming the document.
    pub fn into_balance(mut self, account_id: &str) -> Option<BalanceRecord> {
        self.balances.remove(account_id).map(BalanceRecord)
    }

    /// Takes the transaction group for `account_id`, consuming the document.
    pub fn into_transactions(mut self, account_id: &str) -> Option<TransactionGroup> {
        self.transactions.remove(account_id).map(TransactionGroup)
    }

    /// Sums `balance.available` across every balance record, in file order.
    pub fn total_available(&self) -> Result<f64, DocumentError> {
        self.balances
            .iter()
            .try_fold(0.0, |total, (account_id, record)| {
                available_amount(record)
                    .map(|amount| total + amount)
                    .ok_or_else(|| DocumentError::InvalidAmount {
                        account_id: account_id.clone(),
                    })
            })
    }
}

/// An account entry, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRecord(pub Value);

/// A per-account balance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceRecord(pub Value);

impl BalanceRecord {
    /// See [`available_amount`].
    pub fn available_amount(&self) -> Option<f64> {
        available_amount(&self.0)
    }
}

/// Reads `balance.available` from a balance record.
///
/// Absent or null values below the record count as zero. Returns `None` when
/// the record itself is not an object, or the field holds something other
/// than a number.
pub fn available_amount(record: &Value) -> Option<f64> {
    if !record.is_object() {
        return None;
    }
    match record.get("balance").and_then(|balance| balance.get("available")) {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => None,
    }
}

/// A per-account transaction group: an object carrying a `transactions` list
/// alongside whatever metadata the dataset attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionGroup(pub Value);

impl TransactionGroup {
    /// True for falsy JSON: null, false, zero, "", [] and {}.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
        }
    }

    pub fn entries(&self) -> Option<&Vec<Value>> {
        self.0.get("transactions").and_then(Value::as_array)
    }

    /// Keeps only the first `limit` entries of the `transactions` list.
    ///
    /// A group without a `transactions` key gets an empty list. Groups that
    /// are not objects, or whose `transactions` is not a list, are returned
    /// unchanged.
    pub fn truncated(mut self, limit: usize) -> Self {
        if let Value::Object(fields) = &mut self.0 {
            match fields.get_mut("transactions") {
                Some(Value::Array(entries)) => entries.truncate(limit),
                Some(_) => {}
                None => {
                    fields.insert("transactions".to_string(), Value::Array(Vec::new()));
                }
            }
        }
        self
    }
}
