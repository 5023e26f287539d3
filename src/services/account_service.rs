use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{AccountRecord, BalanceRecord, TransactionGroup};
use crate::observability::get_metrics;
use crate::repositories::DocumentRepository;

/// Read-only lookups over the account dataset.
pub struct AccountService {
    documents: Arc<dyn DocumentRepository>,
}

impl AccountService {
    pub fn new(documents: Arc<dyn DocumentRepository>) -> Self {
        Self { documents }
    }

    /// Lists every account record, in dataset order.
    pub async fn list_accounts(&self) -> Result<Vec<AccountRecord>> {
        let document = self.documents.load().await?;
        Ok(document.accounts)
    }

    /// Returns the balance record for `account_id`.
    pub async fn get_balance(&self, account_id: &str) -> Result<BalanceRecord> {
        let document = self.documents.load().await?;

        document.into_balance(account_id).ok_or_else(|| {
            debug!(account_id, "balance lookup missed");
            get_metrics().record_not_found("balances");
            AppError::NotFound("Balance not found".to_string())
        })
    }

    /// Returns the transaction group for `account_id`.
    ///
    /// A positive `limit` keeps only that many leading entries; zero, negative
    /// or absent limits return the group untouched. Empty groups are treated
    /// as missing.
    pub async fn get_transactions(
        &self,
        account_id: &str,
        limit: Option<i64>,
    ) -> Result<TransactionGroup> {
        let document = self.documents.load().await?;

        let group = document
            .into_transactions(account_id)
            .filter(|group| !group.is_empty())
            .ok_or_else(|| {
                debug!(account_id, "transactions lookup missed");
                get_metrics().record_not_found("transactions");
                AppError::NotFound("Transactions not found".to_string())
            })?;

        match limit.filter(|l| *l > 0) {
            Some(limit) => Ok(group.truncated(usize::try_from(limit).unwrap_or(usize::MAX))),
            None => Ok(group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;
    use crate::models::Document;
    use crate::repositories::MockDocumentRepository;
    use serde_json::json;

    fn fixture() -> Document {
        serde_json::from_value(json!({
            "accounts": [{ "id": "acc_1", "name": "Checking" }, { "id": "acc_2", "name": "Savings" }],
            "balances": {
                "acc_1": { "account_id": "acc_1", "balance": { "available": 120.5, "ledger": 130.0 } }
            },
            "transactions": {
                "acc_1": {
                    "account_id": "acc_1",
                    "transactions": [{ "id": "t1" }, { "id": "t2" }, { "id": "t3" }]
                },
                "acc_2": {}
            }
        }))
        .unwrap()
    }

    fn service_with(doc: Document) -> AccountService {
        let mut repo = MockDocumentRepository::new();
        repo.expect_load().returning(move || Ok(doc.clone()));
        AccountService::new(Arc::new(repo))
    }

    fn entry_ids(group: &TransactionGroup) -> Vec<String> {
        group
            .entries()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_list_accounts_in_order() {
        let accounts = service_with(fixture()).list_accounts().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].0["id"], "acc_1");
        assert_eq!(accounts[1].0["id"], "acc_2");
    }

    #[tokio::test]
    async fn test_get_balance_returns_record_verbatim() {
        let record = service_with(fixture()).get_balance("acc_1").await.unwrap();
        assert_eq!(
            record.0,
            json!({ "account_id": "acc_1", "balance": { "available": 120.5, "ledger": 130.0 } })
        );
    }

    #[tokio::test]
    async fn test_get_balance_missing_account() {
        let err = service_with(fixture()).get_balance("acc_9").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Balance not found"));
    }

    #[tokio::test]
    async fn test_get_transactions_limit_handling() {
        let service = service_with(fixture());

        let all = service.get_transactions("acc_1", None).await.unwrap();
        assert_eq!(entry_ids(&all), vec!["t1", "t2", "t3"]);

        let two = service.get_transactions("acc_1", Some(2)).await.unwrap();
        assert_eq!(entry_ids(&two), vec!["t1", "t2"]);

        for ignored in [0, -1, 10] {
            let group = service.get_transactions("acc_1", Some(ignored)).await.unwrap();
            assert_eq!(entry_ids(&group), vec!["t1", "t2", "t3"]);
        }
    }

    #[tokio::test]
    async fn test_get_transactions_empty_or_missing_is_not_found() {
        let service = service_with(fixture());
        for account_id in ["acc_2", "acc_9"] {
            let err = service.get_transactions(account_id, None).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Transactions not found"));
        }
    }

    #[tokio::test]
    async fn test_load_failure_propagates() {
        let mut repo = MockDocumentRepository::new();
        repo.expect_load().returning(|| {
            Err(DocumentError::Read {
                path: "data/db.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        });
        let service = AccountService::new(Arc::new(repo));

        let err = service.list_accounts().await.unwrap_err();
        assert!(matches!(err, AppError::Document(DocumentError::Read { .. })));
    }
}
