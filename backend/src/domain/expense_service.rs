use crate::error::{LedgerError, LedgerResult};
use crate::storage::{ExpenseStore, TenantStore};
use shared::{
    parse_ledger_date, CorrectExpenseRequest, CreateExpenseRequest, Expense, ExpenseListQuery,
    ExpenseListResponse, ExpenseResponse,
};
use std::sync::Arc;
use tracing::info;

/// Service for property expense logging
#[derive(Clone)]
pub struct ExpenseService {
    expenses: Arc<dyn ExpenseStore>,
    tenants: Arc<dyn TenantStore>,
}

impl ExpenseService {
    pub fn new(expenses: Arc<dyn ExpenseStore>, tenants: Arc<dyn TenantStore>) -> Self {
        Self { expenses, tenants }
    }

    /// Log an incurred cost
    pub async fn log_expense(&self, request: CreateExpenseRequest) -> LedgerResult<ExpenseResponse> {
        info!(
            "Logging {} expense of {}",
            request.category, request.amount
        );

        self.validate_fields(
            &request.expense_date,
            &request.description,
            request.amount,
            &request.notes,
        )?;

        let room_number = self.resolve_room(request.room_number).await?;

        let mut expense = Expense {
            id: 0,
            expense_date: request.expense_date,
            category: request.category,
            description: request.description.trim().to_string(),
            amount: request.amount,
            room_number,
            notes: request.notes,
        };
        expense.id = self.expenses.insert_expense(&expense).await?;

        Ok(ExpenseResponse {
            success_message: format!("Expense of {} logged", expense.amount),
            expense,
        })
    }

    /// Manually correct an expense entry; rows are otherwise immutable
    pub async fn correct_expense(
        &self,
        id: i64,
        request: CorrectExpenseRequest,
    ) -> LedgerResult<ExpenseResponse> {
        info!("Correcting expense {}", id);

        let mut expense = self
            .expenses
            .get_expense(id)
            .await?
            .ok_or(LedgerError::ExpenseNotFound(id))?;

        if let Some(expense_date) = request.expense_date {
            expense.expense_date = expense_date;
        }
        if let Some(category) = request.category {
            expense.category = category;
        }
        if let Some(description) = request.description {
            expense.description = description.trim().to_string();
        }
        if let Some(amount) = request.amount {
            expense.amount = amount;
        }
        if let Some(room) = request.room_number {
            expense.room_number = self.resolve_room(Some(room)).await?;
        }
        if let Some(notes) = request.notes {
            expense.notes = notes;
        }

        self.validate_fields(
            &expense.expense_date,
            &expense.description,
            expense.amount,
            &expense.notes,
        )?;

        self.expenses.update_expense(&expense).await?;

        Ok(ExpenseResponse {
            success_message: format!("Expense {} corrected", expense.id),
            expense,
        })
    }

    /// List expenses matching the given filters
    pub async fn list_expenses(&self, query: ExpenseListQuery) -> LedgerResult<ExpenseListResponse> {
        if query.month.is_some() && query.year.is_none() {
            return Err(LedgerError::Validation(
                "A month filter requires a year".to_string(),
            ));
        }
        if let Some(month) = query.month {
            if !shared::is_valid_month(month) {
                return Err(LedgerError::Validation(format!(
                    "Expense month must be 1-12, got {}",
                    month
                )));
            }
        }

        let expenses = self.expenses.list_expenses(&query).await?;
        info!("Found {} expenses", expenses.len());
        Ok(ExpenseListResponse { expenses })
    }

    /// Normalize an optional room reference and require the tenant to exist
    async fn resolve_room(&self, room: Option<String>) -> LedgerResult<Option<String>> {
        let Some(room) = room else { return Ok(None) };
        let room = room.trim().to_string();
        if room.is_empty() {
            return Ok(None);
        }
        if self.tenants.get_tenant(&room).await?.is_none() {
            return Err(LedgerError::UnknownRoom(room));
        }
        Ok(Some(room))
    }

    fn validate_fields(
        &self,
        expense_date: &str,
        description: &str,
        amount: f64,
        notes: &str,
    ) -> LedgerResult<()> {
        if parse_ledger_date(expense_date).is_err() {
            return Err(LedgerError::Validation(format!(
                "Expense date is not a valid date: {}",
                expense_date
            )));
        }
        if description.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Description cannot be empty".to_string(),
            ));
        }
        if description.len() > 256 {
            return Err(LedgerError::Validation(
                "Description cannot exceed 256 characters".to_string(),
            ));
        }
        if amount <= 0.0 {
            return Err(LedgerError::Validation(
                "Amount must be positive".to_string(),
            ));
        }
        if notes.len() > 256 {
            return Err(LedgerError::Validation(
                "Notes cannot exceed 256 characters".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TenantService;
    use crate::storage::{DbConnection, ExpenseRepository, TenantRepository};
    use shared::{ExpenseCategory, PaymentMethod, UpsertTenantRequest};

    async fn setup() -> (TenantService, ExpenseService) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let tenant_repo = Arc::new(TenantRepository::new(db.clone()));
        let expense_repo = Arc::new(ExpenseRepository::new(db));
        (
            TenantService::new(tenant_repo.clone()),
            ExpenseService::new(expense_repo, tenant_repo),
        )
    }

    fn sample_request() -> CreateExpenseRequest {
        CreateExpenseRequest {
            expense_date: "2025-06-10".to_string(),
            category: ExpenseCategory::Utilities,
            description: "Shared electricity".to_string(),
            amount: 130.5,
            room_number: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_log_and_list() {
        let (_tenants, expenses) = setup().await;

        let response = expenses
            .log_expense(sample_request())
            .await
            .expect("Log failed");
        assert!(response.expense.id > 0);

        let listed = expenses
            .list_expenses(ExpenseListQuery {
                category: Some(ExpenseCategory::Utilities),
                ..Default::default()
            })
            .await
            .expect("List failed");
        assert_eq!(listed.expenses.len(), 1);
    }

    #[tokio::test]
    async fn test_room_tag_requires_a_tenant() {
        let (tenants, expenses) = setup().await;

        let mut request = sample_request();
        request.room_number = Some("101".to_string());
        let result = expenses.log_expense(request.clone()).await;
        assert!(matches!(result, Err(LedgerError::UnknownRoom(room)) if room == "101"));

        tenants
            .upsert_tenant(UpsertTenantRequest {
                room_number: "101".to_string(),
                tenant_name: "Mina Rahimi".to_string(),
                phone: String::new(),
                deposit: 0.0,
                monthly_rent: 850.0,
                lease_start: "2025-01-01".to_string(),
                lease_end: "2025-12-31".to_string(),
                payment_method: PaymentMethod::Monthly,
                notes: String::new(),
            })
            .await
            .expect("Failed to store tenant");

        let response = expenses
            .log_expense(request)
            .await
            .expect("Log should succeed once the tenant exists");
        assert_eq!(response.expense.room_number.as_deref(), Some("101"));
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_input() {
        let (_tenants, expenses) = setup().await;

        let mut request = sample_request();
        request.amount = 0.0;
        assert!(matches!(
            expenses.log_expense(request).await,
            Err(LedgerError::Validation(_))
        ));

        let mut request = sample_request();
        request.expense_date = "June 10".to_string();
        assert!(matches!(
            expenses.log_expense(request).await,
            Err(LedgerError::Validation(_))
        ));

        let mut request = sample_request();
        request.description = "  ".to_string();
        assert!(matches!(
            expenses.log_expense(request).await,
            Err(LedgerError::Validation(_))
        ));

        let result = expenses
            .list_expenses(ExpenseListQuery {
                month: Some(6),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_correction_overwrites_only_given_fields() {
        let (_tenants, expenses) = setup().await;

        let logged = expenses
            .log_expense(sample_request())
            .await
            .expect("Log failed");

        let corrected = expenses
            .correct_expense(
                logged.expense.id,
                CorrectExpenseRequest {
                    amount: Some(142.0),
                    ..Default::default()
                },
            )
            .await
            .expect("Correction failed");
        assert_eq!(corrected.expense.amount, 142.0);
        assert_eq!(corrected.expense.description, logged.expense.description);

        let missing = expenses
            .correct_expense(9999, CorrectExpenseRequest::default())
            .await;
        assert!(matches!(missing, Err(LedgerError::ExpenseNotFound(9999))));
    }
}
