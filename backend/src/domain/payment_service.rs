use crate::error::{LedgerError, LedgerResult};
use crate::storage::{PaymentStore, TenantStore};
use shared::{
    is_plausible_year, is_valid_month, parse_ledger_date, AmendPaymentRequest,
    PaymentListQuery, PaymentListResponse, PaymentResponse, RecordPaymentRequest, RentalPayment,
};
use std::sync::Arc;
use tracing::info;

/// Service for the monthly rent ledger
#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentStore>,
    tenants: Arc<dyn TenantStore>,
}

impl PaymentService {
    pub fn new(payments: Arc<dyn PaymentStore>, tenants: Arc<dyn TenantStore>) -> Self {
        Self { payments, tenants }
    }

    /// Log rent for a room and period
    ///
    /// This is the checked insert path: the room must have a tenant record
    /// and the period must not already be covered.
    pub async fn record_payment(
        &self,
        request: RecordPaymentRequest,
    ) -> LedgerResult<PaymentResponse> {
        info!(
            "Recording rent for room {} {:04}-{:02}",
            request.room_number, request.payment_year, request.payment_month
        );

        self.validate_record_request(&request)?;

        let room_number = request.room_number.trim().to_string();
        if self.tenants.get_tenant(&room_number).await?.is_none() {
            return Err(LedgerError::UnknownRoom(room_number));
        }

        if self
            .payments
            .get_payment(&room_number, request.payment_year, request.payment_month)
            .await?
            .is_some()
        {
            return Err(LedgerError::DuplicatePayment {
                room: room_number,
                year: request.payment_year,
                month: request.payment_month,
            });
        }

        let mut payment = RentalPayment {
            id: 0,
            room_number,
            payment_year: request.payment_year,
            payment_month: request.payment_month,
            amount_paid: request.amount_paid,
            payment_date: request.payment_date,
            payment_status: request.payment_status,
            notes: request.notes,
        };
        payment.id = self.payments.insert_payment(&payment).await?;

        info!(
            "Recorded rent {} for room {} ({})",
            payment.amount_paid, payment.room_number, payment.payment_status
        );

        Ok(PaymentResponse {
            success_message: format!(
                "Rent for room {} recorded for {:04}-{:02}",
                payment.room_number, payment.payment_year, payment.payment_month
            ),
            payment,
        })
    }

    /// Amend an existing rent record's amount, status, or notes
    pub async fn amend_payment(
        &self,
        room_number: &str,
        year: i32,
        month: u32,
        request: AmendPaymentRequest,
    ) -> LedgerResult<PaymentResponse> {
        info!(
            "Amending rent record for room {} {:04}-{:02}",
            room_number, year, month
        );

        self.validate_period(year, month)?;

        let mut payment = self
            .payments
            .get_payment(room_number, year, month)
            .await?
            .ok_or_else(|| LedgerError::PaymentNotFound {
                room: room_number.to_string(),
                year,
                month,
            })?;

        if let Some(amount_paid) = request.amount_paid {
            if amount_paid < 0.0 {
                return Err(LedgerError::Validation(
                    "Amount paid cannot be negative".to_string(),
                ));
            }
            payment.amount_paid = amount_paid;
        }
        if let Some(payment_status) = request.payment_status {
            payment.payment_status = payment_status;
        }
        if let Some(notes) = request.notes {
            if notes.len() > 256 {
                return Err(LedgerError::Validation(
                    "Notes cannot exceed 256 characters".to_string(),
                ));
            }
            payment.notes = notes;
        }

        self.payments.update_payment(&payment).await?;

        Ok(PaymentResponse {
            success_message: format!(
                "Rent record for room {} {:04}-{:02} amended",
                payment.room_number, payment.payment_year, payment.payment_month
            ),
            payment,
        })
    }

    /// Get the rent record for a room and period
    pub async fn get_payment(
        &self,
        room_number: &str,
        year: i32,
        month: u32,
    ) -> LedgerResult<Option<RentalPayment>> {
        self.validate_period(year, month)?;
        self.payments.get_payment(room_number, year, month).await
    }

    /// List rent records by room, or by year and month
    pub async fn list_payments(
        &self,
        query: PaymentListQuery,
    ) -> LedgerResult<PaymentListResponse> {
        let payments = match (query.room, query.year, query.month) {
            (Some(room), None, None) => self.payments.list_payments_for_room(&room).await?,
            (Some(room), Some(year), Some(month)) => {
                self.validate_period(year, month)?;
                self.payments
                    .get_payment(&room, year, month)
                    .await?
                    .into_iter()
                    .collect()
            }
            (None, Some(year), Some(month)) => {
                self.validate_period(year, month)?;
                self.payments.list_payments_for_period(year, month).await?
            }
            _ => {
                return Err(LedgerError::Validation(
                    "List payments by room, or by year and month".to_string(),
                ))
            }
        };

        info!("Found {} rent records", payments.len());
        Ok(PaymentListResponse { payments })
    }

    fn validate_period(&self, year: i32, month: u32) -> LedgerResult<()> {
        if !is_valid_month(month) {
            return Err(LedgerError::Validation(format!(
                "Payment month must be 1-12, got {}",
                month
            )));
        }
        if !is_plausible_year(year) {
            return Err(LedgerError::Validation(format!(
                "Payment year {} is out of range",
                year
            )));
        }
        Ok(())
    }

    fn validate_record_request(&self, request: &RecordPaymentRequest) -> LedgerResult<()> {
        if request.room_number.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Room number cannot be empty".to_string(),
            ));
        }
        self.validate_period(request.payment_year, request.payment_month)?;
        if request.amount_paid < 0.0 {
            return Err(LedgerError::Validation(
                "Amount paid cannot be negative".to_string(),
            ));
        }
        if parse_ledger_date(&request.payment_date).is_err() {
            return Err(LedgerError::Validation(format!(
                "Payment date is not a valid date: {}",
                request.payment_date
            )));
        }
        if request.notes.len() > 256 {
            return Err(LedgerError::Validation(
                "Notes cannot exceed 256 characters".to_string(),
            ));
        }
        Ok(())
    }
}
