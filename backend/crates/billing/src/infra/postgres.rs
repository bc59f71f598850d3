//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::DatabaseErrorExt;
use kernel::id::{AdministratorId, CourseId, Id, LearnerId, PaymentId};
use sqlx::PgPool;

use crate::domain::payment::{CoursePricing, NewPayment, Payment, PaymentStatus};
use crate::domain::repository::PaymentRepository;
use crate::error::{BillingError, BillingResult};

const PAYMENT_COLUMNS: &str = "id, learner_id, course_id, admin_id, amount, status, order_id, \
                               gateway_payment_id, created_at, updated_at";

/// PostgreSQL-backed payment repository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, filter: &str, id: i64) -> BillingResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE {filter} = $1 ORDER BY id DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }
}

impl PaymentRepository for PgPaymentRepository {
    async fn find_course_pricing(&self, course: CourseId) -> BillingResult<Option<CoursePricing>> {
        let row = sqlx::query_as::<_, PricingRow>(
            r#"
            SELECT id, price, owner_id
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| CoursePricing {
            course_id: Id::new(r.id),
            price: r.price,
            owner_id: Id::new(r.owner_id),
        }))
    }

    async fn create_payment(&self, payment: &NewPayment) -> BillingResult<Payment> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            r#"
            INSERT INTO payments (learner_id, course_id, admin_id, amount, status, order_id)
            VALUES ($1, $2, $3, $4, 'pending', $5)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment.learner_id.value())
        .bind(payment.course_id.value())
        .bind(payment.admin_id.value())
        .bind(payment.amount)
        .bind(&payment.order_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                BillingError::CourseUnavailable
            } else if e.is_unique_violation() {
                BillingError::Internal(format!("duplicate gateway order id {}", payment.order_id))
            } else {
                BillingError::Database(e)
            }
        })?;

        row.into_payment()
    }

    async fn find_payment(&self, id: PaymentId) -> BillingResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn find_by_order_id(&self, order_id: &str) -> BillingResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn mark_succeeded(&self, order_id: &str, gateway_payment_id: &str) -> BillingResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'success', gateway_payment_id = $2, updated_at = NOW()
            WHERE order_id = $1 AND status = 'pending'
            "#,
        )
        .bind(order_id)
        .bind(gateway_payment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_for_learner(&self, learner: LearnerId) -> BillingResult<Vec<Payment>> {
        self.fetch_many("learner_id", learner.value()).await
    }

    async fn list_for_admin(&self, admin: AdministratorId) -> BillingResult<Vec<Payment>> {
        self.fetch_many("admin_id", admin.value()).await
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PricingRow {
    id: i64,
    price: i64,
    owner_id: i64,
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    learner_id: i64,
    course_id: i64,
    admin_id: i64,
    amount: i64,
    status: String,
    order_id: String,
    gateway_payment_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> BillingResult<Payment> {
        let status: PaymentStatus = self.status.parse().map_err(BillingError::Internal)?;
        Ok(Payment {
            id: Id::new(self.id),
            learner_id: Id::new(self.learner_id),
            course_id: Id::new(self.course_id),
            admin_id: Id::new(self.admin_id),
            amount: self.amount,
            status,
            order_id: self.order_id,
            gateway_payment_id: self.gateway_payment_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
