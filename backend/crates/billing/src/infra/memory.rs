//! In-memory Repository Implementation
//!
//! Backs tests. The pending-guarded update runs under the table lock, so
//! two concurrent verifications move a payment at most once.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{AdministratorId, CourseId, Id, LearnerId, PaymentId};
use tokio::sync::Mutex;

use crate::domain::payment::{CoursePricing, NewPayment, Payment, PaymentStatus};
use crate::domain::repository::PaymentRepository;
use crate::error::{BillingError, BillingResult};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    courses: HashMap<i64, CoursePricing>,
    payments: BTreeMap<i64, Payment>,
}

/// In-memory payment repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    inner: Arc<Mutex<Tables>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a course that can be bought
    pub async fn put_course(&self, course: CoursePricing) {
        let mut tables = self.inner.lock().await;
        tables.courses.insert(course.course_id.value(), course);
    }

    /// Every stored payment, oldest first
    pub async fn all_payments(&self) -> Vec<Payment> {
        let tables = self.inner.lock().await;
        tables.payments.values().cloned().collect()
    }
}

impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_course_pricing(&self, course: CourseId) -> BillingResult<Option<CoursePricing>> {
        let tables = self.inner.lock().await;
        Ok(tables.courses.get(&course.value()).cloned())
    }

    async fn create_payment(&self, payment: &NewPayment) -> BillingResult<Payment> {
        let mut tables = self.inner.lock().await;
        if !tables.courses.contains_key(&payment.course_id.value()) {
            return Err(BillingError::CourseUnavailable);
        }
        if tables.payments.values().any(|p| p.order_id == payment.order_id) {
            return Err(BillingError::Internal(format!(
                "duplicate gateway order id {}",
                payment.order_id
            )));
        }

        tables.next_id += 1;
        let id = tables.next_id;
        let now = Utc::now();
        let created = Payment {
            id: Id::new(id),
            learner_id: payment.learner_id,
            course_id: payment.course_id,
            admin_id: payment.admin_id,
            amount: payment.amount,
            status: PaymentStatus::Pending,
            order_id: payment.order_id.clone(),
            gateway_payment_id: None,
            created_at: now,
            updated_at: now,
        };
        tables.payments.insert(id, created.clone());
        Ok(created)
    }

    async fn find_payment(&self, id: PaymentId) -> BillingResult<Option<Payment>> {
        let tables = self.inner.lock().await;
        Ok(tables.payments.get(&id.value()).cloned())
    }

    async fn find_by_order_id(&self, order_id: &str) -> BillingResult<Option<Payment>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .payments
            .values()
            .find(|p| p.order_id == order_id)
            .cloned())
    }

    async fn mark_succeeded(&self, order_id: &str, gateway_payment_id: &str) -> BillingResult<u64> {
        let mut tables = self.inner.lock().await;
        let now = Utc::now();
        let mut moved = 0;
        for payment in tables
            .payments
            .values_mut()
            .filter(|p| p.order_id == order_id && p.status == PaymentStatus::Pending)
        {
            payment.status = PaymentStatus::Success;
            payment.gateway_payment_id = Some(gateway_payment_id.to_string());
            payment.updated_at = now;
            moved += 1;
        }
        Ok(moved)
    }

    async fn list_for_learner(&self, learner: LearnerId) -> BillingResult<Vec<Payment>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .payments
            .values()
            .rev()
            .filter(|p| p.learner_id == learner)
            .cloned()
            .collect())
    }

    async fn list_for_admin(&self, admin: AdministratorId) -> BillingResult<Vec<Payment>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .payments
            .values()
            .rev()
            .filter(|p| p.admin_id == admin)
            .cloned()
            .collect())
    }
}
