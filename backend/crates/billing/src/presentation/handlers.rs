//! HTTP Handlers

use std::sync::Arc;

use auth::{AuthenticatedActor, CurrentActor};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use kernel::id::markers::{Administrator, Learner};
use kernel::id::{CourseId, Id, PaymentId};

use crate::application::config::BillingConfig;
use crate::application::{
    CreateOrderUseCase, ListPaymentsUseCase, PaymentStatusUseCase, VerifyOutcome,
    VerifyPaymentInput, VerifyPaymentUseCase, Viewer,
};
use crate::domain::gateway::PaymentGateway;
use crate::domain::payment::PaymentStatus;
use crate::domain::repository::PaymentRepository;
use crate::error::{BillingError, BillingResult};
use crate::presentation::dto::{
    OrderResponse, PaymentResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};

/// Shared state for billing handlers
pub struct BillingAppState<R, G> {
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub config: Arc<BillingConfig>,
}

impl<R, G> Clone for BillingAppState<R, G> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            gateway: self.gateway.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, G> BillingAppState<R, G> {
    pub fn new(repo: Arc<R>, gateway: Arc<G>, config: Arc<BillingConfig>) -> Self {
        Self {
            repo,
            gateway,
            config,
        }
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> BillingResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| BillingError::invalid_field("body", rejection.body_text()))
}

fn path_id<M>(path: Result<Path<i64>, PathRejection>) -> BillingResult<Id<M>> {
    path.map(|Path(id)| Id::new(id))
        .map_err(|_| BillingError::invalid_field("id", "Path id must be an integer"))
}

/// POST /payment/payments/order/{courseId}
pub async fn create_order<R, G>(
    State(state): State<BillingAppState<R, G>>,
    CurrentActor(learner): CurrentActor<Learner>,
    path: Result<Path<i64>, PathRejection>,
) -> BillingResult<Json<OrderResponse>>
where
    R: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    let order = CreateOrderUseCase::new(
        state.repo.clone(),
        state.gateway.clone(),
        state.config.clone(),
    )
    .execute(learner.id, course_id)
    .await?;

    Ok(Json(OrderResponse { order }))
}

/// POST /payment/payments/verify
pub async fn verify_payment<R, G>(
    State(state): State<BillingAppState<R, G>>,
    body: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> BillingResult<Json<VerifyPaymentResponse>>
where
    R: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let outcome = VerifyPaymentUseCase::new(
        state.repo.clone(),
        state.gateway.clone(),
        state.config.clone(),
    )
    .execute(VerifyPaymentInput {
        order_id: req.order_id,
        payment_id: req.payment_id,
        signature: req.signature,
    })
    .await?;

    let message = match outcome {
        VerifyOutcome::Verified => "Payment verified successfully",
        VerifyOutcome::AlreadyVerified => "Payment already verified",
    };
    Ok(Json(VerifyPaymentResponse {
        message,
        payment_status: PaymentStatus::Success,
    }))
}

/// GET /payment/payments/status/{paymentId}
pub async fn payment_status<R, G>(
    State(state): State<BillingAppState<R, G>>,
    actor: AuthenticatedActor,
    path: Result<Path<i64>, PathRejection>,
) -> BillingResult<Json<PaymentResponse>>
where
    R: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payment_id: PaymentId = path_id(path)?;
    let viewer = match actor {
        AuthenticatedActor::Learner(profile) => Viewer::Learner(profile.id),
        AuthenticatedActor::Administrator(profile) => Viewer::Administrator(profile.id),
    };

    let payment = PaymentStatusUseCase::new(state.repo.clone())
        .execute(viewer, payment_id)
        .await?;
    Ok(Json(PaymentResponse::from(&payment)))
}

/// GET /payment/payments/user
pub async fn learner_payments<R, G>(
    State(state): State<BillingAppState<R, G>>,
    CurrentActor(learner): CurrentActor<Learner>,
) -> BillingResult<Json<Vec<PaymentResponse>>>
where
    R: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payments = ListPaymentsUseCase::new(state.repo.clone())
        .for_learner(learner.id)
        .await?;
    Ok(Json(payments.iter().map(PaymentResponse::from).collect()))
}

/// GET /payment/payments/admin
pub async fn admin_payments<R, G>(
    State(state): State<BillingAppState<R, G>>,
    CurrentActor(admin): CurrentActor<Administrator>,
) -> BillingResult<Json<Vec<PaymentResponse>>>
where
    R: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
{
    let payments = ListPaymentsUseCase::new(state.repo.clone())
        .for_admin(admin.id)
        .await?;
    Ok(Json(payments.iter().map(PaymentResponse::from).collect()))
}
