//! Billing Router

use auth::{AccountRepository, SessionGate, require_actor, require_any_actor};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use kernel::id::markers::{Administrator, Learner};

use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::PaymentRepository;
use crate::presentation::handlers::{self, BillingAppState};

/// Payment routes, mounted at `/payment/payments`
///
/// `verify` is public: the checkout callback is authenticated by its
/// signature, not by a session.
pub fn billing_router<R, G, AR>(state: BillingAppState<R, G>, gate: SessionGate<AR>) -> Router
where
    R: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    AR: AccountRepository + Send + Sync + 'static,
{
    let learner = Router::new()
        .route("/order/{courseId}", post(handlers::create_order::<R, G>))
        .route("/user", get(handlers::learner_payments::<R, G>))
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            require_actor::<Learner, AR>,
        ));

    let admin = Router::new()
        .route("/admin", get(handlers::admin_payments::<R, G>))
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            require_actor::<Administrator, AR>,
        ));

    let any = Router::new()
        .route("/status/{paymentId}", get(handlers::payment_status::<R, G>))
        .route_layer(middleware::from_fn_with_state(gate, require_any_actor::<AR>));

    let payments = Router::new()
        .route("/verify", post(handlers::verify_payment::<R, G>))
        .merge(learner)
        .merge(admin)
        .merge(any)
        .with_state(state);

    Router::new().nest("/payment/payments", payments)
}
