pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod models;
pub mod payment;
pub mod repository;
pub mod services;

// Re-export the pieces external callers touch most.
pub use error::PaymentError;
pub use payment::vnpay::{CallbackOutcome, PaymentUrlRequest, VnpayGateway};
pub use services::payment_service::PaymentService;
