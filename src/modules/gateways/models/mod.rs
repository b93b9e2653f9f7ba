pub mod gateway;
pub mod payment;

pub use gateway::Gateway;
pub use payment::{PaymentRequest, PaymentResponse, PaymentStatus, PaymentStatusReport};
