pub mod gateway;
pub mod payment;
