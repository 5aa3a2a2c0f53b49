use chrono::NaiveDate;
use thiserror::Error;

/// Input the model refuses to simulate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be >= 0")]
    Negative { field: &'static str },

    #[error("{kind} decision requires {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("downPayment ({down_payment}) must not exceed price ({price})")]
    DownPaymentExceedsPrice { price: f64, down_payment: f64 },

    #[error("invalid {kind} decision data: {message}")]
    MalformedTerms { kind: String, message: String },

    #[error("a {months}-month horizon starting {start} runs past the supported calendar")]
    HorizonOutOfRange { months: u32, start: NaiveDate },
}
