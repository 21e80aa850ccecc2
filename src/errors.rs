use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: String,
        message: String,
    },

    #[error("schedule did not settle within {periods} periods: remaining balance {remaining_balance}")]
    NonConvergence {
        periods: u32,
        remaining_balance: Money,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        LoanError::Calculation {
            message: format!("decimal overflow while computing {}", context),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
