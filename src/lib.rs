pub mod comparison;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod export;
pub mod interest;
pub mod payments;
pub mod types;
pub mod warnings;

// re-export key types
pub use comparison::{compare, compare_results, ComparisonResult};
pub use config::{EscrowTerms, FeeTerms, LoanInput, LoanInputBuilder};
pub use decimal::{Money, Rate};
pub use engine::{calculate_loan, LoanResult};
pub use errors::{LoanError, Result};
pub use export::{export_schedule_csv, schedule_to_csv_string, write_schedule_csv};
pub use interest::periodic_rate;
pub use payments::{
    base_payment, constant_principal_installment, simulate, AmortizationSchedule, Installment,
    PaymentSolution, ScheduleRow, ScheduleTerms, SimulationState,
};
pub use types::{
    AmortizationMethod, Compounding, PaymentFrequency, RoundingPolicy, SimulationPhase,
};
pub use warnings::{Warning, WarningLog};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
