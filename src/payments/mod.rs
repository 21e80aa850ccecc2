pub mod amortization;
pub mod solver;

pub use amortization::{
    simulate, AmortizationSchedule, Installment, ScheduleRow, ScheduleTerms, SimulationState,
};
pub use solver::{base_payment, constant_principal_installment, PaymentSolution};
