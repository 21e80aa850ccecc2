/// fees and escrow - financed fees, escrow and the constant principal method
use amortization_rs::chrono::NaiveDate;
use amortization_rs::{
    calculate_loan, AmortizationMethod, Compounding, Decimal, LoanInput, Money,
};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let start = NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("bad date")?;

    let financed = LoanInput::builder()
        .principal(Money::from_major(250_000))
        .annual_rate_percent(Decimal::new(575, 2))
        .term_months(360)
        .start_date(start)
        .origination_fee(Money::from_major(2_500))
        .closing_fee(Money::from_major(1_800))
        .finance_fees(true)
        .escrow_per_period(Money::from_major(420))
        .build()?;

    let result = calculate_loan(&financed)?;
    println!("=== financed fees with escrow ===");
    println!("present value:    {}", result.present_value);
    println!("base payment:     {}", result.base_payment);
    println!("with escrow:      {}", result.periodic_payment);
    println!("total interest:   {}", result.total_interest);
    println!("total paid:       {}\n", result.total_paid);

    let upfront = LoanInput {
        fees: amortization_rs::FeeTerms {
            financed: false,
            ..financed.fees.clone()
        },
        ..financed.clone()
    };
    let result = calculate_loan(&upfront)?;
    println!("=== fees paid up front ===");
    println!("base payment:     {}", result.base_payment);
    println!("total paid:       {}\n", result.total_paid);

    // compounding conventions on the same loan
    println!("=== compounding ===");
    for compounding in [
        Compounding::NominalMonthly,
        Compounding::NominalDaily,
        Compounding::EffectiveAnnual,
    ] {
        let input = LoanInput { compounding, ..financed.clone() };
        let result = calculate_loan(&input)?;
        println!("{:?}: rate {} payment {}", compounding, result.periodic_rate, result.base_payment);
    }

    // equal principal each month, payments decline over time
    let declining = LoanInput {
        method: AmortizationMethod::ConstantPrincipal,
        ..financed
    };
    let result = calculate_loan(&declining)?;
    println!("\n=== constant principal ===");
    if let (Some(first), Some(last)) = (result.row(1), result.schedule.last()) {
        println!("first payment: {} ({} interest)", first.payment, first.interest);
        println!("last payment:  {} ({} interest)", last.payment, last.interest);
    }
    println!("total interest: {}", result.total_interest);

    Ok(())
}
