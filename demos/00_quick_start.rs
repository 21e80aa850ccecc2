/// quick start - minimal example to get started
use amortization_rs::chrono::NaiveDate;
use amortization_rs::{calculate_loan, Decimal, LoanInput, Money};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    // a $10,000 personal loan at 6% over a year
    let input = LoanInput::builder()
        .principal(Money::from_major(10_000))
        .annual_rate_percent(Decimal::from(6))
        .term_months(12)
        .start_date(NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("bad date")?)
        .build()?;

    let result = calculate_loan(&input)?;

    println!("periodic rate:   {}", result.periodic_rate);
    println!("monthly payment: {}", result.periodic_payment);
    println!("total interest:  {}", result.total_interest);
    println!("total paid:      {}", result.total_paid);
    println!("payoff date:     {}", result.payoff_date);

    for warning in &result.warnings {
        println!("note: {}", warning);
    }

    Ok(())
}
