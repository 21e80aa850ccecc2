/// extra payments - compare a mortgage with and without extra principal
use amortization_rs::chrono::NaiveDate;
use amortization_rs::{compare, Decimal, LoanInput, Money, PaymentFrequency};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    println!("=== extra payments ===\n");

    let base = LoanInput::builder()
        .principal(Money::from_major(300_000))
        .annual_rate_percent(Decimal::new(65, 1))
        .term_months(360)
        .start_date(NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("bad date")?)
        .build()?;

    let what_if = LoanInput {
        extra_per_period: Money::from_major(250),
        lump_sum_extra: Money::from_major(5_000),
        ..base.clone()
    };

    let comparison = compare(&base, &what_if)?;
    let (years, months) = comparison.periods_saved_as_years_months();

    println!("base:    {} payments of {}", comparison.a.period_count(), comparison.a.periodic_payment);
    println!("what-if: {} payments of {}", comparison.b.period_count(), comparison.b.periodic_payment);
    println!("  paid off {} years and {} months sooner", years, months);
    println!("  {} days earlier, on {}", comparison.payoff_days_saved(), comparison.b.payoff_date);
    println!("  interest saved: {}", comparison.interest_diff);
    println!("  total paid diff: {}", comparison.total_paid_diff);

    // biweekly payments on the same loan
    println!("\n=== biweekly ===\n");

    let biweekly = LoanInput {
        frequency: PaymentFrequency::Biweekly,
        ..base.clone()
    };
    let comparison = compare(&base, &biweekly)?;

    println!("monthly payment:  {}", comparison.a.periodic_payment);
    println!("biweekly payment: {}", comparison.b.periodic_payment);
    println!("interest diff:    {}", comparison.interest_diff);

    Ok(())
}
