/// csv export - write an amortization schedule to stdout and to a file
use amortization_rs::chrono::NaiveDate;
use amortization_rs::{
    calculate_loan, export_schedule_csv, write_schedule_csv, Decimal, LoanInput, Money,
    PaymentFrequency,
};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()?;

    let input = LoanInput::builder()
        .principal(Money::from_major(24_000))
        .annual_rate_percent(Decimal::new(49, 1))
        .term_months(24)
        .frequency(PaymentFrequency::Biweekly)
        .start_date(NaiveDate::from_ymd_opt(2024, 8, 1).ok_or("bad date")?)
        .build()?;

    let result = calculate_loan(&input)?;

    // first few rows to stdout
    let preview = &result.schedule[..result.schedule.len().min(6)];
    write_schedule_csv(preview, std::io::stdout())?;

    let path = std::env::temp_dir().join("amortization_schedule.csv");
    export_schedule_csv(&result.schedule, &path)?;
    println!("\nsaved {} rows to {}", result.period_count(), path.display());

    Ok(())
}
