/// json input - parse loan terms from JSON and print the result as JSON
use amortization_rs::{calculate_loan, LoanInput};
use simple_logger::SimpleLogger;

const LOAN: &str = r#"{
    "principal": "18500.00",
    "annual_rate_percent": "7.25",
    "term_months": 60,
    "frequency": "monthly",
    "start_date": "2024-08-01",
    "extra_per_period": "50",
    "fees": { "origination": "350" }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    // a file path on the command line overrides the built-in loan
    let input = match std::env::args().nth(1) {
        Some(path) => LoanInput::from_json_file(path)?,
        None => LoanInput::from_json_str(LOAN)?,
    };

    let result = calculate_loan(&input)?;
    println!("{}", result.json());

    // invalid input is reported, never defaulted
    let broken = r#"{ "annual_rate_percent": 5, "term_months": 36, "start_date": "2024-01-01" }"#;
    if let Err(e) = LoanInput::from_json_str(broken) {
        println!("\nrejected: {}", e);
    }

    Ok(())
}
