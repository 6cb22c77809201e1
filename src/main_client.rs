// Terminal client for the diabetes prediction service
use std::io::{self, Write};
use std::path::Path;

use diabetes_predict::frontend::{collect_record, render_outcome, PredictClient, DEFAULT_PREDICT_URL};
use diabetes_predict::logger::setup_logging;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let url = args
        .windows(2)
        .find(|w| w[0] == "--url")
        .map(|w| w[1].as_str())
        .unwrap_or(DEFAULT_PREDICT_URL);

    // File only; console output belongs to the form.
    if let Err(e) = setup_logging(Path::new("logs"), "diabetes_client", false) {
        eprintln!("Failed to set up logging: {e}");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    writeln!(output, "Diabetes Prediction")?;
    writeln!(output, "Enter the values below to predict whether a patient has diabetes or not.")?;
    writeln!(output)?;

    let record = collect_record(&mut input, &mut output)?;

    let client = PredictClient::new(url);
    let outcome = client.submit(&record);

    writeln!(output)?;
    for line in render_outcome(&outcome) {
        writeln!(output, "{line}")?;
    }
    Ok(())
}
