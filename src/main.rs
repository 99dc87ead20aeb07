use conformity_reports::{Client, DEFAULT_REGION, dates, session};
use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let api_key = env::var("CONFORMITY_API_KEY")
        .map_err(|_| "Set CONFORMITY_API_KEY in your environment or .env file")?;
    let region = env::var("CONFORMITY_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
    let client = Client::for_region(api_key, &region)?;

    let configs = client.list_report_configurations().await?;
    for (i, config) in configs.iter().enumerate() {
        println!("{}. Report ID: {} - Title: {}", i + 1, config.id, config.title);
    }

    let input = prompt(
        "Enter the number(s) of the report configuration(s) you want to update (comma-separated): ",
    )?;
    let numbers = match session::parse_selection(&input) {
        Ok(numbers) => numbers,
        Err(_) => {
            log::error!("Invalid input for report numbers.");
            return Ok(());
        }
    };
    let selected = session::select(&configs, &numbers);

    let start_date = prompt("Enter a start date (YYYY-MM-DD): ")?;
    let end_date = prompt("Enter an end date (YYYY-MM-DD): ")?;
    let filter = dates::resolve_offsets(&start_date, &end_date)?;

    session::apply_updates(&client, &selected, filter).await;
    Ok(())
}
