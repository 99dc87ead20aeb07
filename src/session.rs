use crate::client::Client;
use crate::models::{DateRangeFilter, ReportConfiguration};
use log::error;
use std::num::ParseIntError;

/// Parse the comma-separated selection entered by the operator.
///
/// Every token must be an integer once surrounding whitespace is stripped;
/// a single bad token fails the whole selection, which aborts the run
/// before any update is issued.
pub fn parse_selection(input: &str) -> Result<Vec<i64>, ParseIntError> {
    input.split(',').map(|token| token.trim().parse()).collect()
}

/// Resolve selection numbers against the 1-based listing order.
///
/// Numbers outside the listed range are silently dropped, duplicates are
/// kept, and the result preserves selection order. An empty result is
/// legal and simply means nothing gets updated.
pub fn select<'a>(
    configs: &'a [ReportConfiguration],
    numbers: &[i64],
) -> Vec<&'a ReportConfiguration> {
    numbers
        .iter()
        .filter_map(|&n| usize::try_from(n).ok().filter(|&n| n >= 1))
        .filter_map(|n| configs.get(n - 1))
        .collect()
}

/// Apply the same date filter to every selected configuration, one PATCH
/// at a time. A failed update is printed and logged but does not abort the
/// batch; the remaining items are still attempted. Returns how many
/// updates succeeded.
pub async fn apply_updates(
    client: &Client,
    selected: &[&ReportConfiguration],
    filter: DateRangeFilter,
) -> usize {
    let mut updated = 0;
    for config in selected {
        match client
            .update_report_configuration(&config.id, &config.title, filter)
            .await
        {
            Ok(()) => {
                println!(" {} report has been updated.", config.title);
                updated += 1;
            }
            Err(e) => {
                println!("{}", e);
                error!("Application Error: {}", e);
            }
        }
    }
    updated
}
