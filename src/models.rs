use crate::error::ApiError;
use log::debug;
use serde::{Deserialize, Serialize};

/// A report configuration as listed by the API. Only the fields this tool
/// works with are kept; everything else in the JSON:API document is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfiguration {
    pub id: String,
    pub title: String,
}

/// Relative date window sent as the report filter. Values are whole days
/// counted back from "now"; negative values are passed through unchanged
/// when the operator supplies a future date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRangeFilter {
    #[serde(rename = "newerThanDays")]
    pub newer_than_days: i64,
    #[serde(rename = "olderThanDays")]
    pub older_than_days: i64,
}

/// PATCH body for a report configuration update.
///
/// The nested `configuration` object is replaced wholesale on the server;
/// any fields not echoed back here are dropped.
#[derive(Debug, Serialize)]
pub struct UpdatePayload {
    data: UpdateData,
}

#[derive(Debug, Serialize)]
struct UpdateData {
    attributes: UpdateAttributes,
}

#[derive(Debug, Serialize)]
struct UpdateAttributes {
    configuration: UpdateConfiguration,
}

#[derive(Debug, Serialize)]
struct UpdateConfiguration {
    title: String,
    filter: DateRangeFilter,
}

impl UpdatePayload {
    pub fn new(title: impl Into<String>, filter: DateRangeFilter) -> Self {
        UpdatePayload {
            data: UpdateData {
                attributes: UpdateAttributes {
                    configuration: UpdateConfiguration {
                        title: title.into(),
                        filter,
                    },
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Vec<RawConfigEntry>,
}

#[derive(Debug, Deserialize)]
struct RawConfigEntry {
    id: Option<String>,
    #[serde(default)]
    attributes: RawAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    #[serde(default)]
    configuration: RawConfiguration,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    title: String,
}

/// Parse the list response body into report configurations.
///
/// Entries without an `id` are skipped entirely so they never receive an
/// ordinal in the interactive listing. A missing title defaults to "".
pub fn parse_report_configurations(data: &str) -> Result<Vec<ReportConfiguration>, ApiError> {
    let parsed: ListResponse = serde_json::from_str(data).map_err(|_| ApiError::InvalidJson)?;
    let configs: Vec<ReportConfiguration> = parsed
        .data
        .into_iter()
        .filter_map(|entry| {
            entry.id.map(|id| ReportConfiguration {
                id,
                title: entry.attributes.configuration.title,
            })
        })
        .collect();
    debug!("Parsed {} report configurations", configs.len());
    Ok(configs)
}
