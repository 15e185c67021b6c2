use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::{DataSource, Dataset, FetchError, RawTable, Row};
use crate::config::SheetsConfig;

/// Reads publicly shared Google Sheets through their CSV export endpoint.
#[derive(Debug, Clone)]
pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
    restaurant_info_id: Option<String>,
    timings_id: Option<String>,
    menu_id: Option<String>,
    extras_id: Option<String>,
}

impl GoogleSheetsClient {
    pub fn new(config: &SheetsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            restaurant_info_id: config.restaurant_info_id.clone(),
            timings_id: config.timings_id.clone(),
            menu_id: config.menu_id.clone(),
            extras_id: config.extras_id.clone(),
        })
    }

    fn sheet_id(&self, dataset: Dataset) -> Option<&str> {
        match dataset {
            Dataset::RestaurantInfo => self.restaurant_info_id.as_deref(),
            Dataset::Timings => self.timings_id.as_deref(),
            Dataset::Menu => self.menu_id.as_deref(),
            Dataset::Extras => self.extras_id.as_deref(),
        }
    }

    fn export_url(&self, sheet_id: &str) -> String {
        format!("{}/{}/gviz/tq?tqx=out:csv", self.base_url, sheet_id)
    }
}

#[async_trait]
impl DataSource for GoogleSheetsClient {
    #[instrument(skip(self))]
    async fn fetch(&self, dataset: Dataset) -> Result<RawTable, FetchError> {
        let sheet_id = self
            .sheet_id(dataset)
            .ok_or(FetchError::MissingSheetId(dataset))?;

        let response = self
            .client
            .get(self.export_url(sheet_id))
            .send()
            .await
            .map_err(|source| FetchError::Http { dataset, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { dataset, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Http { dataset, source })?;

        let table = parse_csv(&body).map_err(|source| FetchError::Csv { dataset, source })?;
        debug!(rows = table.rows.len(), columns = table.columns.len(), "sheet fetched");
        Ok(table)
    }
}

/// First record is the header; empty fields become missing cells.
pub fn parse_csv(body: &str) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let columns = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = record
            .iter()
            .map(|v| {
                let v = v.trim();
                (!v.is_empty()).then(|| v.to_string())
            })
            .collect();
        if row.iter().all(Option::is_none) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}
