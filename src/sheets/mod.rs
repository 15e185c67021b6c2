pub mod client;
pub mod normalize;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::restaurant::{RestaurantData, Timings};

pub use client::GoogleSheetsClient;

/// A single spreadsheet cell; `None` is the source's missing-value marker.
pub type Cell = Option<String>;
pub type Row = Vec<Cell>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    RestaurantInfo,
    Timings,
    Menu,
    Extras,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::RestaurantInfo,
        Dataset::Timings,
        Dataset::Menu,
        Dataset::Extras,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::RestaurantInfo => "restaurant_info",
            Dataset::Timings => "timings",
            Dataset::Menu => "menu",
            Dataset::Extras => "extras",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sheet as fetched: the header row plus the data rows beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no sheet id configured for {0}")]
    MissingSheetId(Dataset),
    #[error("request for {dataset} failed: {source}")]
    Http {
        dataset: Dataset,
        #[source]
        source: reqwest::Error,
    },
    #[error("{dataset} returned HTTP {status}")]
    Status {
        dataset: Dataset,
        status: reqwest::StatusCode,
    },
    #[error("{dataset} is not valid CSV: {source}")]
    Csv {
        dataset: Dataset,
        #[source]
        source: csv::Error,
    },
}

/// What the loader does when a dataset cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    UseEmptyDataset,
}

impl FetchError {
    pub fn recovery(&self) -> Recovery {
        match self {
            FetchError::MissingSheetId(_)
            | FetchError::Http { .. }
            | FetchError::Status { .. }
            | FetchError::Csv { .. } => Recovery::UseEmptyDataset,
        }
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, dataset: Dataset) -> Result<RawTable, FetchError>;
}

/// A freshly built model plus the datasets that had to be replaced by empty data.
#[derive(Debug)]
pub struct LoadOutcome {
    pub data: RestaurantData,
    pub failed: Vec<Dataset>,
}

impl LoadOutcome {
    /// Nothing at all could be fetched.
    pub fn is_total_failure(&self) -> bool {
        self.failed.len() == Dataset::ALL.len()
    }
}

/// Fetches all four datasets and normalizes them into a new model.
pub async fn load_restaurant(source: &dyn DataSource) -> LoadOutcome {
    info!("fetching restaurant data");
    let (info, timings, menu, extras) = tokio::join!(
        source.fetch(Dataset::RestaurantInfo),
        source.fetch(Dataset::Timings),
        source.fetch(Dataset::Menu),
        source.fetch(Dataset::Extras),
    );

    let mut failed = Vec::new();
    let info = recover(Dataset::RestaurantInfo, info, &mut failed);
    let timings = recover(Dataset::Timings, timings, &mut failed);
    let menu = recover(Dataset::Menu, menu, &mut failed);
    let extras = recover(Dataset::Extras, extras, &mut failed);

    let data = RestaurantData::new(
        info.map(|t| normalize::profile(&t)).unwrap_or_default(),
        timings
            .map(|t| normalize::timings(&t))
            .unwrap_or_else(Timings::default),
        menu.map(|t| normalize::menu(&t)).unwrap_or_default(),
        extras.map(|t| normalize::extras(&t)).unwrap_or_default(),
    );

    info!(
        menu_items = data.menu.len(),
        weekly = data.timings.weekly.len(),
        extras = data.extras.len(),
        failed = failed.len(),
        "restaurant data loaded"
    );
    LoadOutcome { data, failed }
}

fn recover(
    dataset: Dataset,
    fetched: Result<RawTable, FetchError>,
    failed: &mut Vec<Dataset>,
) -> Option<RawTable> {
    match fetched {
        Ok(table) => Some(table),
        Err(e) => match e.recovery() {
            Recovery::UseEmptyDataset => {
                warn!(%dataset, error = %e, "dataset unavailable; using empty data");
                failed.push(dataset);
                None
            }
        },
    }
}
