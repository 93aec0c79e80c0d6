//! Historical cost data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Opaque identifier grouping costs by provider or account
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CloudId(String);

impl CloudId {
    /// Create a new cloud identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CloudId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CloudId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CloudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Total cost of one cloud on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalCostPoint {
    /// Calendar day of the spend
    pub date: NaiveDate,
    /// Cloud the spend belongs to
    pub cloud_id: CloudId,
    /// Sum of all cost records for that cloud on that day
    #[serde(rename = "cost")]
    pub total_cost: f64,
}

impl HistoricalCostPoint {
    /// Create a new historical point
    pub fn new(date: NaiveDate, cloud_id: impl Into<CloudId>, total_cost: f64) -> Self {
        Self {
            date,
            cloud_id: cloud_id.into(),
            total_cost,
        }
    }
}

/// A single billing row before daily aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Day the cost was incurred
    pub date: NaiveDate,
    /// Cloud the cost was billed to
    pub cloud_id: CloudId,
    /// Display name of the cloud, when known
    #[serde(default)]
    pub cloud_name: Option<String>,
    /// Cost in USD
    pub cost: f64,
}

impl CostRecord {
    /// Create a new cost record without a display name
    pub fn new(date: NaiveDate, cloud_id: impl Into<CloudId>, cost: f64) -> Self {
        Self {
            date,
            cloud_id: cloud_id.into(),
            cloud_name: None,
            cost,
        }
    }

    /// Attach a display name to the record
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.cloud_name = Some(name.into());
        self
    }
}

/// Sum cost records into one point per `(date, cloud)`.
///
/// Output is ascending by date; clouds sharing a date keep the order in
/// which they first appear in `records`.
pub fn aggregate_daily(records: &[CostRecord]) -> Vec<HistoricalCostPoint> {
    let mut cloud_order: HashMap<&CloudId, usize> = HashMap::new();
    let mut totals: BTreeMap<(NaiveDate, usize), (&CloudId, f64)> = BTreeMap::new();

    for record in records {
        let next = cloud_order.len();
        let order = *cloud_order.entry(&record.cloud_id).or_insert(next);
        totals
            .entry((record.date, order))
            .or_insert((&record.cloud_id, 0.0))
            .1 += record.cost;
    }

    totals
        .into_iter()
        .map(|((date, _), (cloud_id, total))| HistoricalCostPoint::new(date, cloud_id.clone(), total))
        .collect()
}

/// Mapping from cloud identifiers to display names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudDirectory {
    names: HashMap<CloudId, String>,
}

impl CloudDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from the names carried by cost records.
    ///
    /// The first non-empty name seen for a cloud wins.
    pub fn from_records(records: &[CostRecord]) -> Self {
        let mut directory = Self::new();
        for record in records {
            if let Some(name) = record.cloud_name.as_deref().filter(|n| !n.is_empty()) {
                directory
                    .names
                    .entry(record.cloud_id.clone())
                    .or_insert_with(|| name.to_string());
            }
        }
        directory
    }

    /// Register or replace the name of a cloud
    pub fn insert(&mut self, cloud_id: impl Into<CloudId>, name: impl Into<String>) {
        self.names.insert(cloud_id.into(), name.into());
    }

    /// Look up the display name of a cloud
    pub fn name(&self, cloud_id: &CloudId) -> Option<&str> {
        self.names.get(cloud_id).map(String::as_str)
    }

    /// Number of named clouds
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether no cloud is named
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check a cloud against a name allowlist.
    ///
    /// An empty allowlist admits every cloud. A cloud without a registered
    /// name is matched by its identifier.
    pub fn allows(&self, cloud_id: &CloudId, allowlist: &[String]) -> bool {
        if allowlist.is_empty() {
            return true;
        }
        let key = self.name(cloud_id).unwrap_or(cloud_id.as_str());
        allowlist.iter().any(|allowed| allowed == key)
    }
}

/// Longest historical window accepted, in days
pub const MAX_HISTORY_DAYS: i64 = 36_500;

/// Selection of the historical window fed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    end_date: NaiveDate,
    history_days: i64,
    clouds: Vec<String>,
}

impl HistoryQuery {
    /// Create a query covering `history_days` days up to and including `end_date`
    pub fn new(end_date: NaiveDate, history_days: i64) -> Result<Self> {
        if history_days <= 0 {
            return Err(ForecastError::ValidationError(format!(
                "History window must be positive, got {} days",
                history_days
            )));
        }
        if history_days > MAX_HISTORY_DAYS {
            return Err(ForecastError::ValidationError(format!(
                "History window of {} days exceeds the {} day limit",
                history_days, MAX_HISTORY_DAYS
            )));
        }

        Ok(Self {
            end_date,
            history_days,
            clouds: Vec::new(),
        })
    }

    /// Restrict the query to clouds whose name is in `clouds`
    pub fn with_clouds(mut self, clouds: Vec<String>) -> Self {
        self.clouds = clouds;
        self
    }

    /// First day included in the window
    pub fn start_date(&self) -> NaiveDate {
        self.end_date
            .checked_sub_signed(Duration::days(self.history_days))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day included in the window
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Cloud-name allowlist, empty for all clouds
    pub fn clouds(&self) -> &[String] {
        &self.clouds
    }

    /// Filter records to the window and allowlist, then aggregate them per day
    pub fn apply(&self, records: &[CostRecord], directory: &CloudDirectory) -> Vec<HistoricalCostPoint> {
        let start = self.start_date();
        let selected: Vec<CostRecord> = records
            .iter()
            .filter(|r| r.date >= start && r.date <= self.end_date)
            .filter(|r| directory.allows(&r.cloud_id, &self.clouds))
            .cloned()
            .collect();

        debug!(
            total = records.len(),
            selected = selected.len(),
            %start,
            end = %self.end_date,
            "selected cost records for history window"
        );

        aggregate_daily(&selected)
    }
}

/// Loader for billing records
#[derive(Debug)]
pub struct HistoryLoader;

impl HistoryLoader {
    /// Load cost records from a CSV file with a `date,cloud_id,cloud_name,cost` header
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<CostRecord>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load cost records from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CostRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize().enumerate() {
            let record: CostRecord = row?;
            // Header is line 1
            Self::validate(&record, index + 2)?;
            records.push(record);
        }

        debug!(rows = records.len(), "loaded cost records");
        Ok(records)
    }

    fn validate(record: &CostRecord, line: usize) -> Result<()> {
        if !record.cost.is_finite() {
            return Err(ForecastError::DataError(format!(
                "Line {}: cost must be a finite number",
                line
            )));
        }
        if record.cost < 0.0 {
            return Err(ForecastError::DataError(format!(
                "Line {}: cost must not be negative, got {}",
                line, record.cost
            )));
        }
        if record.cloud_id.as_str().is_empty() {
            return Err(ForecastError::DataError(format!(
                "Line {}: cloud_id must not be empty",
                line
            )));
        }
        Ok(())
    }
}
