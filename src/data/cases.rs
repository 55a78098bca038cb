use crate::domain::model::CaseRecord;
use crate::utils::error::{PortfolioError, Result};
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

const BUILTIN_CASES: &str = include_str!("cases.json");

/// Conjunctive filter over the catalogue. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseQuery {
    pub year: Option<i32>,
    pub legal_area: Option<String>,
    pub tag: Option<String>,
    pub own_cases_only: bool,
    pub search: Option<String>,
}

impl CaseQuery {
    pub fn matches(&self, record: &CaseRecord) -> bool {
        if self.year.is_some_and(|year| record.year != year) {
            return false;
        }
        if let Some(area) = &self.legal_area {
            if !record.legal_area.eq_ignore_ascii_case(area) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !record.has_tag(tag) {
                return false;
            }
        }
        if self.own_cases_only && !record.is_own_case {
            return false;
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let haystacks = [&record.title, &record.citation, &record.court];
            let hit = haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
                || record.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Read-only collection of case records, in dataset order.
#[derive(Debug, Clone)]
pub struct CaseCatalog {
    records: Vec<CaseRecord>,
}

impl CaseCatalog {
    /// 載入內建的案件資料
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CASES)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let records: Vec<CaseRecord> = serde_json::from_str(content)?;
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<CaseRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(integrity(format!("duplicate case id '{}'", record.id)));
            }
            if record.year != record.judgment_date.year() {
                return Err(integrity(format!(
                    "case '{}' has year {} but judgment date {}",
                    record.id, record.year, record.judgment_date
                )));
            }
            if let Some(rating) = record.complexity_rating {
                if !(1..=5).contains(&rating) {
                    return Err(integrity(format!(
                        "case '{}' has complexity rating {} outside 1-5",
                        record.id, rating
                    )));
                }
            }
        }

        tracing::debug!("Loaded {} case records", records.len());
        Ok(Self { records })
    }

    pub fn all(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CaseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn filter(&self, query: &CaseQuery) -> Vec<&CaseRecord> {
        self.records.iter().filter(|r| query.matches(r)).collect()
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        years.into_iter().rev().collect()
    }

    pub fn legal_areas(&self) -> Vec<&str> {
        let areas: BTreeSet<&str> = self.records.iter().map(|r| r.legal_area.as_str()).collect();
        areas.into_iter().collect()
    }
}

fn integrity(message: String) -> PortfolioError {
    PortfolioError::DataIntegrityError { message }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    title: &'a str,
    citation: &'a str,
    court: &'a str,
    judgment_date: String,
    year: i32,
    legal_area: &'a str,
    tags: String,
    is_own_case: bool,
    stage: &'a str,
    outcome: &'a str,
    complexity_rating: Option<u8>,
}

/// CSV export; tags are joined with `;` so each record stays on one row.
pub fn to_csv(records: &[&CaseRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(CsvRow {
            id: &record.id,
            title: &record.title,
            citation: &record.citation,
            court: &record.court,
            judgment_date: record.judgment_date.format("%Y-%m-%d").to_string(),
            year: record.year,
            legal_area: &record.legal_area,
            tags: record.tags.join(";"),
            is_own_case: record.is_own_case,
            stage: record.stage.as_deref().unwrap_or(""),
            outcome: record.outcome.as_deref().unwrap_or(""),
            complexity_rating: record.complexity_rating,
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PortfolioError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn to_json(records: &[&CaseRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
