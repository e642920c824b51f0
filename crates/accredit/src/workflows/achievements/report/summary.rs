use std::collections::BTreeMap;
use std::io;

use serde::Serialize;

use super::super::domain::{AchievementRecord, AchievementStatus, Category};
use super::views::{BucketStatus, ComplianceBucket, LevelBreakdownRow, LevelCounts};

/// Accreditation roll-up over approved records only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub approved_records: usize,
    pub category_counts: BTreeMap<Category, usize>,
    pub buckets: Vec<BucketStatus>,
    pub level_breakdown: Vec<LevelBreakdownRow>,
    pub level_totals: LevelCounts,
}

/// Folds `records` into a report. Non-approved records are ignored and an empty
/// input produces all-zero counts.
pub fn aggregate(records: &[AchievementRecord]) -> ComplianceReport {
    let mut category_counts: BTreeMap<Category, usize> = Category::ordered()
        .into_iter()
        .map(|category| (category, 0))
        .collect();
    let mut levels: BTreeMap<Category, LevelCounts> = Category::ordered()
        .into_iter()
        .map(|category| (category, LevelCounts::default()))
        .collect();
    let mut level_totals = LevelCounts::default();

    for record in records
        .iter()
        .filter(|record| record.status == AchievementStatus::Approved)
    {
        *category_counts.entry(record.category).or_default() += 1;
        levels.entry(record.category).or_default().record(record.level);
        level_totals.record(record.level);
    }

    let buckets = ComplianceBucket::ordered()
        .into_iter()
        .map(|bucket| {
            let actual = bucket
                .categories()
                .iter()
                .map(|category| category_counts.get(category).copied().unwrap_or(0))
                .sum();
            BucketStatus {
                bucket,
                label: bucket.label(),
                target: bucket.target(),
                actual,
                compliant: actual >= bucket.target(),
            }
        })
        .collect();

    let level_breakdown = Category::ordered()
        .into_iter()
        .map(|category| LevelBreakdownRow {
            category,
            category_label: category.label(),
            counts: levels.get(&category).copied().unwrap_or_default(),
        })
        .collect();

    ComplianceReport {
        approved_records: level_totals.total,
        category_counts,
        buckets,
        level_breakdown,
        level_totals,
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    category: &'a str,
    international: usize,
    national: usize,
    other: usize,
    total: usize,
}

impl ComplianceReport {
    pub fn is_fully_compliant(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.compliant)
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    pub fn bucket(&self, bucket: ComplianceBucket) -> Option<&BucketStatus> {
        self.buckets.iter().find(|status| status.bucket == bucket)
    }

    /// Writes the level breakdown as CSV, one row per category plus a totals row.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in &self.level_breakdown {
            csv.serialize(CsvRow {
                category: row.category_label,
                international: row.counts.international,
                national: row.counts.national,
                other: row.counts.other,
                total: row.counts.total,
            })?;
        }
        csv.serialize(CsvRow {
            category: "Total",
            international: self.level_totals.international,
            national: self.level_totals.national,
            other: self.level_totals.other,
            total: self.level_totals.total,
        })?;
        csv.flush()?;
        Ok(())
    }
}
