use std::io::Write;

use serde::{Deserialize, Serialize};

use super::scorer::Category;
use super::verdict::Verdict;
use super::ScoringResult;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to write summary: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode summary CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A scored résumé and the name it was submitted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub name: String,
    pub result: ScoringResult,
}

/// One line of the candidate summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub verdict: String,
    pub total_score: u32,
    /// Capped points per category, in `Category::ordered()` order.
    pub category_scores: Vec<u32>,
    pub experience_years: u32,
    pub flags: Vec<String>,
}

impl SummaryRow {
    fn from_document(document: &ScoredDocument) -> Self {
        let result = &document.result;
        Self {
            name: document.name.clone(),
            verdict: result.verdict.short_label().to_string(),
            total_score: result.total_score,
            category_scores: Category::ordered()
                .iter()
                .map(|category| result.score_for(*category))
                .collect(),
            experience_years: result.experience_years,
            flags: result.flags.clone(),
        }
    }
}

/// Ranked summary of a batch, best candidates first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub rows: Vec<SummaryRow>,
    pub documents: Vec<ScoredDocument>,
}

impl BatchSummary {
    /// Orders by total score descending, then by name so equal scores stay stable.
    pub fn from_documents(mut documents: Vec<ScoredDocument>) -> Self {
        documents.sort_by(|a, b| {
            b.result
                .total_score
                .cmp(&a.result.total_score)
                .then_with(|| a.name.cmp(&b.name))
        });
        let rows = documents.iter().map(SummaryRow::from_document).collect();
        Self { rows, documents }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers shared by the CSV export and the console table.
    pub fn headers() -> Vec<&'static str> {
        let mut headers = vec!["Candidate", "Verdict", "Total Score"];
        headers.extend(Category::ordered().iter().map(|category| category.label()));
        headers.extend(["Years", "Flags"]);
        headers
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), BatchError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(Self::headers())?;

        for row in &self.rows {
            let mut record = vec![
                row.name.clone(),
                row.verdict.clone(),
                row.total_score.to_string(),
            ];
            record.extend(row.category_scores.iter().map(u32::to_string));
            record.push(row.experience_years.to_string());
            record.push(row.flags.join("; "));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Count per verdict, every verdict listed in priority order.
    pub fn verdict_counts(&self) -> Vec<(Verdict, usize)> {
        Verdict::ordered()
            .into_iter()
            .map(|verdict| {
                let count = self
                    .documents
                    .iter()
                    .filter(|document| document.result.verdict == verdict)
                    .count();
                (verdict, count)
            })
            .collect()
    }
}
