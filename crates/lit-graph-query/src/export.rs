//! Tabular CSV export.
//!
//! Column order and header names are part of the contract consumers
//! depend on; changing them breaks downstream notebooks.

use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::analytics::{CorrelationMatrix, InteractionRow, MentionComparisonRow};

/// Errors raised while writing a table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

type ExportResult<T> = Result<T, ExportError>;

fn writer(path: &Path) -> ExportResult<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path).map_err(|source| ExportError::Csv {
        path: path.display().to_string(),
        source,
    })
}

fn wrap<T>(path: &Path, result: Result<T, csv::Error>) -> ExportResult<T> {
    result.map_err(|source| ExportError::Csv {
        path: path.display().to_string(),
        source,
    })
}

/// Write interaction rows as `Character,Relation,Concept,Count`.
pub fn write_interactions(path: &Path, rows: &[InteractionRow]) -> ExportResult<()> {
    let mut w = writer(path)?;
    wrap(path, w.write_record(["Character", "Relation", "Concept", "Count"]))?;
    for row in rows {
        let count = row.count.to_string();
        wrap(
            path,
            w.write_record([
                row.character.as_str(),
                row.relation.as_str(),
                row.concept.as_str(),
                count.as_str(),
            ]),
        )?;
    }
    wrap(path, w.flush().map_err(csv::Error::from))?;
    info!(path = %path.display(), rows = rows.len(), "wrote interaction table");
    Ok(())
}

/// Write the concept mention comparison as
/// `Concept,Criticism Mentions,Novel Mentions`.
pub fn write_mention_comparison(
    path: &Path,
    rows: &[MentionComparisonRow],
) -> ExportResult<()> {
    let mut w = writer(path)?;
    wrap(
        path,
        w.write_record(["Concept", "Criticism Mentions", "Novel Mentions"]),
    )?;
    for row in rows {
        let criticism = row.criticism_mentions.to_string();
        let novel = row.novel_mentions.to_string();
        wrap(
            path,
            w.write_record([row.concept.as_str(), criticism.as_str(), novel.as_str()]),
        )?;
    }
    wrap(path, w.flush().map_err(csv::Error::from))?;
    info!(path = %path.display(), rows = rows.len(), "wrote mention comparison");
    Ok(())
}

/// Write the correlation matrix with character row and column labels.
///
/// NaN cells (zero-variance characters) are written as empty fields.
pub fn write_correlation(path: &Path, matrix: &CorrelationMatrix) -> ExportResult<()> {
    let mut w = writer(path)?;

    let mut header = vec![String::new()];
    header.extend(matrix.characters.iter().cloned());
    wrap(path, w.write_record(&header))?;

    for (character, row) in matrix.characters.iter().zip(&matrix.values) {
        let mut record = vec![character.clone()];
        for value in row {
            record.push(if value.is_nan() {
                String::new()
            } else {
                format!("{value:.6}")
            });
        }
        wrap(path, w.write_record(&record))?;
    }
    wrap(path, w.flush().map_err(csv::Error::from))?;
    info!(path = %path.display(), characters = matrix.characters.len(), "wrote correlation matrix");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<InteractionRow> {
        vec![InteractionRow {
            character: "Deckard".to_string(),
            relation: "linkedTo".to_string(),
            concept: "Cyborg Theory".to_string(),
            count: 3,
        }]
    }

    #[test]
    fn interaction_csv_has_the_contract_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.csv");
        write_interactions(&path, &rows()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Character,Relation,Concept,Count"));
        assert_eq!(lines.next(), Some("Deckard,linkedTo,Cyborg Theory,3"));
    }

    #[test]
    fn comparison_csv_has_the_contract_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mentions.csv");
        write_mention_comparison(
            &path,
            &[MentionComparisonRow {
                concept: "Animal Ethics".to_string(),
                criticism_mentions: 4,
                novel_mentions: 0,
            }],
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Concept,Criticism Mentions,Novel Mentions"));
        assert!(content.contains("Animal Ethics,4,0"));
    }

    #[test]
    fn correlation_csv_writes_nan_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("correlation.csv");
        let matrix = CorrelationMatrix {
            characters: vec!["Deckard".to_string(), "Rachael".to_string()],
            values: vec![vec![1.0, f64::NAN], vec![f64::NAN, 1.0]],
        };
        write_correlation(&path, &matrix).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(",Deckard,Rachael"));
        assert_eq!(lines.next(), Some("Deckard,1.000000,"));
    }
}
