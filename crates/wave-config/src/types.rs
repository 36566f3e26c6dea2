//! Configuration structures and their built-in defaults.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Complete configuration for one merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Canonical column layout.
    pub layout: ColumnLayout,
    /// Free-text to ordinal code conversion.
    pub normalization: NormalizationConfig,
    /// Completion-status row filter.
    pub filter: CompletionFilter,
    /// Columns removed from the final table.
    pub prune: PruneConfig,
}

impl WaveConfig {
    /// Checks every section, failing on the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.normalization.validate()?;
        self.filter.validate()?;
        self.prune.validate()
    }
}

/// Names that drive the canonical column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Batch identifier column stamped from the file name.
    pub id: String,
    /// Response timestamp column.
    pub recorded_date: String,
    /// Response duration column.
    pub duration: String,
    /// Prefix of question columns sorted by their numeric suffix.
    pub question_prefix: String,
    /// Prefix of attention-check columns placed last.
    pub attention_prefix: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            recorded_date: "RecordedDate".to_string(),
            duration: "Duration".to_string(),
            question_prefix: "Q".to_string(),
            attention_prefix: "Attention".to_string(),
        }
    }
}

impl ColumnLayout {
    /// The columns that open the canonical layout, in order.
    pub fn leading(&self) -> [&str; 3] {
        [&self.id, &self.recorded_date, &self.duration]
    }

    fn validate(&self) -> Result<()> {
        let fields = [
            ("layout.id", &self.id),
            ("layout.recorded_date", &self.recorded_date),
            ("layout.duration", &self.duration),
            ("layout.question_prefix", &self.question_prefix),
            ("layout.attention_prefix", &self.attention_prefix),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }
        Ok(())
    }
}

/// One row of the text-to-code vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Exact response text (case- and spacing-sensitive).
    pub text: String,
    /// Ordinal code substituted for the text.
    pub code: i64,
}

impl VocabularyEntry {
    fn new(text: &str, code: i64) -> Self {
        Self {
            text: text.to_string(),
            code,
        }
    }
}

/// Settings for the per-column field normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Columns whose name starts with any of these prefixes are left as text.
    pub excluded_prefixes: Vec<String>,
    /// Likert-style response vocabulary.
    pub vocabulary: Vec<VocabularyEntry>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: vec![
                "RecordedDate".to_string(),
                "Duration".to_string(),
                "ID".to_string(),
            ],
            vocabulary: vec![
                VocabularyEntry::new("A great deal", 5),
                VocabularyEntry::new("A lot", 4),
                VocabularyEntry::new("Often", 4),
                VocabularyEntry::new("A fair amount", 3),
                VocabularyEntry::new("Occasionally", 3),
                VocabularyEntry::new("A little", 2),
                VocabularyEntry::new("Once or twice", 2),
                VocabularyEntry::new("None", 1),
                VocabularyEntry::new("Not at all", 1),
            ],
        }
    }
}

impl NormalizationConfig {
    /// Returns true when `column` is excluded from normalization.
    pub fn is_excluded(&self, column: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| column.starts_with(prefix.as_str()))
    }

    /// Checks the vocabulary and exclusion list.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(ConfigError::EmptyList {
                field: "normalization.vocabulary",
            });
        }
        if self
            .excluded_prefixes
            .iter()
            .any(|prefix| prefix.trim().is_empty())
        {
            return Err(ConfigError::EmptyField {
                field: "normalization.excluded_prefixes",
            });
        }
        let mut seen = BTreeSet::new();
        for entry in &self.vocabulary {
            if entry.text.is_empty() {
                return Err(ConfigError::EmptyField {
                    field: "normalization.vocabulary.text",
                });
            }
            if entry.code < 1 {
                return Err(ConfigError::InvalidCode {
                    text: entry.text.clone(),
                    code: entry.code,
                });
            }
            if !seen.insert(entry.text.as_str()) {
                return Err(ConfigError::DuplicateVocabulary {
                    text: entry.text.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Drops responses that were not completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionFilter {
    /// Column carrying the completion flag; every source file must have it.
    pub column: String,
    /// Exact value marking an incomplete response.
    pub unfinished_value: String,
}

impl Default for CompletionFilter {
    fn default() -> Self {
        Self {
            column: "Finished".to_string(),
            unfinished_value: "False".to_string(),
        }
    }
}

impl CompletionFilter {
    /// Returns true when the row's completion value marks it as unfinished.
    ///
    /// Only the exact configured value matches; missing values are kept.
    pub fn is_unfinished(&self, value: Option<&str>) -> bool {
        value == Some(self.unfinished_value.as_str())
    }

    fn validate(&self) -> Result<()> {
        if self.column.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "filter.column",
            });
        }
        if self.unfinished_value.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "filter.unfinished_value",
            });
        }
        Ok(())
    }
}

/// Personally-identifying and bookkeeping columns removed before output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    pub columns: Vec<String>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        let columns = [
            "StartDate",
            "EndDate",
            "Status",
            "IPAddress",
            "Progress",
            "ResponseId",
            "RecipientLastName",
            "RecipientFirstName",
            "RecipientEmail",
            "ExternalReference",
            "LocationLatitude",
            "LocationLongitude",
            "DistributionChannel",
            "UserLanguage",
            // Unfinished rows are already filtered out by this point.
            "Finished",
        ];
        Self {
            columns: columns.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PruneConfig {
    /// Returns true when `column` is on the prune list.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    fn validate(&self) -> Result<()> {
        if self.columns.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyField {
                field: "prune.columns",
            });
        }
        Ok(())
    }
}
