//! Likert vocabulary lookup.

use std::collections::BTreeMap;

use wave_config::NormalizationConfig;

use crate::error::NormalizationError;

/// Exact-match text to ordinal code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    codes: BTreeMap<String, i64>,
}

impl Vocabulary {
    /// Validates the config, then builds the lookup table from it.
    pub fn from_config(config: &NormalizationConfig) -> Result<Self, NormalizationError> {
        config.validate()?;
        let codes = config
            .vocabulary
            .iter()
            .map(|entry| (entry.text.clone(), entry.code))
            .collect();
        Ok(Self { codes })
    }

    /// Case- and spacing-sensitive lookup.
    pub fn lookup(&self, text: &str) -> Option<i64> {
        self.codes.get(text).copied()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let codes = NormalizationConfig::default()
            .vocabulary
            .into_iter()
            .map(|entry| (entry.text, entry.code))
            .collect();
        Self { codes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_config::ConfigError;

    #[test]
    fn test_default_vocabulary_is_total_on_its_domain() {
        let vocabulary = Vocabulary::default();
        let expected = [
            ("A great deal", 5),
            ("A lot", 4),
            ("Often", 4),
            ("A fair amount", 3),
            ("Occasionally", 3),
            ("A little", 2),
            ("Once or twice", 2),
            ("None", 1),
            ("Not at all", 1),
        ];
        for (text, code) in expected {
            assert_eq!(vocabulary.lookup(text), Some(code), "{text}");
        }
        assert_eq!(vocabulary, Vocabulary::from_config(&NormalizationConfig::default()).unwrap());
    }

    #[test]
    fn test_lookup_is_exact() {
        let vocabulary = Vocabulary::default();
        assert_eq!(vocabulary.lookup("a lot"), None);
        assert_eq!(vocabulary.lookup("A lot "), None);
        assert_eq!(vocabulary.lookup("A  lot"), None);
        assert_eq!(vocabulary.lookup("Sometimes"), None);
    }

    #[test]
    fn test_from_config_rejects_duplicates() {
        let mut config = NormalizationConfig::default();
        let first = config.vocabulary[0].clone();
        config.vocabulary.push(first);
        assert!(matches!(
            Vocabulary::from_config(&config),
            Err(NormalizationError::Config(ConfigError::DuplicateVocabulary { text }))
                if text == "A great deal"
        ));
    }

    #[test]
    fn test_from_config_rejects_empty() {
        let config = NormalizationConfig {
            vocabulary: Vec::new(),
            ..NormalizationConfig::default()
        };
        assert!(matches!(
            Vocabulary::from_config(&config),
            Err(NormalizationError::Config(ConfigError::EmptyList { .. }))
        ));
    }
}
