use crate::config::Config;
use crate::embedding::SUPPORTED_MODELS;
use crate::error::{PatseekError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_corpus(config, &mut errors);
        Self::validate_embedding(config, &mut errors);
        Self::validate_retrieval(config, &mut errors);
        Self::validate_evaluation(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PatseekError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_corpus(config: &Config, errors: &mut Vec<ValidationError>) {
        // Existence is not checked here: the path may be created later or
        // overridden per invocation; the loader reports unreadable files.
        if config.corpus.csv_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "corpus.csv_file",
                "Corpus file path cannot be empty",
            ));
        }
    }

    fn validate_embedding(config: &Config, errors: &mut Vec<ValidationError>) {
        let model = config.embedding.model.as_str();
        if !SUPPORTED_MODELS.contains(&model) && model != "all-minilm-l6-v2" {
            errors.push(ValidationError::new(
                "embedding.model",
                format!(
                    "Unsupported model: {} (supported: {})",
                    model,
                    SUPPORTED_MODELS.join(", ")
                ),
            ));
        }

        if config.embedding.batch_size == 0 {
            errors.push(ValidationError::new(
                "embedding.batch_size",
                "Batch size must be greater than 0",
            ));
        }
    }

    fn validate_retrieval(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.retrieval.default_limit == 0 {
            errors.push(ValidationError::new(
                "retrieval.default_limit",
                "Default result limit must be greater than 0",
            ));
        }
    }

    fn validate_evaluation(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.evaluation.ground_truth_file.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "evaluation.ground_truth_file",
                "Ground truth file path cannot be empty",
            ));
        }

        if config.evaluation.top_n == 0 {
            errors.push(ValidationError::new(
                "evaluation.top_n",
                "top_n must be greater than 0",
            ));
        }
    }
}
