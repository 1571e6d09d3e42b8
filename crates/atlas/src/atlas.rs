//! Main Atlas struct and public API.

use std::path::Path;

use crate::context::ValidationContext;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::schema::Dataset;
use crate::validation::{OutlierConfig, ValidationEngine};

/// Configuration for Atlas.
#[derive(Debug, Clone, Default)]
pub struct AtlasConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Outlier check configuration.
    pub outlier: OutlierConfig,
}

impl AtlasConfig {
    /// Set the outlier configuration.
    pub fn with_outlier(mut self, outlier: OutlierConfig) -> Self {
        self.outlier = outlier;
        self
    }

    /// Set the parser configuration.
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}

/// Loads datasets and runs validation passes over them.
pub struct Atlas {
    config: AtlasConfig,
    parser: Parser,
    engine: ValidationEngine,
}

impl Atlas {
    /// Create an Atlas instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AtlasConfig::default())
    }

    /// Create an Atlas instance with custom configuration.
    pub fn with_config(config: AtlasConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let engine = ValidationEngine::with_outlier_config(config.outlier);

        Self {
            config,
            parser,
            engine,
        }
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Load a data file without validating it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Run a full validation pass over a dataset.
    pub fn validate(&self, dataset: Dataset) -> ValidationContext {
        ValidationContext::build(dataset, &self.engine)
    }

    /// Load a data file and validate it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<ValidationContext> {
        let (dataset, source) = self.load(path)?;
        Ok(self.validate(dataset).with_source(source))
    }
}

impl Default for Atlas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::validation::FindingKind;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_analyze_simple_csv() {
        let file = create_test_file("id,age,name\n1,25,Ann\n2,,Bob\n3,28,Cy\n");

        let context = Atlas::new().analyze(file.path()).unwrap();

        assert_eq!(context.dataset().column_count(), 3);
        let source = context.source().unwrap();
        assert_eq!(source.row_count, 3);
        assert_eq!(source.format, "csv");
        assert!(source.hash.starts_with("sha256:"));
        assert_eq!(context.cell_findings(1, 1), Some(FindingKind::Null.into()));
    }

    #[test]
    fn test_custom_threshold() {
        let mut content = String::from("n\n");
        for _ in 0..10 {
            content.push_str("1\n");
        }
        content.push_str("5\n");
        let file = create_test_file(&content);

        let default = Atlas::new().analyze(file.path()).unwrap();
        assert_eq!(default.summary().count(FindingKind::Outlier), 1);

        let lenient = Atlas::with_config(
            AtlasConfig::default().with_outlier(OutlierConfig::default().with_sigma_threshold(4.0)),
        );
        let context = lenient.analyze(file.path()).unwrap();
        assert_eq!(context.summary().count(FindingKind::Outlier), 0);
    }
}
