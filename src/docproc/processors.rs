//! Stock document processors and the factory building them from configuration.

use std::sync::Arc;

use anyhow::anyhow;

use crate::config::ComponentSpec;
use crate::docproc::chain::{DocumentProcessor, Progress};
use crate::docproc::document::{Document, FieldValue};

/// Appends `" " + suffix` to a field. Fails if the field is unset.
#[derive(Debug, Clone)]
pub struct AppendSuffix {
    field: String,
    suffix: String,
}

impl AppendSuffix {
    pub fn new(field: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            suffix: suffix.into(),
        }
    }
}

impl DocumentProcessor for AppendSuffix {
    fn name(&self) -> &str {
        "append_suffix"
    }

    fn process(&self, document: &mut Document) -> Progress {
        let Some(current) = document.field_value(&self.field) else {
            return Progress::fail(anyhow!("field `{}` is not set", self.field));
        };

        let updated = format!("{current} {}", self.suffix);
        document.set_field_value(self.field.clone(), updated);
        Progress::Continue
    }
}

/// Overwrites a field with a fixed value.
#[derive(Debug, Clone)]
pub struct SetField {
    field: String,
    value: FieldValue,
}

impl SetField {
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl DocumentProcessor for SetField {
    fn name(&self) -> &str {
        "set_field"
    }

    fn process(&self, document: &mut Document) -> Progress {
        document.set_field_value(self.field.clone(), self.value.clone());
        Progress::Continue
    }
}

/// Stops the chain for documents lacking a field.
#[derive(Debug, Clone)]
pub struct RequireField {
    field: String,
}

impl RequireField {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

impl DocumentProcessor for RequireField {
    fn name(&self) -> &str {
        "require_field"
    }

    fn process(&self, document: &mut Document) -> Progress {
        if document.field_value(&self.field).is_some() {
            Progress::Continue
        } else {
            Progress::SkipRemaining
        }
    }
}

/// Builds a processor from its configured kind.
pub fn build(spec: &ComponentSpec) -> anyhow::Result<Arc<dyn DocumentProcessor>> {
    let config = &spec.config;
    let processor: Arc<dyn DocumentProcessor> = match spec.kind.as_str() {
        "append_suffix" => Arc::new(AppendSuffix::new(config.require("field")?, config.require("suffix")?)),
        "set_field" => Arc::new(SetField::new(config.require("field")?, config.require("value")?)),
        "require_field" => Arc::new(RequireField::new(config.require("field")?)),
        other => anyhow::bail!("unknown processor kind `{other}`"),
    };
    Ok(processor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_suffix_separates_with_space() {
        let mut doc = Document::new("id:1").with_field("title", "Music");
        assert!(matches!(AppendSuffix::new("title", "Apple").process(&mut doc), Progress::Continue));
        assert_eq!(doc.field_value("title"), Some(&FieldValue::from("Music Apple")));
    }

    #[test]
    fn append_suffix_fails_on_missing_field() {
        let mut doc = Document::new("id:1");
        match AppendSuffix::new("title", "Apple").process(&mut doc) {
            Progress::Fail(Some(cause)) => assert_eq!(cause.to_string(), "field `title` is not set"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(doc.is_empty());
    }

    #[test]
    fn require_field_skips_when_absent() {
        let mut doc = Document::new("id:1");
        assert!(matches!(RequireField::new("title").process(&mut doc), Progress::SkipRemaining));
    }
}
