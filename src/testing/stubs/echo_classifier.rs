use crate::classifiers::{Classifier, Distribution};
use crate::core::{DtreeError, Record, Result, Value};

/// Answers with whatever the record already holds under `label_attr`.
pub struct EchoClassifier {
    label_attr: String,
}

impl EchoClassifier {
    pub fn new(label_attr: impl Into<String>) -> Self {
        Self {
            label_attr: label_attr.into(),
        }
    }
}

impl Classifier for EchoClassifier {
    fn classify(&self, record: Option<&Record>) -> Result<String> {
        let record = record.ok_or_else(|| DtreeError::invalid_input("record is null"))?;
        Ok(record
            .get(&self.label_attr)
            .unwrap_or(&Value::Null)
            .count_key())
    }

    fn class_distribution(&self, record: Option<&Record>) -> Result<Distribution> {
        let label = self.classify(record)?;
        Ok(Distribution::from([(label, 1.0)]))
    }
}
