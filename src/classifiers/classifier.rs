use crate::core::{DtreeError, Record, Result};
use std::collections::BTreeMap;

pub type Distribution = BTreeMap<String, f64>;

/// Outputs computed before the first failure, plus that failure if any.
#[derive(Debug)]
pub struct BatchPrediction<T> {
    pub predictions: Vec<T>,
    pub error: Option<DtreeError>,
}

impl<T> BatchPrediction<T> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.predictions),
        }
    }
}

pub trait Classifier {
    /// Hard class for one record. `None` stands for a null record.
    fn classify(&self, record: Option<&Record>) -> Result<String>;

    /// Class probabilities for one record. `None` stands for a null record.
    fn class_distribution(&self, record: Option<&Record>) -> Result<Distribution>;

    fn predict<'a>(&self, record: impl Into<Option<&'a Record>>) -> Result<String>
    where
        Self: Sized,
    {
        self.classify(record.into())
    }

    fn predict_proba<'a>(&self, record: impl Into<Option<&'a Record>>) -> Result<Distribution>
    where
        Self: Sized,
    {
        self.class_distribution(record.into())
    }

    /// Predict in order, stopping at the first failure.
    fn predict_batch<'a, I, R>(&self, records: I) -> BatchPrediction<String>
    where
        Self: Sized,
        I: IntoIterator<Item = R>,
        R: Into<Option<&'a Record>>,
    {
        collect_until_error(records, |r| self.classify(r))
    }

    fn predict_proba_batch<'a, I, R>(&self, records: I) -> BatchPrediction<Distribution>
    where
        Self: Sized,
        I: IntoIterator<Item = R>,
        R: Into<Option<&'a Record>>,
    {
        collect_until_error(records, |r| self.class_distribution(r))
    }
}

fn collect_until_error<'a, I, R, T, F>(records: I, mut f: F) -> BatchPrediction<T>
where
    I: IntoIterator<Item = R>,
    R: Into<Option<&'a Record>>,
    F: FnMut(Option<&'a Record>) -> Result<T>,
{
    let mut predictions = Vec::new();
    for record in records {
        match f(record.into()) {
            Ok(p) => predictions.push(p),
            Err(e) => {
                return BatchPrediction {
                    predictions,
                    error: Some(e),
                };
            }
        }
    }
    BatchPrediction {
        predictions,
        error: None,
    }
}
