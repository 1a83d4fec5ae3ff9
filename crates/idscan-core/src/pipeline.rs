//! End-to-end classification: fragments in, [`ClassificationResult`] out.
//!
//! The pipeline is strictly linear (type, then side, then fields) and holds
//! only read-only state, so one instance can be shared across threads.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::classify::{DocumentClassifier, SideClassifier};
use crate::error::{IdScanError, Result};
use crate::extract::SummaryExtractor;
use crate::models::config::ClassifierConfig;
use crate::models::document::ClassificationResult;

/// Document type, side and field extraction over one fragment list.
#[derive(Clone)]
pub struct DocumentPipeline {
    documents: DocumentClassifier,
    sides: SideClassifier,
    fields: Arc<SummaryExtractor>,
}

impl DocumentPipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let corpus = Arc::new(config.corpus);
        let fields = SummaryExtractor::new()
            .with_authority_threshold(config.authority_threshold)
            .with_min_detail_length(config.min_detail_length);

        Ok(Self {
            documents: DocumentClassifier::new(Arc::clone(&corpus))
                .with_confidence_floor(config.confidence_floor),
            sides: SideClassifier::new(corpus),
            fields: Arc::new(fields),
        })
    }

    /// Classify one image's fragments.
    ///
    /// `reference` identifies the image (usually its file name) and is copied
    /// into the result untouched.
    pub fn process<S: AsRef<str>>(&self, reference: &str, fragments: &[S]) -> ClassificationResult {
        let start = Instant::now();

        let (doc_type, scores) = self.documents.classify(fragments);
        let side = self.sides.classify_side(doc_type, fragments);
        let summary = self.fields.extract(fragments, doc_type);

        info!(
            "{}: {} ({}) from {} fragments in {}us",
            reference,
            doc_type,
            side,
            fragments.len(),
            start.elapsed().as_micros()
        );

        let raw = fragments.iter().map(|f| f.as_ref().to_string()).collect();
        ClassificationResult::assemble(reference, raw, doc_type, side, scores, summary)
    }

    /// Like [`process`](Self::process), but a panic inside scoring or
    /// extraction is returned as [`IdScanError::Processing`].
    pub fn try_process<S: AsRef<str>>(
        &self,
        reference: &str,
        fragments: &[S],
    ) -> Result<ClassificationResult> {
        catch_processing(reference, || self.process(reference, fragments))
    }

    /// Parse a JSON fragment list and classify it.
    pub fn process_json(&self, reference: &str, json: &str) -> Result<ClassificationResult> {
        let fragments = parse_fragments(json)?;
        self.try_process(reference, &fragments)
    }

    /// Classify many inputs. Each input is a reference plus its loaded
    /// fragments; a failed input yields a failed [`BatchItem`] and the rest
    /// are still processed.
    pub fn process_batch<I>(&self, inputs: I) -> Vec<BatchItem>
    where
        I: IntoIterator<Item = (String, Result<Vec<String>>)>,
    {
        inputs
            .into_iter()
            .map(|(reference, fragments)| {
                let result = fragments.and_then(|f| self.try_process(&reference, &f));
                if let Err(e) = &result {
                    warn!("Failed to classify {}: {}", reference, e);
                }
                BatchItem { reference, result }
            })
            .collect()
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self {
            documents: DocumentClassifier::default(),
            sides: SideClassifier::default(),
            fields: Arc::new(SummaryExtractor::new()),
        }
    }
}

/// Run `f`, turning a panic into [`IdScanError::Processing`] prefixed with
/// `reference`.
fn catch_processing<T>(reference: &str, f: impl FnOnce() -> T) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        IdScanError::Processing(format!("{reference}: {message}"))
    })
}

/// Outcome of one batch input.
#[derive(Debug)]
pub struct BatchItem {
    pub reference: String,
    pub result: Result<ClassificationResult>,
}

impl BatchItem {
    pub fn is_predicted(&self) -> bool {
        self.result.as_ref().is_ok_and(|r| r.is_predicted())
    }
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_files: usize,
    /// Classified with a known document type.
    pub predicted: usize,
    /// Classified, but no type reached the confidence floor.
    pub not_predicted: usize,
    /// Could not be classified at all.
    pub failed: usize,
}

impl BatchSummary {
    /// Tally one outcome.
    pub fn record(&mut self, result: &Result<ClassificationResult>) {
        self.total_files += 1;
        match result {
            Ok(r) if r.is_predicted() => self.predicted += 1,
            Ok(_) => self.not_predicted += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut summary = Self::default();
        for item in items {
            summary.record(&item.result);
        }
        summary
    }
}

/// Parse a JSON fragment list.
///
/// Accepts either a bare array of strings or an object carrying the array
/// under `raw_detected_text` (a previously written result). Any non-string
/// element is rejected before processing.
pub fn parse_fragments(json: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(json)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("raw_detected_text") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(IdScanError::InvalidInput(
                    "object has no raw_detected_text array".to_string(),
                ));
            }
        },
        other => {
            return Err(IdScanError::InvalidInput(format!(
                "expected an array of fragments, got {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(IdScanError::InvalidInput(format!(
                "fragment {} is {}, expected a string",
                i,
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Split plain text into fragments, one per non-blank line.
pub fn fragments_from_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Load fragments from a `.json` list or a one-fragment-per-line text file.
pub fn load_fragments(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let fragments = if is_json {
        parse_fragments(&content)?
    } else {
        fragments_from_lines(&content)
    };
    debug!("Loaded {} fragments from {}", fragments.len(), path.display());
    Ok(fragments)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
