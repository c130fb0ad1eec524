//! Overall score aggregation - the join point of the scorer fan-out

use crate::{AnalysisError, MetricName, MetricValue, Resolution};
use serde::Deserialize;
use std::collections::BTreeMap;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative weight of each overall-score input. The table is tunable policy
/// exposed through the config file; the structural requirement is only that
/// the weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub clarity: f64,
    pub relevance: f64,
    pub accuracy: f64,
    pub completeness: f64,
    pub empathy: f64,
    pub resolution: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            clarity: 0.15,
            relevance: 0.15,
            accuracy: 0.20,
            completeness: 0.20,
            empathy: 0.15,
            resolution: 0.15,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.clarity
            + self.relevance
            + self.accuracy
            + self.completeness
            + self.empathy
            + self.resolution
    }

    /// Check the construction-time invariants. A bad table is a
    /// configuration error before any conversation is analyzed.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let entries = [
            ("clarity", self.clarity),
            ("relevance", self.relevance),
            ("accuracy", self.accuracy),
            ("completeness", self.completeness),
            ("empathy", self.empathy),
            ("resolution", self.resolution),
        ];
        for (name, value) in entries {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::Configuration(format!(
                    "weight '{}' must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AnalysisError::Configuration(format!(
                "weights must sum to 1.0, got {:.6}",
                sum
            )));
        }
        Ok(())
    }
}

/// Combines six scorer outputs into the weighted overall score. Resolution
/// contributes as full score or zero; sentiment and fallback stay standalone
/// report fields and never feed the aggregate.
pub struct Aggregator {
    weights: Weights,
}

impl Aggregator {
    /// Aggregator with the default weight table (known valid).
    pub fn new() -> Self {
        Self {
            weights: Weights::default(),
        }
    }

    /// Aggregator with a custom weight table, validated up front.
    pub fn with_weights(weights: Weights) -> Result<Self, AnalysisError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Compute the overall score from the filled scorer slots. A missing or
    /// wrong-shape input slot is an engine defect, not a scoring outcome.
    pub fn overall_score(
        &self,
        slots: &BTreeMap<MetricName, MetricValue>,
    ) -> Result<f64, AnalysisError> {
        let clarity = numeric_slot(slots, MetricName::Clarity)?;
        let relevance = numeric_slot(slots, MetricName::Relevance)?;
        let accuracy = numeric_slot(slots, MetricName::Accuracy)?;
        let completeness = numeric_slot(slots, MetricName::Completeness)?;
        let empathy = numeric_slot(slots, MetricName::Empathy)?;
        let resolution = if category_slot(slots, MetricName::Resolution)?
            == Resolution::Resolved.label()
        {
            100.0
        } else {
            0.0
        };

        let w = &self.weights;
        let total = w.clarity * clarity
            + w.relevance * relevance
            + w.accuracy * accuracy
            + w.completeness * completeness
            + w.empathy * empathy
            + w.resolution * resolution;
        Ok(total.clamp(0.0, 100.0))
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn numeric_slot(
    slots: &BTreeMap<MetricName, MetricValue>,
    name: MetricName,
) -> Result<f64, AnalysisError> {
    match slots.get(&name) {
        Some(MetricValue::Numeric(value)) => Ok(*value),
        Some(other) => Err(AnalysisError::IncompleteAnalysis(format!(
            "slot '{}' holds a {} value, expected numeric",
            name,
            other.kind()
        ))),
        None => Err(AnalysisError::IncompleteAnalysis(format!(
            "slot '{}' was never filled",
            name
        ))),
    }
}

fn category_slot(
    slots: &BTreeMap<MetricName, MetricValue>,
    name: MetricName,
) -> Result<&'static str, AnalysisError> {
    match slots.get(&name) {
        Some(MetricValue::Category(label)) => Ok(label),
        Some(other) => Err(AnalysisError::IncompleteAnalysis(format!(
            "slot '{}' holds a {} value, expected category",
            name,
            other.kind()
        ))),
        None => Err(AnalysisError::IncompleteAnalysis(format!(
            "slot '{}' was never filled",
            name
        ))),
    }
}
