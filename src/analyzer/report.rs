//! Report assembly - the completeness gate at the end of a run

use crate::{
    AnalysisError, AnalysisReport, Conversation, EscalationNeed, MetricName, MetricValue,
    Resolution, Sentiment,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// Pack the ten scorer slots plus the aggregate into the immutable report.
/// Every slot must be present with its declared shape; anything else is an
/// engine defect surfaced as `IncompleteAnalysis`, never a partial report.
pub fn assemble(
    conversation: &Conversation,
    slots: &BTreeMap<MetricName, MetricValue>,
    overall_score: f64,
) -> Result<AnalysisReport, AnalysisError> {
    let sentiment = Sentiment::from_label(category(slots, MetricName::Sentiment)?)
        .ok_or_else(|| unknown_label(MetricName::Sentiment))?;
    let resolution = Resolution::from_label(category(slots, MetricName::Resolution)?)
        .ok_or_else(|| unknown_label(MetricName::Resolution))?;
    let escalation_need = EscalationNeed::from_label(category(slots, MetricName::EscalationNeed)?)
        .ok_or_else(|| unknown_label(MetricName::EscalationNeed))?;

    let response_time_avg = match get(slots, MetricName::ResponseTime)? {
        MetricValue::Numeric(value) => Some(*value),
        MetricValue::Unmeasured => None,
        other => return Err(wrong_shape(MetricName::ResponseTime, other, "numeric or unmeasured")),
    };

    let (fallback_frequency, fallback_ratio) = match get(slots, MetricName::FallbackFrequency)? {
        MetricValue::Frequency { count, ratio } => (*count, *ratio),
        other => return Err(wrong_shape(MetricName::FallbackFrequency, other, "frequency")),
    };

    Ok(AnalysisReport {
        conversation_id: conversation.id.clone(),
        title: conversation.title.clone(),
        clarity_score: numeric(slots, MetricName::Clarity)?,
        relevance_score: numeric(slots, MetricName::Relevance)?,
        accuracy_score: numeric(slots, MetricName::Accuracy)?,
        completeness_score: numeric(slots, MetricName::Completeness)?,
        sentiment,
        empathy_score: numeric(slots, MetricName::Empathy)?,
        response_time_avg,
        resolution,
        escalation_need,
        fallback_frequency,
        fallback_ratio,
        overall_score,
        created_at: Utc::now(),
    })
}

fn get(
    slots: &BTreeMap<MetricName, MetricValue>,
    name: MetricName,
) -> Result<&MetricValue, AnalysisError> {
    slots
        .get(&name)
        .ok_or_else(|| AnalysisError::IncompleteAnalysis(format!("slot '{}' was never filled", name)))
}

fn numeric(
    slots: &BTreeMap<MetricName, MetricValue>,
    name: MetricName,
) -> Result<f64, AnalysisError> {
    match get(slots, name)? {
        MetricValue::Numeric(value) => Ok(*value),
        other => Err(wrong_shape(name, other, "numeric")),
    }
}

fn category(
    slots: &BTreeMap<MetricName, MetricValue>,
    name: MetricName,
) -> Result<&'static str, AnalysisError> {
    match get(slots, name)? {
        MetricValue::Category(label) => Ok(label),
        other => Err(wrong_shape(name, other, "category")),
    }
}

fn wrong_shape(name: MetricName, got: &MetricValue, expected: &str) -> AnalysisError {
    AnalysisError::IncompleteAnalysis(format!(
        "slot '{}' holds a {} value, expected {}",
        name,
        got.kind(),
        expected
    ))
}

fn unknown_label(name: MetricName) -> AnalysisError {
    AnalysisError::IncompleteAnalysis(format!("slot '{}' holds an unknown label", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, Sender};
    use chrono::TimeZone;

    fn conversation() -> Conversation {
        Conversation::new(
            "conv-7",
            "Order inquiry",
            vec![Message::new(
                Sender::User,
                "Where is my order?",
                chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            )],
        )
    }

    fn full_slots() -> BTreeMap<MetricName, MetricValue> {
        let mut slots = BTreeMap::new();
        slots.insert(MetricName::Clarity, MetricValue::Numeric(90.0));
        slots.insert(MetricName::Relevance, MetricValue::Numeric(40.0));
        slots.insert(MetricName::Accuracy, MetricValue::Numeric(100.0));
        slots.insert(MetricName::Completeness, MetricValue::Numeric(100.0));
        slots.insert(MetricName::Sentiment, MetricValue::Category("positive"));
        slots.insert(MetricName::Empathy, MetricValue::Numeric(50.0));
        slots.insert(MetricName::ResponseTime, MetricValue::Numeric(12.5));
        slots.insert(MetricName::Resolution, MetricValue::Category("resolved"));
        slots.insert(
            MetricName::EscalationNeed,
            MetricValue::Category("not-needed"),
        );
        slots.insert(
            MetricName::FallbackFrequency,
            MetricValue::Frequency {
                count: 1,
                ratio: 0.5,
            },
        );
        slots
    }

    #[test]
    fn test_assembles_complete_report() {
        let report = assemble(&conversation(), &full_slots(), 84.0).unwrap();
        assert_eq!(report.conversation_id, "conv-7");
        assert_eq!(report.title, "Order inquiry");
        assert_eq!(report.clarity_score, 90.0);
        assert_eq!(report.sentiment, crate::Sentiment::Positive);
        assert_eq!(report.response_time_avg, Some(12.5));
        assert_eq!(report.resolution, crate::Resolution::Resolved);
        assert_eq!(report.escalation_need, crate::EscalationNeed::NotNeeded);
        assert_eq!(report.fallback_frequency, 1);
        assert_eq!(report.fallback_ratio, 0.5);
        assert_eq!(report.overall_score, 84.0);
    }

    #[test]
    fn test_unmeasured_response_time_becomes_none() {
        let mut slots = full_slots();
        slots.insert(MetricName::ResponseTime, MetricValue::Unmeasured);
        let report = assemble(&conversation(), &slots, 84.0).unwrap();
        assert_eq!(report.response_time_avg, None);
    }

    #[test]
    fn test_missing_slot_rejected() {
        let mut slots = full_slots();
        slots.remove(&MetricName::Sentiment);
        let result = assemble(&conversation(), &slots, 84.0);
        assert!(matches!(result, Err(AnalysisError::IncompleteAnalysis(_))));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let mut slots = full_slots();
        slots.insert(MetricName::FallbackFrequency, MetricValue::Numeric(1.0));
        let result = assemble(&conversation(), &slots, 84.0);
        assert!(matches!(result, Err(AnalysisError::IncompleteAnalysis(_))));
    }

    #[test]
    fn test_unknown_category_label_rejected() {
        let mut slots = full_slots();
        slots.insert(MetricName::Sentiment, MetricValue::Category("ecstatic"));
        let result = assemble(&conversation(), &slots, 84.0);
        assert!(matches!(result, Err(AnalysisError::IncompleteAnalysis(_))));
    }
}
