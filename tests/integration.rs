//! Integration tests: full analysis pipeline through the library API.

use tenor::analyzer::scoring::Weights;
use tenor::analyzer::AnalysisEngine;
use tenor::{analyze_transcript, EscalationNeed, Resolution, Sentiment};

const ORDER_TRANSCRIPT: &str = r#"[
    {"sender": "user", "text": "Hi, I need help with my order.", "timestamp": "2024-03-01T09:00:00Z"},
    {"sender": "agent", "text": "Sure, can you share your order ID?", "timestamp": "2024-03-01T09:00:12Z"},
    {"sender": "user", "text": "It's 12345.", "timestamp": "2024-03-01T09:00:40Z"},
    {"sender": "agent", "text": "Thanks! Your order has been shipped.", "timestamp": "2024-03-01T09:00:55Z"}
]"#;

const ESCALATED_TRANSCRIPT: &str = r#"[
    {"sender": "user", "text": "Hi, I need help with my order.", "timestamp": "2024-03-01T09:00:00Z"},
    {"sender": "agent", "text": "Sure, can you share your order ID?", "timestamp": "2024-03-01T09:00:12Z"},
    {"sender": "user", "text": "It's 12345.", "timestamp": "2024-03-01T09:00:40Z"},
    {"sender": "agent", "text": "I'm not sure, you may need to escalate this", "timestamp": "2024-03-01T09:00:55Z"}
]"#;

#[test]
fn resolved_order_conversation() {
    let report = analyze_transcript(ORDER_TRANSCRIPT, None).unwrap();

    assert_eq!(report.resolution, Resolution::Resolved);
    assert_eq!(report.escalation_need, EscalationNeed::NotNeeded);
    assert_eq!(report.fallback_frequency, 0);
    assert_eq!(report.response_time_avg, Some(13.5));
}

#[test]
fn escalated_variant_flips_flags_and_lowers_scores() {
    let good = analyze_transcript(ORDER_TRANSCRIPT, None).unwrap();
    let bad = analyze_transcript(ESCALATED_TRANSCRIPT, None).unwrap();

    assert_eq!(bad.resolution, Resolution::Unresolved);
    assert_eq!(bad.escalation_need, EscalationNeed::Needed);
    assert!(bad.fallback_frequency >= 1);
    assert!(
        bad.accuracy_score < good.accuracy_score,
        "hedged final turn should lower accuracy: {} vs {}",
        bad.accuracy_score,
        good.accuracy_score
    );
    assert!(
        bad.overall_score < good.overall_score,
        "flipped resolution and hedging should lower the overall score"
    );
}

#[test]
fn report_carries_all_metric_fields_in_range() {
    let report = analyze_transcript(ORDER_TRANSCRIPT, None).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    for field in [
        "clarity_score",
        "relevance_score",
        "accuracy_score",
        "completeness_score",
        "sentiment",
        "empathy_score",
        "response_time_avg",
        "resolution",
        "escalation_need",
        "fallback_frequency",
        "fallback_ratio",
        "overall_score",
        "conversation_id",
        "title",
        "created_at",
    ] {
        assert!(value.get(field).is_some(), "report misses field {}", field);
    }

    for field in [
        "clarity_score",
        "relevance_score",
        "accuracy_score",
        "completeness_score",
        "empathy_score",
        "overall_score",
    ] {
        let score = value[field].as_f64().unwrap();
        assert!(
            (0.0..=100.0).contains(&score),
            "{} out of range: {}",
            field,
            score
        );
    }
}

#[test]
fn legacy_wire_format_accepted() {
    let legacy = r#"[
        {"sender": "AI", "message": "Hello! How can I help?", "timestamp": "2024-03-01T09:00:00Z"},
        {"sender": "user", "message": "My invoice looks wrong.", "timestamp": "2024-03-01T09:00:10Z"},
        {"sender": "ai", "message": "I understand, let me check that invoice.", "timestamp": "2024-03-01T09:00:20Z"}
    ]"#;

    let report = analyze_transcript(legacy, None).unwrap();
    assert!(report.empathy_score > 0.0, "agent turn carries 'understand'");
    assert_eq!(report.response_time_avg, Some(10.0));
}

#[test]
fn object_form_carries_identity() {
    let transcript = r#"{
        "id": "conv-99",
        "title": "Invoice dispute",
        "messages": [
            {"sender": "user", "text": "My invoice is wrong.", "timestamp": "2024-03-01T09:00:00Z"},
            {"sender": "agent", "text": "Sorry about that, it is fixed now.", "timestamp": "2024-03-01T09:00:05Z"}
        ]
    }"#;

    let report = analyze_transcript(transcript, None).unwrap();
    assert_eq!(report.conversation_id, "conv-99");
    assert_eq!(report.title, "Invoice dispute");
    assert_eq!(report.resolution, Resolution::Resolved);
}

#[test]
fn sentiment_follows_user_mood() {
    let grateful = r#"[
        {"sender": "user", "text": "Thanks, this was excellent!", "timestamp": "2024-03-01T09:00:00Z"},
        {"sender": "agent", "text": "Happy to assist.", "timestamp": "2024-03-01T09:00:05Z"}
    ]"#;
    let report = analyze_transcript(grateful, None).unwrap();
    assert_eq!(report.sentiment, Sentiment::Positive);

    let upset = r#"[
        {"sender": "user", "text": "This is broken.", "timestamp": "2024-03-01T09:00:00Z"},
        {"sender": "user", "text": "I am frustrated and angry.", "timestamp": "2024-03-01T09:00:30Z"},
        {"sender": "agent", "text": "Let me look into it.", "timestamp": "2024-03-01T09:00:40Z"}
    ]"#;
    let report = analyze_transcript(upset, None).unwrap();
    assert_eq!(report.sentiment, Sentiment::Negative);
}

#[test]
fn weight_table_shifts_the_overall_score() {
    // An unresolved, hedge-free conversation: a resolution-heavy table must
    // score it lower than an accuracy-heavy one.
    let transcript = r#"[
        {"sender": "user", "text": "Can you update my shipping address?", "timestamp": "2024-03-01T09:00:00Z"},
        {"sender": "agent", "text": "You can change the shipping address from your account settings.", "timestamp": "2024-03-01T09:00:10Z"}
    ]"#;
    let conversation = tenor::transcript::from_json(transcript, None).unwrap();

    let resolution_heavy = AnalysisEngine::with_weights(Weights {
        clarity: 0.10,
        relevance: 0.10,
        accuracy: 0.10,
        completeness: 0.10,
        empathy: 0.10,
        resolution: 0.50,
    })
    .unwrap();
    let accuracy_heavy = AnalysisEngine::with_weights(Weights {
        clarity: 0.10,
        relevance: 0.10,
        accuracy: 0.50,
        completeness: 0.10,
        empathy: 0.10,
        resolution: 0.10,
    })
    .unwrap();

    let low = resolution_heavy.analyze(&conversation).unwrap();
    let high = accuracy_heavy.analyze(&conversation).unwrap();

    assert_eq!(low.resolution, Resolution::Unresolved);
    assert!(low.overall_score < high.overall_score);
}

#[test]
fn unbalanced_weights_rejected_at_construction() {
    let result = AnalysisEngine::with_weights(Weights {
        clarity: 0.15,
        relevance: 0.15,
        accuracy: 0.20,
        completeness: 0.20,
        empathy: 0.15,
        resolution: 0.05,
    });
    assert!(matches!(
        result,
        Err(tenor::AnalysisError::Configuration(_))
    ));
}

#[test]
fn analyze_file_with_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let transcript_path = dir.path().join("order.json");
    std::fs::write(&transcript_path, ORDER_TRANSCRIPT).unwrap();
    std::fs::write(
        dir.path().join(".tenorrc.json"),
        r#"{"threshold": 50, "lexicons": {"closing": ["shipped"]}}"#,
    )
    .unwrap();

    let config = tenor::config::load_config(dir.path(), None).unwrap();
    let report = tenor::analyze_file(&transcript_path, Some(&config)).unwrap();

    assert_eq!(report.conversation_id, "order");
    // "shipped" is the only closing phrase in the configured lexicon, and
    // the final agent turn contains it
    assert_eq!(report.resolution, Resolution::Resolved);
}
