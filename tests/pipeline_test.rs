use anyhow::Result;
use serde_json::{json, Value};

use reviewsense::domain::{KeywordEntry, Sentiment, Table};
use reviewsense::pipeline::processing::{
    aggregate_keywords, aggregate_keywords_par, classify, extract_keywords, normalize_text,
    normalize_value,
};
use reviewsense::pipeline::{PipelineConfig, PipelineOrchestrator};
use reviewsense::PipelineError;

#[test]
fn test_normalize_scenarios() {
    // URL, digits and punctuation go; "now" is not a stopword and stays
    assert_eq!(normalize_text("Visit http://x.com NOW!!! 123"), "visit now");
    assert_eq!(normalize_text("This is a great product"), "great product");
}

#[test]
fn test_classify_scenarios() {
    let (label, score) = classify("great product");
    assert_eq!(label, Sentiment::Positive);
    assert!(score > 0.0);

    assert_eq!(classify(""), (Sentiment::Neutral, 0.0));
}

#[test]
fn test_aggregate_scenario_with_tie_break() {
    let entries = aggregate_keywords(["good product", "good service", "bad product"]);
    assert_eq!(
        entries,
        vec![
            KeywordEntry::new("good", 2),
            KeywordEntry::new("product", 2),
            KeywordEntry::new("bad", 1),
            KeywordEntry::new("service", 1),
        ]
    );
}

#[test]
fn test_missing_feedback_column_is_named() {
    let table = Table::from_column("comment", vec![json!("great")]);
    let err = PipelineOrchestrator::default()
        .run(&PipelineConfig::full(), table)
        .unwrap_err();

    assert!(matches!(err, PipelineError::MissingColumn { ref column } if column == "feedback"));
    assert!(err.to_string().contains("'feedback'"));
}

#[test]
fn test_normalize_is_idempotent_on_clean_text() {
    let raw = [
        "Visit http://x.com NOW!!! 123",
        "This is a great product",
        "The delivery was SLOW; packaging (box #4) was damaged...",
        "www.example.com",
        "Über gut, danke!",
    ];
    for text in raw {
        let once = normalize_text(text);
        assert_eq!(normalize_text(&once), once, "{}", text);
    }
}

#[test]
fn test_totality_over_odd_inputs() {
    let inputs = [
        Value::Null,
        json!(""),
        json!("!!!...???"),
        json!(42),
        json!(-3.5),
        json!(true),
        json!(["nested", 1]),
        json!({"k": "v"}),
    ];
    for input in &inputs {
        let clean = normalize_value(input);
        let (label, score) = classify(&clean);
        assert_eq!(label, Sentiment::from_score(score));
    }
    assert_eq!(normalize_value(&Value::Null), "");
    assert_eq!(normalize_value(&json!(42)), "");
}

#[test]
fn test_full_pipeline_properties() -> Result<()> {
    let feedback = vec![
        json!("Absolutely love it, great quality!!!"),
        json!("Terrible support. Never again. http://help.example.com"),
        json!("Arrived on 12/03, box was fine"),
        Value::Null,
        json!("Not bad for the price of $20"),
        json!("very disappointing, the item2 was broken"),
    ];
    let table = Table::from_column("feedback", feedback);
    let run = PipelineOrchestrator::default().run(&PipelineConfig::full(), table)?;

    // 1:1 rows, order preserved
    assert_eq!(run.table.len(), 6);
    let raw = run.table.column("feedback")?;
    assert_eq!(raw[0], &json!("Absolutely love it, great quality!!!"));

    // Label and score agree on every row
    let labels = run.table.column("sentiment")?;
    let scores = run.table.column("confidence_score")?;
    for (label, score) in labels.iter().zip(&scores) {
        let label: Sentiment = label.as_str().unwrap_or_default().parse().map_err(anyhow::Error::msg)?;
        let score = score.as_f64().unwrap_or(f64::NAN);
        assert!((-1.0..=1.0).contains(&score));
        assert_eq!(label, Sentiment::from_score(score));
    }

    // Conservation and sort order
    let clean: Vec<String> = run
        .table
        .column("clean_feedback")?
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect();
    let tokens: usize = clean.iter().map(|t| extract_keywords(t).len()).sum();
    let keywords = run.keywords.clone().unwrap_or_default();
    let total: u64 = keywords.iter().map(|e| e.frequency).sum();
    assert_eq!(total, tokens as u64);
    assert!(keywords.windows(2).all(|w| w[0].frequency >= w[1].frequency));

    let summary = run.report.sentiment.clone().unwrap_or_default();
    assert_eq!(summary.total(), 6);
    assert!(summary.positive >= 1);
    assert!(summary.negative >= 1);
    Ok(())
}

#[test]
fn test_parallel_aggregation_equals_sequential() {
    let corpus: Vec<String> = (0..2_000)
        .map(|i| format!("word{} alpha beta {}", i % 7, ["gamma", "delta", "alpha"][i % 3]))
        .collect();
    let sequential = aggregate_keywords(corpus.iter().map(String::as_str));
    let parallel = aggregate_keywords_par(&corpus);
    assert_eq!(sequential, parallel);
    // "word3" loses its digit, so every row contributes one "word"
    assert_eq!(
        sequential.iter().find(|e| e.keyword == "word").map(|e| e.frequency),
        Some(2_000)
    );
}
