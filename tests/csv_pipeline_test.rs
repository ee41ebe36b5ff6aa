use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use reviewsense::app::{AnalyzeFeedbackUseCase, TableSource};
use reviewsense::domain::Sentiment;
use reviewsense::infra::{CsvTableSource, FileOutputAdapter};
use reviewsense::pipeline::{PipelineConfig, RunReport};
use reviewsense::PipelineError;

const INPUT: &str = "\
id,feedback
1,This is a great product
2,\"Terrible, slow delivery!!! see www.example.com/track\"
3,
4,Good service and good product
";

#[test]
fn test_full_run_writes_all_artifacts() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("feedback.csv");
    fs::write(&input, INPUT)?;
    let out_dir = temp_dir.path().join("out");

    let use_case =
        AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&out_dir)));
    let run = use_case.execute(&CsvTableSource::new(&input), &PipelineConfig::full())?;
    assert_eq!(run.report.records, 4);

    let results = fs::read_to_string(out_dir.join("sentiment_results.csv"))?;
    let mut lines = results.lines();
    assert_eq!(
        lines.next(),
        Some("id,feedback,clean_feedback,sentiment,confidence_score")
    );
    assert!(lines.next().unwrap_or_default().starts_with("1,This is a great product,great product,positive,"));
    assert_eq!(results.lines().count(), 5);
    assert!(!out_dir.join("clean_feedback.csv").exists());

    let keywords = fs::read_to_string(out_dir.join("keyword_insights.csv"))?;
    let mut lines = keywords.lines();
    assert_eq!(lines.next(), Some("keyword,frequency"));
    assert_eq!(lines.next(), Some("good,2"));
    assert_eq!(lines.next(), Some("product,2"));

    let report: RunReport = serde_json::from_str(&fs::read_to_string(out_dir.join("run_report.json"))?)?;
    assert_eq!(report.run_id, run.report.run_id);
    assert_eq!(report.pipeline, "full");
    assert_eq!(report.step_results.len(), 3);
    Ok(())
}

#[test]
fn test_stages_chain_through_files() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("feedback.csv");
    fs::write(&input, INPUT)?;

    let normalize_dir = temp_dir.path().join("m1");
    AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&normalize_dir)))
        .execute(&CsvTableSource::new(&input), &PipelineConfig::normalize_only())?;
    let cleaned = normalize_dir.join("clean_feedback.csv");
    assert!(cleaned.exists());
    assert!(!normalize_dir.join("keyword_insights.csv").exists());

    let classify_dir = temp_dir.path().join("m2");
    AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&classify_dir)))
        .execute(&CsvTableSource::new(&cleaned), &PipelineConfig::sentiment_only())?;
    let classified = classify_dir.join("sentiment_results.csv");

    let keyword_dir = temp_dir.path().join("m3");
    let run = AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&keyword_dir)))
        .execute(&CsvTableSource::new(&classified), &PipelineConfig::keywords_only())?;

    // Chained runs match a single full run
    let full_dir = temp_dir.path().join("full");
    let full = AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&full_dir)))
        .execute(&CsvTableSource::new(&input), &PipelineConfig::full())?;
    assert_eq!(run.keywords, full.keywords);
    assert_eq!(
        fs::read_to_string(classified)?,
        fs::read_to_string(full_dir.join("sentiment_results.csv"))?
    );
    Ok(())
}

#[test]
fn test_rerun_on_own_output_is_skipped() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("feedback.csv");
    fs::write(&input, INPUT)?;
    let out_dir = temp_dir.path().join("out");

    let use_case =
        AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&out_dir)));
    use_case.execute(&CsvTableSource::new(&input), &PipelineConfig::full())?;
    let first = fs::read_to_string(out_dir.join("sentiment_results.csv"))?;

    let rerun_dir = temp_dir.path().join("rerun");
    let rerun = AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&rerun_dir)))
        .execute(
            &CsvTableSource::new(out_dir.join("sentiment_results.csv")),
            &PipelineConfig::full(),
        )?;

    assert!(rerun.report.step("normalize").map(|s| s.result.skipped).unwrap_or(false));
    assert!(rerun.report.step("sentiment").map(|s| s.result.skipped).unwrap_or(false));
    assert_eq!(fs::read_to_string(rerun_dir.join("sentiment_results.csv"))?, first);
    Ok(())
}

#[test]
fn test_missing_column_produces_no_output() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("reviews.csv");
    fs::write(&input, "id,review\n1,great\n")?;
    let out_dir = temp_dir.path().join("out");

    let source = CsvTableSource::new(&input);
    assert_eq!(source.load()?.len(), 1);

    let use_case =
        AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&out_dir)));
    let err = use_case
        .execute(&source, &PipelineConfig::full())
        .expect_err("feedback column is required");

    assert!(matches!(err, PipelineError::MissingColumn { ref column } if column == "feedback"));
    assert!(!out_dir.exists());
    Ok(())
}

#[test]
fn test_classified_file_reads_back_as_feedback_records() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("feedback.csv");
    fs::write(&input, INPUT)?;
    let out_dir = temp_dir.path().join("out");

    AnalyzeFeedbackUseCase::with_default_orchestrator(Box::new(FileOutputAdapter::new(&out_dir)))
        .execute(&CsvTableSource::new(&input), &PipelineConfig::full())?;

    let table = CsvTableSource::new(out_dir.join("sentiment_results.csv")).load()?;
    let records = table.feedback_records()?;
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].clean_feedback.as_deref(), Some("great product"));
    assert_eq!(records[0].sentiment, Some(Sentiment::Positive));
    assert!(records[0].confidence_score.is_some_and(|score| score > 0.0));
    // The empty input cell stays empty through every stage
    assert_eq!(records[2].clean_feedback.as_deref(), Some(""));
    assert_eq!(records[2].sentiment, Some(Sentiment::Neutral));
    assert_eq!(records[2].confidence_score, Some(0.0));
    Ok(())
}
