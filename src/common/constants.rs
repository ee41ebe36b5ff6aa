/// Column names shared by every stage and by the file adapters.
/// Stages read and write tables only through these names.

// Ingested raw text (Normalizer input)
pub const FEEDBACK_COLUMN: &str = "feedback";

// Normalizer output, consumed by the classifier and the aggregator
pub const CLEAN_FEEDBACK_COLUMN: &str = "clean_feedback";

// Classifier output
pub const SENTIMENT_COLUMN: &str = "sentiment";
pub const CONFIDENCE_SCORE_COLUMN: &str = "confidence_score";

// Aggregator output (a separate table)
pub const KEYWORD_COLUMN: &str = "keyword";
pub const FREQUENCY_COLUMN: &str = "frequency";

// Step names, used for dependency checks and step results
pub const NORMALIZE_STEP: &str = "normalize";
pub const SENTIMENT_STEP: &str = "sentiment";
pub const KEYWORDS_STEP: &str = "keywords";

// Default artifact file names written by the file output adapter
pub const CLEAN_FEEDBACK_FILE: &str = "clean_feedback.csv";
pub const SENTIMENT_RESULTS_FILE: &str = "sentiment_results.csv";
pub const KEYWORD_INSIGHTS_FILE: &str = "keyword_insights.csv";
pub const RUN_REPORT_FILE: &str = "run_report.json";
