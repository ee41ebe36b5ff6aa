pub mod analyze_use_case;
pub mod ports;

pub use analyze_use_case::AnalyzeFeedbackUseCase;
pub use ports::{OutputPort, TableSource};
