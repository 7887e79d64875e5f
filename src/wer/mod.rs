//! Word error rate evaluation of transcription hypotheses.

mod alignment;
mod evaluator;

pub use alignment::{align, align_tokens, word_error_rate, EditCounts};
pub use evaluator::{
    AnnotationSummary, WerEvaluation, WerEvaluator, WerOptions, WerSummary, DEFAULT_HYPOTHESIS_FIELD, WER_CP_FIELD,
    WER_FIELD,
};
