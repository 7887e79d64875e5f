/// A single string-to-string step of the normalization pipeline.
pub trait TextStage: Send + Sync {
    /// Transform one field value
    fn apply(&self, text: &str) -> String;

    /// Get the name of this stage for logging
    fn name(&self) -> &'static str;
}
