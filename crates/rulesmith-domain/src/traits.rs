//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction pipeline and
//! its collaborators. Implementations live in other crates.

/// Trait for the external text-generation service
///
/// Implemented by the infrastructure layer (rulesmith-llm). Calls are
/// synchronous: the pipeline waits for each response before sending the next
/// request.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send a single user-role prompt and return the raw response text
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model answering requests, for run metadata
    fn model_name(&self) -> &str {
        "llm"
    }
}

/// Trait for receiving coarse pipeline progress
///
/// Called with a percentage in `0..=100` and a short status label after each
/// pipeline stage. Rendering is entirely up to the implementor.
///
/// Any `FnMut(u8, &str)` closure is an observer:
///
/// ```
/// use rulesmith_domain::ProgressObserver;
///
/// let mut seen = Vec::new();
/// let mut observer = |percent: u8, label: &str| seen.push((percent, label.to_string()));
/// observer.on_progress(20, "Cleaning text");
/// assert_eq!(seen, vec![(20, "Cleaning text".to_string())]);
/// ```
pub trait ProgressObserver {
    /// Report that the pipeline reached `percent` while doing `label`
    fn on_progress(&mut self, percent: u8, label: &str);
}

impl<F> ProgressObserver for F
where
    F: FnMut(u8, &str),
{
    fn on_progress(&mut self, percent: u8, label: &str) {
        self(percent, label)
    }
}

/// Observer that discards all progress reports
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&mut self, _percent: u8, _label: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording(Vec<u8>);

    impl ProgressObserver for Recording {
        fn on_progress(&mut self, percent: u8, _label: &str) {
            self.0.push(percent);
        }
    }

    #[test]
    fn test_struct_observer() {
        let mut obs = Recording(Vec::new());
        obs.on_progress(40, "Chunking document");
        obs.on_progress(100, "Done");
        assert_eq!(obs.0, vec![40, 100]);
    }

    #[test]
    fn test_noop_observer() {
        let mut obs = NoopObserver;
        obs.on_progress(50, "ignored");
    }

    struct Echo;

    impl LlmProvider for Echo {
        type Error = ();

        fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
            Ok(prompt.to_string())
        }
    }

    #[test]
    fn test_default_model_name() {
        assert_eq!(Echo.model_name(), "llm");
        assert_eq!(Echo.generate("hi").unwrap(), "hi");
    }
}
