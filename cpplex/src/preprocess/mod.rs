//! Length-preserving source preprocessing
//!
//! The pipeline turns the original text into a scanning view of exactly the
//! same length, so any offset found while scanning the view is also a valid
//! offset into the original. Steps run in a fixed order: byte-order mark,
//! line splicing, then comments.

pub mod steps;

use crate::config::PreprocessPreferences;
use crate::log_debug;

pub use steps::{BlankComments, SpliceLines, StripBom};

/// One in-place transform over the scanning view
pub trait PreprocessStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite `text` in place; taking a slice keeps the length fixed
    fn apply(&self, text: &mut [char]);
}

/// Ordered list of steps
pub struct Preprocessor {
    steps: Vec<Box<dyn PreprocessStep>>,
}

impl Preprocessor {
    /// Build the pipeline the preferences enable
    pub fn from_preferences(preferences: &PreprocessPreferences) -> Self {
        let mut steps: Vec<Box<dyn PreprocessStep>> = Vec::new();
        if preferences.strip_bom {
            steps.push(Box::new(StripBom));
        }
        if preferences.splice_lines {
            steps.push(Box::new(SpliceLines));
        }
        if preferences.strip_comments {
            steps.push(Box::new(BlankComments));
        }
        Self { steps }
    }

    /// All three steps, regardless of environment
    pub fn standard() -> Self {
        Self::from_preferences(&PreprocessPreferences {
            strip_bom: true,
            splice_lines: true,
            strip_comments: true,
        })
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Produce the scanning view of `original`
    pub fn run(&self, original: &[char]) -> Vec<char> {
        let mut view = original.to_vec();
        for step in &self.steps {
            step.apply(&mut view);
        }
        debug_assert_eq!(view.len(), original.len());

        log_debug!("Preprocessing complete",
            "steps" => self.step_names().join(","),
            "chars" => view.len()
        );
        view
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preprocessor")
            .field("steps", &self.step_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(preprocessor: &Preprocessor, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        preprocessor.run(&chars).into_iter().collect()
    }

    #[test]
    fn test_standard_order() {
        let preprocessor = Preprocessor::standard();
        assert_eq!(
            preprocessor.step_names(),
            vec!["strip-bom", "splice-lines", "blank-comments"]
        );
    }

    #[test]
    fn test_splice_before_comments() {
        // A spliced line comment continues onto the next physical line.
        let preprocessor = Preprocessor::standard();
        assert_eq!(view(&preprocessor, "// a\\\nb\nc"), "       \nc");
    }

    #[test]
    fn test_length_preserved() {
        let preprocessor = Preprocessor::standard();
        let inputs = [
            "",
            "\u{FEFF}int main() { return 0; }",
            "/* ünïcödé */ x",
            "a // é\r\nb",
            "\"unterminated /* \n */",
            "x\\\r\ny\\",
        ];
        for input in inputs {
            let chars: Vec<char> = input.chars().collect();
            assert_eq!(preprocessor.run(&chars).len(), chars.len(), "{:?}", input);
        }
    }

    #[test]
    fn test_disabled_steps() {
        let preprocessor = Preprocessor::from_preferences(&PreprocessPreferences {
            strip_bom: false,
            splice_lines: true,
            strip_comments: false,
        });
        assert_eq!(preprocessor.step_names(), vec!["splice-lines"]);
        assert_eq!(view(&preprocessor, "\u{FEFF}// x"), "\u{FEFF}// x");
    }
}
