//! Character-based token estimation
//!
//! Exact tokenization is provider specific; a per-family characters-per-token
//! ratio is close enough to compare a prompt before and after rewriting.

use crate::adapters::ModelFamily;

/// Texts shorter than this carry a share of system-template overhead
const SHORT_TEXT_CHARS: usize = 100;
const SHORT_TEXT_OVERHEAD: f64 = 1.1;
const DEFAULT_RATIO: f64 = 4.0;

/// Estimates token counts from character length
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEstimator;

impl TokenEstimator {
    /// Characters per token for a model family
    pub fn ratio(family: ModelFamily) -> f64 {
        match family {
            ModelFamily::Claude => 3.5,
            ModelFamily::Gpt => 4.0,
            ModelFamily::Gemini => 4.1,
            ModelFamily::Generic => DEFAULT_RATIO,
        }
    }

    /// Estimate the token count of `text` for `family`
    pub fn estimate(text: &str, family: ModelFamily) -> usize {
        if text.is_empty() {
            return 0;
        }

        let chars = text.chars().count();
        let mut tokens = (chars as f64 / Self::ratio(family)).ceil();

        if chars < SHORT_TEXT_CHARS {
            tokens = (tokens * SHORT_TEXT_OVERHEAD).ceil();
        }

        tokens as usize
    }
}

/// Percentage reduction from `original` to `optimized` tokens.
///
/// Negative when the rewrite grew the prompt; 0 when there was nothing to
/// measure against.
pub fn efficiency(original: usize, optimized: usize) -> i64 {
    if original == 0 {
        return 0;
    }
    let ratio = (original as f64 - optimized as f64) / original as f64;
    round_half_up(ratio * 100.0)
}

/// Round to nearest, with halves going toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
