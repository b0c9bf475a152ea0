//! Turning an [`AnalysisResponse`] into something a user can read.
//!
//! [`ResultView::from_response`] does the localization, formatting and
//! ranking once; [`html`] and [`text`] only lay the view out.

pub mod html;
pub mod text;

use crate::locale::Locale;
use crate::model::AnalysisResponse;

use std::cmp::Ordering;

pub use html::{escape_html, render_error_banner, render_html};
pub use text::render_text;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub locale: Locale,
    /// Raw emotion key from the backend, used for styling hooks.
    pub emotion_key: String,
    pub emotion_label: String,
    /// Confidence as a percentage string, e.g. `87.0%`.
    pub confidence: String,
    /// Every emotion, highest probability first.
    pub bars: Vec<EmotionBar>,
    pub poem: PoemSection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionBar {
    pub key: String,
    pub label: String,
    pub probability: f64,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoemSection {
    /// First poem returned by the backend, unescaped.
    Poem(String),
    /// The backend had nothing for this emotion.
    Empty,
}

impl ResultView {
    pub fn from_response(response: &AnalysisResponse, locale: Locale) -> Self {
        let catalog = locale.catalog();

        let mut bars: Vec<EmotionBar> = response
            .all_probabilities
            .iter()
            .map(|(key, probability)| EmotionBar {
                key: key.to_owned(),
                label: catalog.emotion_label(key).to_owned(),
                probability,
                percent: format_percent(probability),
            })
            .collect();
        // stable: equal probabilities keep the backend's order
        bars.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });

        let poem = match response.poetry.first() {
            Some(poem) => PoemSection::Poem(poem.text.clone()),
            None => PoemSection::Empty,
        };

        Self {
            locale,
            emotion_key: response.emotion.clone(),
            emotion_label: catalog.emotion_label(&response.emotion).to_owned(),
            confidence: format_percent(response.confidence),
            bars,
            poem,
        }
    }
}

/// `0.87` -> `87.0%`. Exact ties (`6.25`) round away from zero, everything
/// else to the nearest tenth.
pub fn format_percent(probability: f64) -> String {
    let percent = probability * 100.0;
    // only x.25 / x.75 can sit exactly between two tenths
    let quarters = percent * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}%", (percent * 10.0).round() / 10.0);
    }
    format!("{percent:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Poem, Probabilities};

    fn response(probs: &[(&str, f64)], poetry: Vec<Poem>) -> AnalysisResponse {
        AnalysisResponse {
            emotion: probs.first().map(|(k, _)| k.to_string()).unwrap_or_default(),
            confidence: probs.first().map(|(_, p)| *p).unwrap_or_default(),
            all_probabilities: probs.iter().copied().collect::<Probabilities>(),
            poetry,
            text: None,
            poetry_count: None,
        }
    }

    #[test]
    fn test_confidence_has_one_decimal() {
        let resp = response(&[("joy", 0.87)], vec![]);
        let view = ResultView::from_response(&resp, Locale::Arabic);
        assert_eq!(view.confidence, "87.0%");
        assert_eq!(format_percent(0.12345), "12.3%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_exact_ties_round_up() {
        let cases = [
            (0.0625, "6.3%"),
            (0.8125, "81.3%"),
            (0.0125, "1.3%"),
            (0.4425, "44.3%"),
            (0.1225, "12.3%"),
            (0.0025, "0.3%"),
        ];
        for (probability, expected) in cases {
            assert_eq!(format_percent(probability), expected, "p = {probability}");
        }
        let resp = response(&[("love", 0.8125), ("joy", 0.0625)], vec![]);
        let view = ResultView::from_response(&resp, Locale::English);
        assert_eq!(view.confidence, "81.3%");
        assert_eq!(view.bars[1].percent, "6.3%");
    }

    #[test]
    fn test_bars_are_ranked_descending() {
        let resp = response(&[("sad", 0.05), ("joy", 0.87), ("love", 0.08)], vec![]);
        let view = ResultView::from_response(&resp, Locale::Arabic);
        let keys: Vec<&str> = view.bars.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["joy", "love", "sad"]);
        assert_eq!(view.bars[1].percent, "8.0%");
        assert_eq!(view.bars[0].label, "فرح");
    }

    #[test]
    fn test_ties_keep_backend_order() {
        let resp = response(&[("love", 0.25), ("sad", 0.5), ("joy", 0.25)], vec![]);
        let view = ResultView::from_response(&resp, Locale::English);
        let keys: Vec<&str> = view.bars.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["sad", "love", "joy"]);
    }

    #[test]
    fn test_unknown_emotion_label_passes_through() {
        let resp = response(&[("nostalgia", 0.7), ("joy", 0.3)], vec![]);
        let view = ResultView::from_response(&resp, Locale::Arabic);
        assert_eq!(view.emotion_label, "nostalgia");
        assert_eq!(view.bars[1].label, "فرح");
    }

    #[test]
    fn test_only_first_poem_is_used() {
        let poems = vec![
            Poem { text: "first".into() },
            Poem { text: "second".into() },
        ];
        let view = ResultView::from_response(&response(&[("joy", 1.0)], poems), Locale::Arabic);
        assert_eq!(view.poem, PoemSection::Poem("first".into()));
    }

    #[test]
    fn test_empty_poetry_gives_placeholder_section() {
        let view = ResultView::from_response(&response(&[("sad", 1.0)], vec![]), Locale::Arabic);
        assert_eq!(view.poem, PoemSection::Empty);
    }
}
