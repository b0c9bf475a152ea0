use super::{PoemSection, ResultView};

use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Plain-text layout of a result for terminals.
pub fn render_text(view: &ResultView) -> String {
    let catalog = view.locale.catalog();
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", catalog.emotions_heading);
    let _ = writeln!(out, "{} {}", catalog.emotion_caption, view.emotion_label);
    let _ = writeln!(out, "{} {}", catalog.confidence_label, view.confidence);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", catalog.all_emotions_heading);
    let label_width = view
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    for bar in &view.bars {
        let pad = label_width - bar.label.chars().count();
        let _ = writeln!(
            out,
            "  {}{} {} {}",
            bar.label,
            " ".repeat(pad),
            meter(bar.probability),
            bar.percent
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "== {} ==", catalog.poetry_heading);
    match &view.poem {
        PoemSection::Poem(text) => {
            let _ = writeln!(out, "{}", text.trim_end());
        }
        PoemSection::Empty => {
            let _ = writeln!(out, "{}", catalog.no_poems);
        }
    }

    out
}

fn meter(probability: f64) -> String {
    let filled = (probability.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::model::{AnalysisResponse, Poem, Probabilities};

    #[test]
    fn test_meter_scales_to_width() {
        assert_eq!(meter(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(meter(1.0), "█".repeat(BAR_WIDTH));
        assert_eq!(meter(0.5).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(meter(7.0), "█".repeat(BAR_WIDTH));
    }

    #[test]
    fn test_text_layout() {
        let resp = AnalysisResponse {
            emotion: "sad".into(),
            confidence: 0.7,
            all_probabilities: [("joy", 0.1), ("sad", 0.7), ("love", 0.2)]
                .into_iter()
                .collect::<Probabilities>(),
            poetry: vec![Poem {
                text: "<b>line</b>\n".into(),
            }],
            text: None,
            poetry_count: None,
        };
        let text = render_text(&ResultView::from_response(&resp, Locale::English));
        assert!(text.contains("Emotion: Sadness"));
        assert!(text.contains("Confidence: 70.0%"));
        // terminals get the poem verbatim
        assert!(text.contains("<b>line</b>"));
        let sad = text.find("Sadness ").unwrap();
        let love = text.find("Love ").unwrap();
        let joy = text.find("Joy ").unwrap();
        assert!(sad < love && love < joy);
    }
}
