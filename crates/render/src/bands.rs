//! Header band, score callout and footer.

use crate::layout::blocks::baseline;
use crate::layout::text::{Run, wrap};
use crate::page::DrawCommand;
use crate::typeface::{FaceKind, Typeface};
use chrono::{DateTime, NaiveDateTime, Utc};
use feedback_pdf_theme::TextStyle;
use feedback_pdf_theme::page::*;

/// Metadata shown in the header band of page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportMeta {
    pub title: String,
    pub subtitle: Option<String>,
    /// Out-of-range values are clamped to 0..=100.
    pub score: Option<i64>,
    /// ISO-8601 timestamp of the feedback run.
    pub timestamp: Option<String>,
}

impl ReportMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn clamped_score(&self) -> Option<i64> {
        self.score.map(|s| s.clamp(0, 100))
    }
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM UTC`. Unparsable input is
/// returned verbatim.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc().format("%Y-%m-%d %H:%M UTC").to_string();
    }
    log::debug!("Timestamp '{}' is not ISO-8601; showing it as given", raw);
    raw.to_string()
}

/// The page 1 header, positioned absolutely from the top margin.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBand {
    pub commands: Vec<DrawCommand>,
    pub height: f32,
}

impl HeaderBand {
    pub fn build(meta: &ReportMeta, typeface: &Typeface) -> Self {
        let mut commands = Vec::new();
        let mut y = MARGIN;

        let mut text_block = |text: &str, style: &TextStyle, y: &mut f32| {
            let runs = [Run::new(text, FaceKind::from(style.weight), style.color)];
            for line in wrap(&runs, style.size, CONTENT_WIDTH, typeface) {
                let base = baseline(*y, style);
                for fragment in line.fragments {
                    commands.push(DrawCommand::Text {
                        x: CONTENT_LEFT + fragment.x,
                        y: base,
                        text: fragment.text,
                        size: style.size,
                        face: fragment.face,
                        color: fragment.color,
                    });
                }
                *y += style.leading();
            }
        };

        text_block(&meta.title, &TITLE, &mut y);
        if let Some(subtitle) = meta.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
            text_block(subtitle, &SUBTITLE, &mut y);
        }
        if let Some(timestamp) = meta.timestamp.as_deref().filter(|s| !s.trim().is_empty()) {
            text_block(&format_timestamp(timestamp), &TIMESTAMP, &mut y);
        }

        y += 6.0;
        let rule_y = y + HEADER_RULE.width / 2.0;
        commands.push(DrawCommand::Line {
            x1: CONTENT_LEFT,
            y1: rule_y,
            x2: CONTENT_LEFT + CONTENT_WIDTH,
            y2: rule_y,
            border: HEADER_RULE,
        });
        y += HEADER_RULE.width;

        if let Some(score) = meta.clamped_score() {
            y += SCORE_GAP;
            let box_x = CONTENT_LEFT + (CONTENT_WIDTH - SCORE_BOX_WIDTH) / 2.0;
            commands.push(DrawCommand::Rect {
                x: box_x,
                y,
                width: SCORE_BOX_WIDTH,
                height: SCORE_BOX_HEIGHT,
                fill: Some(SCORE_BACKGROUND),
                stroke: Some(SCORE_BORDER),
            });
            let label = format!("{}/100", score);
            let width = typeface.measure(&label, FaceKind::Bold, SCORE_TEXT.size);
            commands.push(DrawCommand::Text {
                x: box_x + (SCORE_BOX_WIDTH - width) / 2.0,
                y: y + (SCORE_BOX_HEIGHT - SCORE_TEXT.size) / 2.0 + SCORE_TEXT.size * 0.8,
                text: label,
                size: SCORE_TEXT.size,
                face: FaceKind::Bold,
                color: SCORE_TEXT.color,
            });
            y += SCORE_BOX_HEIGHT;
        }

        y += HEADER_GAP;
        Self {
            commands,
            height: y - MARGIN,
        }
    }

    /// Where the body starts on page 1.
    pub fn body_top(&self) -> f32 {
        MARGIN + self.height
    }
}

/// Footer commands for page `number` of `total`.
pub fn footer(label: &str, number: usize, total: usize, typeface: &Typeface) -> Vec<DrawCommand> {
    let rule_y = BODY_BOTTOM + 8.0;
    let base = rule_y + FOOTER_RULE.width + FOOTER_TEXT.size + 4.0;
    let counter = format!("{}/{}", number, total);
    let counter_width = typeface.measure(&counter, FaceKind::Regular, FOOTER_TEXT.size);

    vec![
        DrawCommand::Line {
            x1: CONTENT_LEFT,
            y1: rule_y,
            x2: CONTENT_LEFT + CONTENT_WIDTH,
            y2: rule_y,
            border: FOOTER_RULE,
        },
        DrawCommand::Text {
            x: CONTENT_LEFT,
            y: base,
            text: label.to_string(),
            size: FOOTER_TEXT.size,
            face: FaceKind::Regular,
            color: FOOTER_TEXT.color,
        },
        DrawCommand::Text {
            x: CONTENT_LEFT + CONTENT_WIDTH - counter_width,
            y: base,
            text: counter,
            size: FOOTER_TEXT.size,
            face: FaceKind::Regular,
            color: FOOTER_TEXT.color,
        },
    ]
}
