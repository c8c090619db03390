//! Text layout and line breaking
//!
//! This module provides:
//! - greedy word wrapping against real font metrics
//! - `**bold**` span parsing
//! - mixed-style wrapping that accumulates width across runs
//! - single-line ellipsis truncation

use crate::font_registry::{FontHandle, FontSet, FontStyle};

const ELLIPSIS: &str = "…";

/// Greedy line fill
///
/// Words wider than `max_width` are emitted on their own line unsplit.
/// Empty or whitespace-only input yields no lines.
pub fn wrap(text: &str, max_width: f64, font: &FontHandle, size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_width = font.width_of(&current, size)
            + font.width_of(" ", size)
            + font.width_of(word, size);
        if candidate_width > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A run of text in a single style
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    fn new(text: impl Into<String>, bold: bool) -> Self {
        Self { text: text.into(), bold }
    }
}

/// Split text on paired `**` markers into alternating plain and bold runs
///
/// An unmatched trailing marker is kept literally in a plain run.
pub fn parse_bold_spans(text: &str) -> Vec<Span> {
    let parts: Vec<&str> = text.split("**").collect();
    let marker_count = parts.len() - 1;
    let unmatched_tail = marker_count % 2 == 1;

    let mut spans: Vec<Span> = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let (content, bold) = if unmatched_tail && is_last {
            (format!("**{}", part), false)
        } else {
            (part.to_string(), i % 2 == 1)
        };
        if content.is_empty() {
            continue;
        }
        match spans.last_mut() {
            Some(prev) if prev.bold == bold => prev.text.push_str(&content),
            _ => spans.push(Span::new(content, bold)),
        }
    }
    spans
}

/// A styled piece of a wrapped line
#[derive(Debug, Clone, PartialEq)]
pub struct RichSegment {
    pub text: String,
    pub bold: bool,
}

/// One wrapped line of mixed-style text
#[derive(Debug, Clone, PartialEq)]
pub struct RichLine {
    pub segments: Vec<RichSegment>,
    pub width: f64,
}

impl RichLine {
    /// Text of the line without styling
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A whitespace-delimited word that may span several style runs
type Word = Vec<Span>;

fn split_words(spans: &[Span]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut current: Word = Vec::new();

    for span in spans {
        for ch in span.text.chars() {
            if ch.is_whitespace() {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                continue;
            }
            match current.last_mut() {
                Some(piece) if piece.bold == span.bold => piece.text.push(ch),
                _ => current.push(Span::new(ch.to_string(), span.bold)),
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn style_of(bold: bool) -> FontStyle {
    if bold {
        FontStyle::Bold
    } else {
        FontStyle::Regular
    }
}

fn piece_width(piece: &Span, fonts: &FontSet, size: f64) -> f64 {
    fonts.get(style_of(piece.bold)).width_of(&piece.text, size)
}

/// Wrap mixed plain/bold text, accumulating width across runs
///
/// Breaks only happen at whitespace, so a bold run glued to punctuation
/// stays on one line. The separating space takes the style of the word it
/// precedes.
pub fn wrap_rich(spans: &[Span], max_width: f64, fonts: &FontSet, size: f64) -> Vec<RichLine> {
    let mut lines = Vec::new();
    let mut segments: Vec<RichSegment> = Vec::new();
    let mut width = 0.0;

    for word in split_words(spans) {
        let word_width: f64 = word.iter().map(|p| piece_width(p, fonts, size)).sum();
        let space_width = fonts.get(style_of(word[0].bold)).width_of(" ", size);

        if !segments.is_empty() && width + space_width + word_width > max_width {
            lines.push(RichLine {
                segments: std::mem::take(&mut segments),
                width,
            });
            width = 0.0;
        }

        for (i, piece) in word.into_iter().enumerate() {
            let text = if i == 0 && !segments.is_empty() {
                width += space_width;
                format!(" {}", piece.text)
            } else {
                piece.text
            };
            match segments.last_mut() {
                Some(seg) if seg.bold == piece.bold => seg.text.push_str(&text),
                _ => segments.push(RichSegment { text, bold: piece.bold }),
            }
        }
        width += word_width;
    }

    if !segments.is_empty() {
        lines.push(RichLine { segments, width });
    }
    lines
}

/// Shorten `text` with a trailing ellipsis so it fits on one line
pub fn truncate_to_width(text: &str, max_width: f64, font: &FontHandle, size: f64) -> String {
    if font.width_of(text, size) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = font.width_of(ELLIPSIS, size);
    let mut kept = String::new();
    let mut kept_width = 0.0;
    for ch in text.chars() {
        let w = font.width_of(ch.encode_utf8(&mut [0u8; 4]), size);
        if kept_width + w + ellipsis_width > max_width {
            break;
        }
        kept.push(ch);
        kept_width += w;
    }
    let mut out = kept.trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_registry::{FontFamily, FontRegistry};

    fn fonts() -> FontSet {
        FontRegistry::new(FontFamily::Helvetica).embed_set().unwrap()
    }

    const SAMPLES: &[&str] = &[
        "Vi löser problemet med att småföretag saknar överblick över sin likviditet och \
         därför fattar beslut på magkänsla istället för data.",
        "Short.",
        "   leading   and    irregular   whitespace   everywhere   ",
        "Supercalifragilisticexpialidociousandthensomemorecharacters tail words here",
        "",
    ];

    #[test]
    fn test_wrap_width_invariant() {
        let fonts = fonts();
        for text in SAMPLES {
            for &max_width in &[60.0, 120.0, 250.0, 495.0] {
                for line in wrap(text, max_width, &fonts.regular, 11.0) {
                    let fits = fonts.regular.width_of(&line, 11.0) <= max_width;
                    let single_word = !line.contains(' ');
                    assert!(fits || single_word, "line overflows: {:?}", line);
                }
            }
        }
    }

    #[test]
    fn test_wrap_completeness() {
        let fonts = fonts();
        for text in SAMPLES {
            let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
            for &max_width in &[40.0, 150.0, 1000.0] {
                let lines = wrap(text, max_width, &fonts.bold, 14.0);
                assert_eq!(lines.join(" "), normalized);
            }
        }
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let fonts = fonts();
        let lines = wrap("a Donaudampfschifffahrtsgesellschaft b", 50.0, &fonts.regular, 12.0);
        assert_eq!(lines, vec!["a", "Donaudampfschifffahrtsgesellschaft", "b"]);
    }

    #[test]
    fn test_empty_input() {
        let fonts = fonts();
        assert!(wrap("", 100.0, &fonts.regular, 12.0).is_empty());
        assert!(wrap("   \n ", 100.0, &fonts.regular, 12.0).is_empty());
    }

    #[test]
    fn test_parse_bold_spans() {
        let spans = parse_bold_spans("Det här är **viktigt** för oss");
        assert_eq!(
            spans,
            vec![
                Span::new("Det här är ", false),
                Span::new("viktigt", true),
                Span::new(" för oss", false),
            ]
        );
    }

    #[test]
    fn test_parse_bold_unmatched_marker() {
        let spans = parse_bold_spans("a **b** c **d");
        assert_eq!(
            spans,
            vec![
                Span::new("a ", false),
                Span::new("b", true),
                Span::new(" c **d", false),
            ]
        );
        assert_eq!(parse_bold_spans("plain"), vec![Span::new("plain", false)]);
    }

    #[test]
    fn test_wrap_rich_accumulates_width() {
        let fonts = fonts();
        let text = "Fokus: **stark tillväxt** och **låg churn**, vilket ger **hög** marginal över tid";
        let spans = parse_bold_spans(text);
        for &max_width in &[80.0, 140.0, 300.0] {
            let lines = wrap_rich(&spans, max_width, &fonts, 11.0);
            for line in &lines {
                let measured: f64 = line
                    .segments
                    .iter()
                    .map(|s| fonts.get(style_of(s.bold)).width_of(&s.text, 11.0))
                    .sum();
                assert!((measured - line.width).abs() < 1e-6);
                assert!(line.width <= max_width || !line.plain_text().contains(' '));
            }
            let rebuilt: Vec<String> = lines.iter().map(|l| l.plain_text()).collect();
            assert_eq!(
                rebuilt.join(" "),
                "Fokus: stark tillväxt och låg churn, vilket ger hög marginal över tid"
            );
        }
    }

    #[test]
    fn test_wrap_rich_keeps_glued_punctuation() {
        let fonts = fonts();
        let spans = parse_bold_spans("**bold**, tail");
        let lines = wrap_rich(&spans, 1000.0, &fonts, 11.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].segments,
            vec![
                RichSegment { text: "bold".into(), bold: true },
                RichSegment { text: ", tail".into(), bold: false },
            ]
        );
    }

    #[test]
    fn test_truncate_to_width() {
        let fonts = fonts();
        let long = "Ett mycket långt cellvärde som inte får plats";
        let cut = truncate_to_width(long, 60.0, &fonts.regular, 9.0);
        assert!(cut.ends_with('…'));
        assert!(fonts.regular.width_of(&cut, 9.0) <= 60.0);
        assert_eq!(truncate_to_width("kort", 60.0, &fonts.regular, 9.0), "kort");
    }
}
