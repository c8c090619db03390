//! Image generation prompts, one numbered card each

use crate::flow::{Cursor, PageFlow};
use crate::labels::Labels;
use crate::model::ImagePrompt;

use super::text_card;

pub fn render(flow: &mut PageFlow<'_>, prompts: &[ImagePrompt]) -> Cursor {
    let ctx = flow.ctx();
    for (i, prompt) in prompts.iter().enumerate() {
        let title = match prompt.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => format!("{}. {}", i + 1, title),
            None => format!("{}.", i + 1),
        };
        text_card(
            flow,
            Some(title.as_str()),
            &prompt_lines(ctx.labels, prompt),
            ctx.palette.secondary.tint(0.85),
            ctx.palette.primary,
        );
    }
    flow.cursor()
}

fn prompt_lines(labels: &Labels, prompt: &ImagePrompt) -> Vec<String> {
    let mut lines = Vec::new();
    let tagged = [(labels.usage, &prompt.usage), (labels.emotion, &prompt.emotion)];
    for (label, value) in tagged {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("**{}:** {}", label, value));
        }
    }
    let text = prompt.prompt.trim();
    lines.push(if text.is_empty() { labels.placeholder } else { text }.to_string());
    if !prompt.keywords.is_empty() {
        lines.push(format!("**{}:** {}", labels.keywords, prompt.keywords.join(", ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::test_support::with_ctx;

    #[test]
    fn test_numbered_prompt_cards() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let prompts = vec![
                ImagePrompt {
                    title: Some("Hero".into()),
                    usage: Some("Webbplats".into()),
                    emotion: None,
                    prompt: "Team i ljust kontor".into(),
                    keywords: vec!["team".into(), "ljus".into()],
                },
                ImagePrompt {
                    title: None,
                    usage: None,
                    emotion: None,
                    prompt: "Produktbild".into(),
                    keywords: Vec::new(),
                },
            ];
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &prompts);
            let page = &flow.pages()[0];
            assert!(page.contains_text("1. Hero"));
            assert!(page.texts().any(|t| t.text == "2."));
            assert!(page.contains_text("Team i ljust kontor"));
            assert!(page.contains_text("team, ljus"));
            assert!(!page.contains_text("Känsla"));
        });
    }
}
