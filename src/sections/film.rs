//! Pitch film script: title line and one card per scene

use crate::flow::{Cursor, PageFlow};
use crate::font_registry::FontStyle;
use crate::labels::Labels;
use crate::model::{FilmScene, FilmScript};
use crate::style::{BODY_SIZE, SUBHEADING_SIZE};

use super::text_card;

pub fn render(flow: &mut PageFlow<'_>, script: &FilmScript) -> Cursor {
    let ctx = flow.ctx();
    let labels = ctx.labels;
    let (x, width) = (flow.left(), flow.width());

    if let Some(title) = script.title.as_deref().filter(|t| !t.trim().is_empty()) {
        flow.paragraph(title, x, width, SUBHEADING_SIZE, FontStyle::Bold, ctx.palette.primary);
    }
    if let Some(duration) = script.duration.as_deref().filter(|d| !d.trim().is_empty()) {
        let line = format!("{}: {}", labels.duration, duration.trim());
        flow.paragraph(&line, x, width, BODY_SIZE, FontStyle::Oblique, ctx.palette.medium_gray);
    }
    flow.advance(8.0);

    for (i, scene) in script.scenes.iter().enumerate() {
        let title = scene_title(labels, i + 1, scene);
        text_card(
            flow,
            Some(title.as_str()),
            &scene_lines(labels, scene),
            ctx.palette.light_gray,
            ctx.palette.primary,
        );
    }
    flow.cursor()
}

/// "Scen 2: Problemet (0:15-0:30)"
fn scene_title(labels: &Labels, number: usize, scene: &FilmScene) -> String {
    let mut title = format!("{} {}", labels.scene, number);
    if let Some(name) = scene.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        title.push_str(": ");
        title.push_str(name);
    }
    if let Some(duration) = scene.duration.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        title.push_str(&format!(" ({})", duration));
    }
    title
}

fn scene_lines(labels: &Labels, scene: &FilmScene) -> Vec<String> {
    [
        (labels.visual, &scene.visual),
        (labels.voice_over, &scene.voice_over),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| format!("**{}:** {}", label, v))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locale;
    use crate::sections::test_support::with_ctx;

    fn scene() -> FilmScene {
        FilmScene {
            title: Some("Problemet".into()),
            duration: Some("0:15-0:30".into()),
            visual: Some("Kontor i kaos".into()),
            voice_over: None,
        }
    }

    #[test]
    fn test_scene_title_and_lines() {
        let labels = Labels::for_locale(Locale::Sv);
        assert_eq!(scene_title(labels, 2, &scene()), "Scen 2: Problemet (0:15-0:30)");
        assert_eq!(scene_lines(labels, &scene()), vec!["**Bild:** Kontor i kaos"]);
    }

    #[test]
    fn test_script_renders_scenes() {
        with_ctx(r#"{"score": 70}"#, |ctx| {
            let script = FilmScript {
                title: Some("Vår resa".into()),
                duration: Some("90 sekunder".into()),
                scenes: vec![scene(), scene()],
            };
            let mut flow = PageFlow::new(ctx);
            flow.new_page();
            render(&mut flow, &script);
            let page = &flow.pages()[0];
            assert!(page.contains_text("Vår resa"));
            assert!(page.contains_text("Längd: 90 sekunder"));
            assert!(page.contains_text("Scen 1: Problemet"));
            assert!(page.contains_text("Scen 2: Problemet"));
            assert!(page.contains_text("Kontor i kaos"));
        });
    }
}
