//! Turns an [`AnimationConfig`] into the natural-language request sent to the model.

use crate::config::AnimationConfig;

const PREAMBLE: &str = "\
You are a senior motion designer who writes animated SVG by hand.
Produce exactly one complete, valid, self-contained SVG document for the request below.
Rules:
- Animate only with SMIL elements inside the SVG (<animate>, <animateTransform>, <animateMotion>, <set>).
- Do not use CSS animations, <style> blocks or JavaScript.
- Do not reference external files, fonts or images.
- Use viewBox=\"0 0 200 200\".
- Every animation must loop forever (repeatCount=\"indefinite\").
- Aim for a polished, professional result.";

const CLOSING: &str = "\
Respond with the raw SVG markup only. No explanations and no markdown code fences such as ```svg.";

/// Builds the generation request. Pure: identical configs give identical text.
pub fn build_prompt(config: &AnimationConfig) -> String {
    let background = if config.is_transparent {
        "Transparent. Do not draw any background fill.".to_string()
    } else {
        format!(
            "Solid color ({}). Draw it as a full-size <rect> behind everything else.",
            config.background_color
        )
    };

    format!(
        "{PREAMBLE}

Request:
- Logo name/text: \"{name}\"
- Logo shape animation: {logo}. This is the most prominent visual element.
- Text animation: {text}. Applies to the text \"{name}\".
- Background animation: {background_animation}.
- Total duration: {duration} seconds. Fit every individual animation into this loop.
- Background: {background}
- Primary color: \"{primary}\" (main logo shape and highlights)
- Secondary color: \"{secondary}\" (text and secondary elements)

{CLOSING}",
        name = config.logo_name,
        logo = config.logo_animation,
        text = config.text_animation,
        background_animation = config.background_animation,
        duration = config.duration,
        primary = config.primary_color,
        secondary = config.secondary_color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnimationDuration, Color, ConfigEdit, LogoAnimation};

    #[test]
    fn is_deterministic() {
        let config = AnimationConfig::default();
        assert_eq!(build_prompt(&config), build_prompt(&config));
    }

    #[test]
    fn quotes_name_and_colors() {
        let config = AnimationConfig::default()
            .update(ConfigEdit::LogoName("Acme \"Labs\"".into()))
            .update(ConfigEdit::PrimaryColor(Color::parse("#112233").unwrap()));
        let prompt = build_prompt(&config);

        assert!(prompt.contains("Logo name/text: \"Acme \"Labs\"\""));
        assert!(prompt.contains("Primary color: \"#112233\""));
        assert!(prompt.contains("Secondary color: \"#ffffff\""));
    }

    #[test]
    fn mentions_exactly_one_logo_animation() {
        for animation in LogoAnimation::ALL {
            let config = AnimationConfig::default().update(ConfigEdit::LogoAnimation(*animation));
            let prompt = build_prompt(&config);
            let mentioned = LogoAnimation::ALL
                .iter()
                .filter(|candidate| {
                    prompt.contains(&format!("Logo shape animation: {}.", candidate))
                })
                .count();
            assert_eq!(mentioned, 1);
            assert!(prompt.contains(animation.as_str()));
        }
    }

    #[test]
    fn renders_duration_verbatim() {
        let config = AnimationConfig::default()
            .update(ConfigEdit::Duration(AnimationDuration::new(3.0).unwrap()));
        assert!(build_prompt(&config).contains("Total duration: 3 seconds"));

        let config = AnimationConfig::default();
        assert!(build_prompt(&config).contains("Total duration: 2.5 seconds"));
    }

    #[test]
    fn background_depends_on_transparency() {
        let transparent = build_prompt(&AnimationConfig::default());
        assert!(transparent.contains("Background: Transparent"));
        assert!(!transparent.contains("#111827"));

        let solid = build_prompt(&AnimationConfig::default().update(ConfigEdit::Transparent(false)));
        assert!(solid.contains("Background: Solid color (#111827)"));
        assert!(solid.contains("<rect>"));
        assert!(!solid.contains("Background: Transparent"));
    }

    #[test]
    fn keeps_technical_constraints() {
        let prompt = build_prompt(&AnimationConfig::default());
        assert!(prompt.contains("SMIL"));
        assert!(prompt.contains("viewBox=\"0 0 200 200\""));
        assert!(prompt.contains("indefinite"));
        assert!(prompt.ends_with("such as ```svg."));
    }
}
