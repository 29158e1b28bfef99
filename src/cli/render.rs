//! Terminal rendering of guidance output.

use crate::gurus::GuruKind;
use crate::sse::DecodedEvent;

/// Keys probed, in order, for the text of a streamed update.
pub const TEXT_KEYS: [&str; 3] = ["content", "text", "delta"];

/// Text to print for one streamed event.
///
/// Uses the first string under [`TEXT_KEYS`]; events without one are shown
/// as compact JSON on their own line.
pub fn render_event(event: &DecodedEvent) -> String {
    match event.text_field(&TEXT_KEYS) {
        Some(text) => text.to_string(),
        None => format!("{}\n", event.payload()),
    }
}

pub fn render_catalogue() -> String {
    GuruKind::all()
        .iter()
        .map(|kind| {
            let profile = kind.profile();
            format!(
                "{:<12} {} - {}\n",
                kind.as_str(),
                profile.name,
                profile.specialization
            )
        })
        .collect()
}

pub fn usage() -> String {
    format!(
        "Usage: guru-stream [OPTIONS] <question...>\n\
         \n\
         Options:\n  \
           -g, --guru <type>  Guru to ask ({})\n      \
           --url <base>   Backend base URL (default: $GURU_API_URL or http://localhost:5000)\n      \
           --no-stream    Wait for the whole answer instead of streaming\n      \
           --prompt       Print the guru prompt for the question and exit\n      \
           --list         List available gurus\n  \
           -V, --version      Print version\n  \
           -h, --help         Print this help\n",
        GuruKind::all()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_prefers_text_keys_in_order() {
        let event = DecodedEvent::new(json!({"delta": "b", "content": "a"}));
        assert_eq!(render_event(&event), "a");

        let event = DecodedEvent::new(json!({"text": "Om "}));
        assert_eq!(render_event(&event), "Om ");
    }

    #[test]
    fn test_render_falls_back_to_json() {
        let event = DecodedEvent::new(json!({"type": "metadata", "tokens": 12}));
        let rendered = render_event(&event);
        assert!(rendered.ends_with('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(rendered.trim()).unwrap(),
            json!({"type": "metadata", "tokens": 12})
        );
    }

    #[test]
    fn test_non_string_content_falls_back_to_json() {
        let event = DecodedEvent::new(json!({"content": 5}));
        assert_eq!(render_event(&event), "{\"content\":5}\n");
    }

    #[test]
    fn test_catalogue_lists_every_guru() {
        let catalogue = render_catalogue();
        assert_eq!(catalogue.lines().count(), GuruKind::all().len());
        assert!(catalogue.contains("AI Bojan Guru"));
    }

    #[test]
    fn test_usage_mentions_gurus() {
        assert!(usage().contains("spiritual, sloka, meditation"));
    }
}
