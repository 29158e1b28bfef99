//! Guru catalogue.
//!
//! Each guru is a variant of [`GuruKind`] carrying static configuration
//! ([`GuruProfile`]). All gurus share one call path through
//! [`GuidanceClient`](crate::guidance::GuidanceClient); the backend only needs
//! the wire name.

mod prompt;

pub use prompt::{build_prompt, PromptParts};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which guru answers a question.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GuruKind {
    /// General spiritual guidance (default)
    #[default]
    Spiritual,
    Sloka,
    Meditation,
    Bhakti,
    Karma,
    Yoga,
    Bojan,
}

/// Static configuration for one guru.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuruProfile {
    /// Display name
    pub name: &'static str,
    pub specialization: &'static str,
    /// Persona prompt the question is embedded in
    pub base_prompt: &'static str,
    /// Context tag sent along with the prompt
    pub context: &'static str,
}

const ALL: [GuruKind; 7] = [
    GuruKind::Spiritual,
    GuruKind::Sloka,
    GuruKind::Meditation,
    GuruKind::Bhakti,
    GuruKind::Karma,
    GuruKind::Yoga,
    GuruKind::Bojan,
];

impl GuruKind {
    /// Every guru, in catalogue order.
    pub fn all() -> &'static [GuruKind] {
        &ALL
    }

    /// Name used on the wire (`guru_type`) and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuruKind::Spiritual => "spiritual",
            GuruKind::Sloka => "sloka",
            GuruKind::Meditation => "meditation",
            GuruKind::Bhakti => "bhakti",
            GuruKind::Karma => "karma",
            GuruKind::Yoga => "yoga",
            GuruKind::Bojan => "bojan",
        }
    }

    pub fn profile(&self) -> GuruProfile {
        match self {
            GuruKind::Spiritual => GuruProfile {
                name: "AI Spiritual Guru",
                specialization:
                    "Awakening to Sat-Chit-Ananda (Eternal Existence, Consciousness, and Bliss)",
                base_prompt: "You are the AI Spiritual Guru, helping people discover their true \
                    nature of Sat-Chit-Ananda. Help people stop the endless chasing of material \
                    desires, find inner fulfillment, and experience the difference between \
                    temporary pleasure and eternal bliss.",
                context: "spiritual-wisdom",
            },
            GuruKind::Sloka => GuruProfile {
                name: "AI Sloka Guru",
                specialization: "Universal wisdom from sacred verses",
                base_prompt: "You are the AI Sloka Guru, a Sanskrit scholar who explains ancient \
                    verses and their meanings. Offer a relevant sloka with its transliteration \
                    and meaning, then relate it to the question.",
                context: "sacred-verses",
            },
            GuruKind::Meditation => GuruProfile {
                name: "AI Meditation Guru",
                specialization: "Emotional healing and inner peace through meditation",
                base_prompt: "You are the AI Meditation Guru, a compassionate guide to inner \
                    peace and emotional healing. Guide people through mindfulness practices for \
                    inner stillness, with simple instructions and deep wisdom.",
                context: "meditation-guidance",
            },
            GuruKind::Bhakti => GuruProfile {
                name: "AI Bhakti Guru",
                specialization: "Finding eternal happiness through love",
                base_prompt: "You are the AI Bhakti Guru, helping people discover true happiness \
                    through love. Show that real joy comes from connecting with our eternal \
                    loving nature, through loving service and gratitude.",
                context: "devotional-practices",
            },
            GuruKind::Karma => GuruProfile {
                name: "AI Karma Guru",
                specialization: "Karmic wisdom and conscious action",
                base_prompt: "You are the AI Karma Guru, a master of karmic wisdom and conscious \
                    action. Help people understand karma as the science of conscious action and \
                    apply it in daily decisions.",
                context: "ethical-guidance",
            },
            GuruKind::Yoga => GuruProfile {
                name: "AI Yoga Guru",
                specialization: "Yoga science and consciousness elevation",
                base_prompt: "You are the AI Yoga Guru, a master of the sacred science of yoga. \
                    Help people use body and breath as tools for spiritual awakening.",
                context: "yogic-practices",
            },
            GuruKind::Bojan => GuruProfile {
                name: "AI Bojan Guru",
                specialization: "Transformative spiritual coaching and self-realization",
                base_prompt: "You are AI Bojan Guru, a transformative spiritual coach combining \
                    ancient wisdom with modern understanding. Your approach is direct, \
                    practical, and deeply transformative.",
                context: "spiritual-transformation",
            },
        }
    }
}

impl fmt::Display for GuruKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuruKind {
    type Err = ConfigError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL.iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownGuru(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_gurus() {
        assert_eq!("yoga".parse::<GuruKind>().unwrap(), GuruKind::Yoga);
        assert_eq!(" Bojan ".parse::<GuruKind>().unwrap(), GuruKind::Bojan);
        assert_eq!("MEDITATION".parse::<GuruKind>().unwrap(), GuruKind::Meditation);
    }

    #[test]
    fn test_parse_unknown_guru() {
        assert_eq!(
            "astrology".parse::<GuruKind>(),
            Err(ConfigError::UnknownGuru("astrology".to_string()))
        );
    }

    #[test]
    fn test_wire_name_round_trips_through_serde() {
        for kind in GuruKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<GuruKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_profiles_are_distinct() {
        let mut contexts: Vec<_> = GuruKind::all()
            .iter()
            .map(|k| k.profile().context)
            .collect();
        contexts.sort_unstable();
        contexts.dedup();
        assert_eq!(contexts.len(), GuruKind::all().len());
        assert_eq!(
            GuruKind::Meditation.profile().specialization,
            "Emotional healing and inner peace through meditation"
        );
    }

    #[test]
    fn test_default_is_spiritual() {
        assert_eq!(GuruKind::default(), GuruKind::Spiritual);
        assert_eq!(GuruKind::default().to_string(), "spiritual");
    }
}
