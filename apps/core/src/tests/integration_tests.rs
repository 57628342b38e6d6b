//! Integration Tests
//!
//! End-to-end conversations through `bootstrap` with the offline backend.

use crate::brain::{Intent, CRISIS_MESSAGE};
use crate::chat::{markdown, Command, Session};
use crate::config::{AppConfig, SentimentBackend};
use crate::error::AppError;
use crate::sentiment::SentimentLabel;
use crate::{bootstrap, DefaultRouter};

// ============================================================================
// Test Fixtures
// ============================================================================

fn seeded_router() -> DefaultRouter {
    let config = AppConfig {
        seed: Some(1234),
        ..AppConfig::default()
    };
    bootstrap(&config).expect("default configuration must bootstrap")
}

// ============================================================================
// Conversation Flow
// ============================================================================

#[cfg(test)]
mod conversation_tests {
    use super::*;

    #[test]
    fn test_full_conversation() {
        let mut router = seeded_router();
        let mut session = Session::new();

        let reply = router.respond(&mut session, "Hello");
        assert_eq!(reply.intent, Intent::Greeting);
        assert_eq!(reply.display_text, "[NEUTRAL] Hi there! How can I support you today?");

        let reply = router.respond(&mut session, "I feel stressed");
        assert_eq!(reply.intent, Intent::Stress);
        assert_eq!(
            reply.display_text,
            "[NEGATIVE] Stress is tough. Let\u{2019}s take a deep breath together."
        );
        assert_eq!(reply.recommendations.len(), 2);
        assert_eq!(reply.recommendations[0].title, "5-Minute Meditation");

        let reply = router.respond(&mut session, "I'm sad");
        assert_eq!(reply.intent, Intent::Sadness);
        assert_eq!(
            reply.display_text,
            "[NEGATIVE] I\u{2019}m sorry you feel this way. Want to talk more about it?"
        );

        let reply = router.respond(&mut session, "I want to give up");
        assert_eq!(reply.intent, Intent::Crisis);
        assert_eq!(reply.display_text, CRISIS_MESSAGE);

        let reply = router.respond(&mut session, "purple elephant shoes");
        assert_eq!(reply.intent, Intent::Default);
        assert_eq!(reply.display_text, "[NEUTRAL] Tell me more, I'm listening.");

        assert_eq!(session.len(), 5);
        let intents: Vec<Intent> = session.log().iter().map(|r| r.intent).collect();
        assert_eq!(
            intents,
            vec![
                Intent::Greeting,
                Intent::Stress,
                Intent::Sadness,
                Intent::Crisis,
                Intent::Default
            ]
        );
        assert_eq!(session.log()[1].sentiment_label, Some(SentimentLabel::Negative));
        assert!(session.log()[3].sentiment_label.is_none());
    }

    #[test]
    fn test_positive_greeting() {
        let mut router = seeded_router();
        let mut session = Session::new();
        let reply = router.respond(&mut session, "Good morning");
        assert_eq!(reply.display_text, "[POSITIVE] Hi there! How can I support you today?");
    }

    #[test]
    fn test_custom_threshold_from_config() {
        let config = AppConfig {
            confidence_threshold: 0.6,
            seed: Some(1),
            ..AppConfig::default()
        };
        let mut router = bootstrap(&config).unwrap();
        let mut session = Session::new();
        // Greeting confidence on the built-in corpus is about 0.53
        assert_eq!(router.respond(&mut session, "Hello").intent, Intent::Default);
    }

    #[test]
    fn test_slash_prefixed_message_is_routed() {
        let mut router = seeded_router();
        let mut session = Session::new();

        let line = "/ i want to give up";
        assert!(Command::parse(line).is_none());
        let reply = router.respond(&mut session, line);
        assert_eq!(reply.intent, Intent::Crisis);
        assert_eq!(reply.display_text, CRISIS_MESSAGE);
        assert_eq!(session.len(), 1);

        assert_eq!(Command::parse("/history"), Some(Command::History));
    }

    #[test]
    fn test_bootstrap_rejects_bad_config() {
        let config = AppConfig {
            sentiment_backend: SentimentBackend::Http,
            ..AppConfig::default()
        };
        assert!(matches!(bootstrap(&config), Err(AppError::Config(_))));
    }
}

// ============================================================================
// Session Views
// ============================================================================

#[cfg(test)]
mod view_tests {
    use super::*;

    #[test]
    fn test_empty_views() {
        let session = Session::new();
        assert_eq!(markdown::render_history(&session), markdown::EMPTY_HISTORY);
        assert_eq!(markdown::render_timeline(&session), markdown::EMPTY_TIMELINE);
    }

    #[test]
    fn test_history_and_timeline() {
        let mut router = seeded_router();
        let mut session = Session::new();
        for text in ["Hello", "I feel stressed", "I want to give up", "Good morning"] {
            router.respond(&mut session, text);
        }

        let history = markdown::render_history(&session);
        let lines: Vec<&str> = history.lines().collect();
        assert_eq!(
            lines[0],
            "| time | user_input | sentiment | sentiment_score | intent | response |"
        );
        // Header, separator and one row per record
        assert_eq!(lines.len(), 6);
        assert!(lines[2].contains("| Hello | NEUTRAL | 1.0000 | greeting |"));
        assert!(lines[3].contains("| NEGATIVE | 1.0000 | stress |"));
        assert!(lines[4].contains("| I want to give up | - | - | Crisis |"));

        let values: Vec<i8> = session.mood_timeline().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0, -1, 1]);

        let timeline = markdown::render_timeline(&session);
        assert_eq!(timeline.lines().filter(|l| l.starts_with("- ")).count(), 3);
    }

    #[test]
    fn test_reply_markdown() {
        let mut router = seeded_router();
        let mut session = Session::new();
        let reply = router.respond(&mut session, "I feel stressed");

        let md = markdown::render_reply(&reply);
        assert!(md.starts_with("**Bot:** [NEGATIVE] Stress is tough."));
        assert!(md.contains("Personalized Recommendations"));
        assert!(md.contains("- [5-Minute Meditation](https://www.youtube.com/watch?v=inpok4MKVLM)"));
    }
}
