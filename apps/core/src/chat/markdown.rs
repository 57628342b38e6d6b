//! Markdown views for the chat surface.

use std::fmt::Write;

use super::router::Reply;
use super::session::Session;

pub const EMPTY_HISTORY: &str = "No conversation history yet.";
pub const EMPTY_TIMELINE: &str = "Start chatting to see your mood timeline.";

/// Pipes and newlines would break a table row
pub(crate) fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Bot reply followed by its recommendation links
pub fn render_reply(reply: &Reply) -> String {
    let mut out = format!("**Bot:** {}\n", reply.display_text);
    if !reply.recommendations.is_empty() {
        out.push_str("\n### \u{1f3af} Personalized Recommendations\n");
        for rec in &reply.recommendations {
            let _ = writeln!(out, "- [{}]({})", rec.title, rec.url);
        }
    }
    out
}

/// The session log as a table, oldest first
pub fn render_history(session: &Session) -> String {
    if session.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut out = String::from("| time | user_input | sentiment | sentiment_score | intent | response |\n");
    out.push_str("|---|---|---|---|---|---|\n");
    for record in session.log() {
        let sentiment = record
            .sentiment_label
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        let score = record
            .sentiment_score
            .map(|s| format!("{:.4}", s))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            record.time(),
            cell(&record.user_input),
            sentiment,
            score,
            record.intent,
            cell(&record.response_text)
        );
    }
    out
}

/// Mood timeline as `time: value` lines with a simple bar
pub fn render_timeline(session: &Session) -> String {
    let points = session.mood_timeline();
    if points.is_empty() {
        return EMPTY_TIMELINE.to_string();
    }

    let mut out = String::from("### \u{1f4c8} Mood Timeline\n");
    for point in points {
        let bar = match point.value {
            1 => "  |+",
            -1 => "-|  ",
            _ => "  | ",
        };
        let _ = writeln!(out, "- {} `{}` {:+}", point.time, bar, point.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Intent;
    use crate::chat::session::ConversationRecord;
    use crate::chat::tables::RecommendationEntry;
    use crate::sentiment::{Sentiment, SentimentLabel};

    #[test]
    fn test_reply_lists_recommendations() {
        let reply = Reply {
            display_text: "[NEUTRAL] Hi".to_string(),
            intent: Intent::Greeting,
            recommendations: vec![RecommendationEntry::new("Playlist", "https://example.com/p")],
        };
        let md = render_reply(&reply);
        assert!(md.starts_with("**Bot:** [NEUTRAL] Hi"));
        assert!(md.contains("- [Playlist](https://example.com/p)"));
    }

    #[test]
    fn test_empty_views() {
        let session = Session::new();
        assert_eq!(render_history(&session), EMPTY_HISTORY);
        assert_eq!(render_timeline(&session), EMPTY_TIMELINE);
    }

    #[test]
    fn test_history_escapes_cells() {
        let mut session = Session::new();
        session.append(ConversationRecord::new(
            "a | b\nc",
            Some(Sentiment::new(SentimentLabel::Neutral, 0.5)),
            Intent::Default,
            "ok",
        ));
        session.append(ConversationRecord::new("give up", None, Intent::Crisis, "help"));

        let md = render_history(&session);
        assert_eq!(md.lines().count(), 4);
        assert!(md.contains("a \\| b c"));
        assert!(md.contains("| NEUTRAL | 0.5000 | default |"));
        assert!(md.contains("| - | - | Crisis |"));
    }

    #[test]
    fn test_timeline_values() {
        let mut session = Session::new();
        session.append(ConversationRecord::new(
            "sad",
            Some(Sentiment::new(SentimentLabel::Negative, 0.9)),
            Intent::Sadness,
            "x",
        ));
        let md = render_timeline(&session);
        assert!(md.contains("-1"));
    }
}
