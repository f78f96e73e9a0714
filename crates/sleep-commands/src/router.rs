//! Keyword routing for plain greeting messages.
//!
//! Every inbound message passes through [`handle_message`]. Group messages
//! are only handled by the bot identity assigned to that channel. Text equal
//! to a registered command name runs that command; anything else is matched
//! against the configured greeting keywords.

use chrono::{DateTime, Utc};
use sleep_common::CheckinKind;
use sleep_config::Config;
use tracing::{debug, trace};

use crate::framework::{Error, Framework};
use crate::session::Session;

/// Single-character shorthand for a morning greeting.
pub const MORNING_SHORTHAND: &str = "早";

/// Single-character shorthand for a night greeting.
pub const NIGHT_SHORTHAND: &str = "晚";

/// Maps message text to a check-in kind.
///
/// Morning keywords are tried before night keywords.
pub fn route(config: &Config, content: &str) -> Option<CheckinKind> {
    let matches = |kind: CheckinKind, shorthand: &str| {
        content == shorthand
            || config
                .keywords(kind)
                .iter()
                .any(|keyword| content.starts_with(keyword.as_str()))
    };

    if matches(CheckinKind::Morning, MORNING_SHORTHAND) {
        Some(CheckinKind::Morning)
    } else if matches(CheckinKind::Night, NIGHT_SHORTHAND) {
        Some(CheckinKind::Night)
    } else {
        None
    }
}

/// Handles one inbound message and returns the reply, if any.
///
/// # Errors
///
/// Returns store errors from the assignee lookup and errors raised by the
/// executed command.
pub async fn handle_message(
    framework: &Framework,
    session: &Session,
    now: DateTime<Utc>,
) -> Result<Option<String>, Error> {
    let Some(content) = session.text() else {
        return Ok(None);
    };

    if let Some(group_id) = &session.guild_id {
        let assignee = framework
            .data()
            .service
            .store()
            .channel_assignee(&session.platform, group_id)
            .await?;
        if assignee.as_deref() != Some(session.self_id.as_str()) {
            trace!(group = %group_id, self_id = %session.self_id, "message for another assignee");
            return Ok(None);
        }
    }

    if framework.command(content).is_some() {
        debug!(command = content, "command invoked by name");
        return framework.execute(content, Some(session), now).await;
    }

    let config = framework.data().config.get();
    let Some(kind) = route(&config, content) else {
        return Ok(None);
    };

    debug!(%kind, "greeting routed");
    framework.execute(kind.command_name(), Some(session), now).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_keywords() {
        let config = Config::default();
        assert_eq!(route(&config, "早安呀"), Some(CheckinKind::Morning));
        assert_eq!(route(&config, "good morning everyone"), Some(CheckinKind::Morning));
        assert_eq!(route(&config, "晚安"), Some(CheckinKind::Night));
        assert_eq!(route(&config, "睡觉了"), Some(CheckinKind::Night));
    }

    #[test]
    fn test_route_shorthand_must_be_exact() {
        let config = Config::default();
        assert_eq!(route(&config, "早"), Some(CheckinKind::Morning));
        assert_eq!(route(&config, "晚"), Some(CheckinKind::Night));
        assert_eq!(route(&config, "晚饭吃什么"), None);
    }

    #[test]
    fn test_route_ignores_other_text() {
        let config = Config::default();
        assert_eq!(route(&config, "hello"), None);
        assert_eq!(route(&config, "我说早安"), None);
    }

    #[test]
    fn test_route_prefers_morning() {
        let config = Config {
            morning_messages: vec!["hi".to_string()],
            night_messages: vec!["hi".to_string()],
            ..Config::default()
        };
        assert_eq!(route(&config, "hi"), Some(CheckinKind::Morning));
    }
}
