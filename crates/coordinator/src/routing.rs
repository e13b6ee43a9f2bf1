//! Chat-command classification.

use crate::config::AppConfig;
use muster_common::normalized;

/// What an inbound chat line means to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// The open-request trigger
    RequestSupplies,

    /// The confirm trigger; `category` is the normalized first argument,
    /// `None` when the player gave no argument
    Confirm { category: Option<String> },

    /// Ordinary chatter, ignored
    Unrelated,
}

/// Classify a chat line. The content is trimmed and case-folded first, so
/// `!FEITO Muni` and `!feito muni` are the same command.
pub fn classify(content: &str, config: &AppConfig) -> ChatCommand {
    let msg = normalized(content);
    if msg.is_empty() {
        return ChatCommand::Unrelated;
    }

    if msg.starts_with(&normalized(&config.request_command)) {
        return ChatCommand::RequestSupplies;
    }

    if msg.starts_with(&normalized(&config.confirm_command)) {
        let category = msg.split_whitespace().nth(1).map(str::to_string);
        return ChatCommand::Confirm { category };
    }

    ChatCommand::Unrelated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn classifies_request_trigger() {
        assert_eq!(classify("!nodos", &config()), ChatCommand::RequestSupplies);
        assert_eq!(
            classify("  !NODOS  ", &config()),
            ChatCommand::RequestSupplies
        );
    }

    #[test]
    fn classifies_confirm_with_argument() {
        assert_eq!(
            classify("!feito muni", &config()),
            ChatCommand::Confirm {
                category: Some("muni".to_string())
            }
        );
        assert_eq!(
            classify("!FEITO Fuel", &config()),
            ChatCommand::Confirm {
                category: Some("fuel".to_string())
            }
        );
    }

    #[test]
    fn confirm_without_argument_has_no_category() {
        assert_eq!(
            classify("!feito", &config()),
            ChatCommand::Confirm { category: None }
        );
        assert_eq!(
            classify("!feito   ", &config()),
            ChatCommand::Confirm { category: None }
        );
    }

    #[test]
    fn extra_tokens_beyond_the_category_are_ignored() {
        assert_eq!(
            classify("!feito muni por favor", &config()),
            ChatCommand::Confirm {
                category: Some("muni".to_string())
            }
        );
    }

    #[test]
    fn ordinary_chat_is_unrelated() {
        assert_eq!(classify("gg wp", &config()), ChatCommand::Unrelated);
        assert_eq!(classify("", &config()), ChatCommand::Unrelated);
        assert_eq!(classify("nodos please", &config()), ChatCommand::Unrelated);
    }

    #[test]
    fn custom_triggers_are_honored() {
        let config = AppConfig {
            request_command: "!supplies".to_string(),
            confirm_command: "!built".to_string(),
            ..Default::default()
        };
        assert_eq!(classify("!supplies", &config), ChatCommand::RequestSupplies);
        assert_eq!(
            classify("!built fuel", &config),
            ChatCommand::Confirm {
                category: Some("fuel".to_string())
            }
        );
        assert_eq!(classify("!nodos", &config), ChatCommand::Unrelated);
    }
}
