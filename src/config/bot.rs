//! Bot identity configuration
//!
//! The four NLU call parameters that are process-level in the current
//! scope: bot, alias, locale, and conversation session.

use serde::Deserialize;

use super::error::ValidationError;

/// Bot identity configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot identifier at the NLU runtime
    pub bot_id: String,

    /// Bot alias (deployment stage) identifier
    pub bot_alias_id: String,

    /// Locale the bot resolves intents in
    #[serde(default = "default_locale")]
    pub locale_id: String,

    /// Conversation session identifier; generated fresh per process when
    /// not configured
    #[serde(default)]
    pub session_id: Option<String>,
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_id.is_empty() {
            return Err(ValidationError::MissingRequired("BOT_ID"));
        }
        if self.bot_alias_id.is_empty() {
            return Err(ValidationError::MissingRequired("BOT_ALIAS_ID"));
        }
        if self.locale_id.is_empty() {
            return Err(ValidationError::MissingRequired("LOCALE_ID"));
        }
        Ok(())
    }
}

fn default_locale() -> String {
    "en_US".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> BotConfig {
        BotConfig {
            bot_id: "BOT123".to_string(),
            bot_alias_id: "ALIAS456".to_string(),
            locale_id: default_locale(),
            session_id: None,
        }
    }

    #[test]
    fn test_default_locale() {
        assert_eq!(minimal().locale_id, "en_US");
    }

    #[test]
    fn test_validation_passes_with_required_fields() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_bot_id() {
        let config = BotConfig {
            bot_id: String::new(),
            ..minimal()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_bot_alias_id() {
        let config = BotConfig {
            bot_alias_id: String::new(),
            ..minimal()
        };
        assert!(config.validate().is_err());
    }
}
