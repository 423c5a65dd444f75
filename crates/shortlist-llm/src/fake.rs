use shortlist_core::traits::LanguageModel;
use shortlist_core::types::{ChatMessage, Role};
use shortlist_core::{Error, Result};

/// Offline model that replies with the content of the last user turn.
///
/// Deterministic, so pipeline runs without network access are reproducible.
#[derive(Debug, Default, Clone)]
pub struct EchoModel;

impl EchoModel {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageModel for EchoModel {
    fn model_id(&self) -> &str {
        "echo"
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .ok_or_else(|| Error::LanguageModel("no user message to answer".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_last_user_turn() {
        let msgs = [ChatMessage::system("be brief"), ChatMessage::user("Details: Alice")];
        assert_eq!(EchoModel::new().complete(&msgs).unwrap(), "Details: Alice");
    }

    #[test]
    fn system_only_prompt_is_an_error() {
        let err = EchoModel::new().complete(&[ChatMessage::system("x")]).unwrap_err();
        assert!(matches!(err, Error::LanguageModel(_)));
    }
}
