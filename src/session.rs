use crate::catalog::ModelSelector;

/// Per-run form state. Lives only as long as the interactive session and is
/// handed to the form by reference; nothing here is written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub credential: String,
    pub model: ModelSelector,
}

impl Session {
    pub fn new(model: ModelSelector) -> Self {
        Self {
            credential: String::new(),
            model,
        }
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_credential() {
        let session = Session::new(ModelSelector::Mixtral8x7b);
        assert!(!session.has_credential());
        assert_eq!(session.model, ModelSelector::Mixtral8x7b);
    }

    #[test]
    fn whitespace_credential_does_not_count() {
        let mut session = Session::default();
        session.set_credential("   ");
        assert!(!session.has_credential());
        session.set_credential("gsk_something");
        assert!(session.has_credential());
    }
}
