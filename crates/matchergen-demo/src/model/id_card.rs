use crate::types::Uuid;

/// An identity document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdCard {
    first_name: String,
    id: Uuid,
    nickname: Option<String>,
}

impl IdCard {
    /// Creates a card without a nickname.
    #[must_use]
    pub fn new(first_name: &str, id: Uuid) -> Self {
        Self {
            first_name: first_name.to_string(),
            id,
            nickname: None,
        }
    }

    /// Holder's first name.
    #[must_use]
    pub fn first_name(&self) -> String {
        self.first_name.clone()
    }

    /// Card identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Consumes the card, keeping the first name.
    #[must_use]
    pub fn into_first_name(self) -> String {
        self.first_name
    }

    /// Whether `name` is the holder's first name or nickname.
    #[must_use]
    pub fn is_holder(&self, name: &str) -> bool {
        self.first_name == name || self.nickname.as_deref() == Some(name)
    }

    /// Sets the nickname.
    #[must_use]
    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }
}

#[cfg(feature = "nicknames")]
impl IdCard {
    /// Holder's nickname, if any.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }
}
