use crate::format::Detail;

/// Prompt when an add-class command gets no argument
pub const NOTHING_SPECIFIED: &str = "What am I adding?";

/// A search came back empty
pub const NOT_FOUND: &str = "I couldn't find anything :(";

/// Any collaborator failure or refusal
pub const GENERIC_ERROR: &str = "Something went wrong :(";

/// Admin keyword used outside the admin channel
pub const PERMISSION_DENIED: &str = "Sorry, only admins can do that.";

/// What a command sends back to the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Rich(Detail),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn generic_error() -> Self {
        Self::text(GENERIC_ERROR)
    }

    /// The text of a plain reply, `None` for rich ones
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich(_) => None,
        }
    }
}

impl From<Detail> for Reply {
    fn from(value: Detail) -> Self {
        Self::Rich(value)
    }
}
