use std::fmt;

use super::InteractionId;

/// Which generated narrative to fetch; each kind has its own endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKind {
    General,
    CustomerExperience,
}

impl SummaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::General => "general",
            SummaryKind::CustomerExperience => "cx",
        }
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-text narrative summary for one interaction. Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub interaction_id: InteractionId,
    pub kind: SummaryKind,
    pub text: String,
}

impl SummaryResult {
    pub fn new(interaction_id: InteractionId, kind: SummaryKind, text: String) -> Self {
        Self {
            interaction_id,
            kind,
            text,
        }
    }
}
