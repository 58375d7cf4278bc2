use std::fmt;
use std::str::FromStr;

/// Lifecycle status reported by the external service. Wire tokens are
/// lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionStatus {
    Queued,
    Processing,
    Processed,
    Failed,
}

impl InteractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionStatus::Queued => "queued",
            InteractionStatus::Processing => "processing",
            InteractionStatus::Processed => "processed",
            InteractionStatus::Failed => "failed",
        }
    }

}

impl FromStr for InteractionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(InteractionStatus::Queued),
            "processing" => Ok(InteractionStatus::Processing),
            "processed" => Ok(InteractionStatus::Processed),
            "failed" => Ok(InteractionStatus::Failed),
            _ => Err(format!("Unknown interaction status: {}", s)),
        }
    }
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
