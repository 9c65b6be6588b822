use std::fmt;

/// Lifecycle stage of a check job.
///
/// Variants are declared in lifecycle order, so `Ord` follows the only legal
/// progression: `Dispatch < Executing < Writing < Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Runner is being spawned.
    Dispatch,
    /// Runner is executing the check.
    Executing,
    /// Result is being written to the hot and metrics stores.
    Writing,
    /// Terminal; the job is folded into stats and removed.
    Complete,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Dispatch => "dispatch",
            Phase::Executing => "executing",
            Phase::Writing => "writing",
            Phase::Complete => "complete",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Complete
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Dispatch
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a simulated check job (`job-<n>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Identifier of the ephemeral runner executing a job (`runner-<n>`).
///
/// Also used verbatim as the runner's graph node id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunnerId(String);

impl RunnerId {
    pub fn from_seq(seq: u64) -> Self {
        RunnerId(format!("runner-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_order_by_lifecycle() {
        assert!(Phase::Dispatch < Phase::Executing);
        assert!(Phase::Executing < Phase::Writing);
        assert!(Phase::Writing < Phase::Complete);
        assert!(Phase::Complete.is_terminal());
        assert!(!Phase::Writing.is_terminal());
    }

    #[test]
    fn ids_render_with_prefixes() {
        assert_eq!(JobId(7).to_string(), "job-7");
        assert_eq!(RunnerId::from_seq(7).as_str(), "runner-7");
    }
}
