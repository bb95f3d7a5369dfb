use std::time::Duration;

use casefile_config::LatencyConfig;
use casefile_types::Endpoint;

/// Simulated round-trip time per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub read: Duration,
    pub notes: Duration,
    pub evidence: Duration,
    pub verdict: Duration,
    pub session_start: Duration,
    pub reset: Duration,
    /// How long the desk waits before reporting an unknown evidence code.
    pub rejection: Duration,
}

impl LatencyProfile {
    const READ_MS: u64 = 400;
    const NOTES_MS: u64 = 600;
    const EVIDENCE_MS: u64 = 1200;
    const VERDICT_MS: u64 = 2000;
    const SESSION_START_MS: u64 = 0;
    const RESET_MS: u64 = 1000;
    const REJECTION_MS: u64 = 1000;

    /// Every operation resolves without waiting.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            read: Duration::ZERO,
            notes: Duration::ZERO,
            evidence: Duration::ZERO,
            verdict: Duration::ZERO,
            session_start: Duration::ZERO,
            reset: Duration::ZERO,
            rejection: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn from_config(config: &LatencyConfig) -> Self {
        Self {
            read: config.resolve(config.read_ms, Self::READ_MS),
            notes: config.resolve(config.notes_ms, Self::NOTES_MS),
            evidence: config.resolve(config.evidence_ms, Self::EVIDENCE_MS),
            verdict: config.resolve(config.verdict_ms, Self::VERDICT_MS),
            session_start: config.resolve(config.session_start_ms, Self::SESSION_START_MS),
            reset: config.resolve(config.reset_ms, Self::RESET_MS),
            rejection: config.resolve(config.rejection_ms, Self::REJECTION_MS),
        }
    }

    #[must_use]
    pub fn for_endpoint(&self, endpoint: &Endpoint) -> Duration {
        match endpoint {
            Endpoint::Dossier => self.read,
            Endpoint::Notes => self.notes,
            Endpoint::Evidence(_) => self.evidence,
            Endpoint::Verdict => self.verdict,
            Endpoint::SessionStart => self.session_start,
            Endpoint::Reset => self.reset,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::from_config(&LatencyConfig::default())
    }
}

/// Wait out a simulated delay. Zero never yields.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
