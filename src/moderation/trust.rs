//! Per-user trust progression.
//!
//! `New` users have not had their profile audited, `Probation` users have,
//! and `Trusted` users skip the scan except for sampled re-audits of
//! messages carrying links, forwards or photos.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::message::InboundMessage;
use crate::database::{StateUpdate, UserState, TRUST_THRESHOLD};

/// Chance that a risky message from a trusted user is scanned anyway.
pub const AUDIT_SAMPLE_RATE: f64 = 0.3;

/// Uniform draw in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Fresh OS-seeded generator per draw, so skips are not correlated across messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyRandom;

impl RandomSource for EntropyRandom {
    fn next_f64(&self) -> f64 {
        StdRng::from_entropy().r#gen::<f64>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustLevel {
    New,
    Probation,
    Trusted,
}

impl TrustLevel {
    pub fn of(state: &UserState) -> Self {
        if state.trusted {
            Self::Trusted
        } else if state.profile_checked {
            Self::Probation
        } else {
            Self::New
        }
    }
}

#[derive(Clone)]
pub struct TrustStateMachine {
    random: Arc<dyn RandomSource>,
}

impl TrustStateMachine {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn should_skip_scan(&self, state: &UserState, message: &InboundMessage) -> bool {
        if TrustLevel::of(state) != TrustLevel::Trusted {
            return false;
        }
        let risky = message.has_link_entity || message.is_forward || message.has_photo;
        // Only draw for risky messages.
        !(risky && self.random.next_f64() < AUDIT_SAMPLE_RATE)
    }

    /// Write-back for a message that skipped the scan.
    pub fn on_skipped(state: &UserState) -> StateUpdate {
        StateUpdate {
            message_count: Some(state.message_count.saturating_add(1)),
            ..Default::default()
        }
    }

    /// Write-back for a message that passed the scan, promoting at the threshold.
    pub fn on_clean(state: &UserState) -> StateUpdate {
        let count = state.message_count.saturating_add(1);
        StateUpdate {
            message_count: Some(count),
            trusted: (!state.trusted && count >= TRUST_THRESHOLD).then_some(true),
            ..Default::default()
        }
    }
}
