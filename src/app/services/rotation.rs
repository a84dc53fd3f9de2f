//! Broadcast identifier rotation
//!
//! The identifier advances one letter, Alpha through Zulu and back to Alpha,
//! each time the canonical observation time changes. The state is an
//! explicit value owned by the caller, so the rotation itself is pure.

use crate::app::models::{BroadcastIdentifier, CanonicalSnapshot, RotationState};
use tracing::{debug, info};

/// Advance the rotation for a new observation time.
///
/// Returns the updated state and the identifier to broadcast. The state only
/// moves when `observation_time` differs from the last one recorded.
pub fn advance(
    state: &RotationState,
    observation_time: &str,
) -> (RotationState, BroadcastIdentifier) {
    if state.last_observation_time.as_deref() == Some(observation_time) {
        debug!(
            "Observation time {} unchanged, keeping {}",
            observation_time,
            state.identifier()
        );
        return (state.clone(), state.identifier());
    }

    let next = RotationState {
        current_index: (state.current_index % 26 + 1) % 26,
        last_observation_time: Some(observation_time.to_string()),
    };
    let identifier = next.identifier();

    info!(
        "Observation time changed to {}, broadcasting information {}",
        observation_time, identifier
    );

    (next, identifier)
}

/// Advance the rotation for a fused snapshot; an absent time counts as `unknown`
pub fn advance_for(
    state: &RotationState,
    snapshot: &CanonicalSnapshot,
) -> (RotationState, BroadcastIdentifier) {
    advance(state, &snapshot.observation_time_text())
}
