// Live telemetry signals consumed by the adaptive controller
//
// The telemetry pipeline (out of scope here) produces a stream of state
// readings; the engine only ever looks at the most recent one per tick.
// Using enums keeps the safety escalation logic pattern-matchable and
// ensures type-safe communication between the producer task and the loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Safety level reported by the telemetry pipeline.
///
/// Ordered: `Normal < Caution < Emergency`. Emergency is the only level the
/// controller treats as an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Normal,
    Caution,
    Emergency,
}

impl SafetyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyLevel::Normal => "normal",
            SafetyLevel::Caution => "caution",
            SafetyLevel::Emergency => "emergency",
        }
    }
}

/// Consciousness state labels, matching the six entrainment bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsciousnessState {
    DeepDelta,
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

impl ConsciousnessState {
    /// Palette role name carrying this state's color in theme descriptors.
    pub fn role_name(&self) -> &'static str {
        match self {
            ConsciousnessState::DeepDelta => "deep_delta",
            ConsciousnessState::Delta => "delta",
            ConsciousnessState::Theta => "theta",
            ConsciousnessState::Alpha => "alpha",
            ConsciousnessState::Beta => "beta",
            ConsciousnessState::Gamma => "gamma",
        }
    }

    /// Parse a free-form label from the telemetry source.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "deep_delta" | "deep delta" => Some(ConsciousnessState::DeepDelta),
            "delta" => Some(ConsciousnessState::Delta),
            "theta" => Some(ConsciousnessState::Theta),
            "alpha" => Some(ConsciousnessState::Alpha),
            "beta" => Some(ConsciousnessState::Beta),
            "gamma" => Some(ConsciousnessState::Gamma),
            _ => None,
        }
    }
}

/// One reading from the live telemetry stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSignal {
    pub timestamp: DateTime<Utc>,
    pub state: ConsciousnessState,
    pub safety: SafetyLevel,
}

impl StateSignal {
    pub fn new(state: ConsciousnessState, safety: SafetyLevel) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
            safety,
        }
    }
}

/// Latest-value slot shared between the telemetry producer and the render
/// loop. The producer overwrites, the loop reads; no queueing, no blocking.
pub type SharedSignal = Arc<Mutex<Option<StateSignal>>>;

/// Create an empty shared signal slot.
pub fn shared_signal() -> SharedSignal {
    Arc::new(Mutex::new(None))
}

/// Publish a reading, replacing whatever was there.
pub fn publish(slot: &SharedSignal, signal: StateSignal) {
    if let Ok(mut guard) = slot.lock() {
        *guard = Some(signal);
    }
}

/// Read the latest reading without consuming it.
pub fn latest(slot: &SharedSignal) -> Option<StateSignal> {
    slot.lock().ok().and_then(|guard| guard.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_levels_are_ordered() {
        assert!(SafetyLevel::Normal < SafetyLevel::Caution);
        assert!(SafetyLevel::Caution < SafetyLevel::Emergency);
    }

    #[test]
    fn state_labels_round_trip() {
        for state in [
            ConsciousnessState::DeepDelta,
            ConsciousnessState::Delta,
            ConsciousnessState::Theta,
            ConsciousnessState::Alpha,
            ConsciousnessState::Beta,
            ConsciousnessState::Gamma,
        ] {
            assert_eq!(ConsciousnessState::parse(state.role_name()), Some(state));
        }
        assert_eq!(ConsciousnessState::parse("Deep Delta"), Some(ConsciousnessState::DeepDelta));
        assert_eq!(ConsciousnessState::parse("unknown"), None);
    }

    #[test]
    fn slot_is_latest_wins() {
        let slot = shared_signal();
        publish(&slot, StateSignal::new(ConsciousnessState::Alpha, SafetyLevel::Normal));
        publish(&slot, StateSignal::new(ConsciousnessState::Theta, SafetyLevel::Caution));

        let seen = latest(&slot).unwrap();
        assert_eq!(seen.state, ConsciousnessState::Theta);
        assert_eq!(seen.safety, SafetyLevel::Caution);
    }
}
