// Demo mode: scripted telemetry walk showcasing the adaptive engine
//
// Publishes a realistic consciousness-state progression into the shared
// signal slot: settling in through beta/alpha, descending into theta and
// delta, a mid-session emergency escalation, de-escalation, and an explicit
// re-selection that releases the safety override.
//
// Run with: ATTUNE_DEMO=1 attune

use crate::controller::SelectionHandle;
use crate::selection::{SelectionContext, UserProfile};
use crate::signals::{publish, ConsciousnessState, SafetyLevel, SharedSignal, StateSignal};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// One scripted step: what the telemetry reports, and for how long.
struct Step {
    state: ConsciousnessState,
    safety: SafetyLevel,
    hold_ms: u64,
}

const fn step(state: ConsciousnessState, safety: SafetyLevel, hold_ms: u64) -> Step {
    Step {
        state,
        safety,
        hold_ms,
    }
}

/// The scripted session. Timings are short enough to watch in one sitting
/// but long enough for transitions to play out.
const SCRIPT: &[Step] = &[
    // Settling in
    step(ConsciousnessState::Beta, SafetyLevel::Normal, 3000),
    step(ConsciousnessState::Alpha, SafetyLevel::Normal, 4000),
    // Descent
    step(ConsciousnessState::Theta, SafetyLevel::Normal, 4000),
    step(ConsciousnessState::Delta, SafetyLevel::Normal, 4000),
    step(ConsciousnessState::DeepDelta, SafetyLevel::Normal, 4000),
    // Something wobbles on the way up
    step(ConsciousnessState::Theta, SafetyLevel::Caution, 3000),
    step(ConsciousnessState::Gamma, SafetyLevel::Emergency, 5000),
    // Recovery: de-escalation alone must NOT release the safety override
    step(ConsciousnessState::Beta, SafetyLevel::Caution, 3000),
    step(ConsciousnessState::Alpha, SafetyLevel::Normal, 4000),
    // Gentle wind-down after the explicit re-selection below
    step(ConsciousnessState::Theta, SafetyLevel::Normal, 4000),
    step(ConsciousnessState::Alpha, SafetyLevel::Normal, 4000),
];

/// Index of the first normal-safety step after the emergency; the script
/// issues its re-selection when it reaches this point.
const RESELECT_AT: usize = 8;

/// Drive the scripted walk until it ends or shutdown is signalled.
pub async fn run_demo(
    signal_slot: SharedSignal,
    selection: SelectionHandle,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    tracing::info!("demo script starting");

    // Let the first render ticks establish the initial theme.
    sleep(Duration::from_millis(500)).await;

    for (i, s) in SCRIPT.iter().enumerate() {
        if shutdown_rx.try_recv().is_ok() {
            return;
        }

        tracing::debug!(state = ?s.state, safety = s.safety.as_str(), "demo signal");
        publish(&signal_slot, StateSignal::new(s.state, s.safety));

        if i == RESELECT_AT {
            // The user acknowledges recovery and asks for a calm session.
            tracing::info!("demo: explicit re-selection after recovery");
            selection.request_selection(
                SelectionContext::new(UserProfile::default()).with_intention("healing"),
            );
        }

        sleep(Duration::from_millis(s.hold_ms)).await;
    }

    tracing::info!("demo script finished");
}
