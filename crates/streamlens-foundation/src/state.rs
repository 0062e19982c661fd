use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of one capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CaptureState {
    Idle = 0,
    Capturing = 1,
    Reconnecting = 2,
    Stopped = 3,
    Failed = 4,
}

impl CaptureState {
    /// Terminal states release their resources and never restart on their own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaptureState::Stopped | CaptureState::Failed)
    }

    fn from_u8(value: u8) -> CaptureState {
        match value {
            0 => CaptureState::Idle,
            1 => CaptureState::Capturing,
            2 => CaptureState::Reconnecting,
            3 => CaptureState::Stopped,
            _ => CaptureState::Failed,
        }
    }
}

/// Terminal states only leave through an explicit restart into Capturing.
pub fn transition_valid(from: CaptureState, to: CaptureState) -> bool {
    matches!(
        (from, to),
        (CaptureState::Idle, CaptureState::Capturing)
            | (CaptureState::Stopped, CaptureState::Capturing)
            | (CaptureState::Failed, CaptureState::Capturing)
            | (CaptureState::Capturing, CaptureState::Reconnecting)
            | (CaptureState::Capturing, CaptureState::Stopped)
            | (CaptureState::Reconnecting, CaptureState::Capturing)
            | (CaptureState::Reconnecting, CaptureState::Stopped)
            | (CaptureState::Reconnecting, CaptureState::Failed)
    )
}

/// Single-writer state snapshot, readable from any thread.
///
/// The session worker is the only writer once the session starts; other
/// threads observe the current state without taking a lock.
pub struct StateCell {
    state: AtomicU8,
}

impl StateCell {
    pub fn new(initial: CaptureState) -> Self {
        Self {
            state: AtomicU8::new(initial as u8),
        }
    }

    pub fn get(&self) -> CaptureState {
        CaptureState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Publishes the next state. Invalid transitions are logged and refused.
    pub fn set(&self, next: CaptureState) -> bool {
        let current = self.get();
        if !transition_valid(current, next) {
            tracing::warn!("Invalid state transition: {:?} -> {:?}", current, next);
            return false;
        }
        tracing::info!("State transition: {:?} -> {:?}", current, next);
        self.state.store(next as u8, Ordering::SeqCst);
        true
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new(CaptureState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_path_transitions_are_valid() {
        let cell = StateCell::default();
        assert_eq!(cell.get(), CaptureState::Idle);

        assert!(cell.set(CaptureState::Capturing));
        assert!(cell.set(CaptureState::Reconnecting));
        assert!(cell.set(CaptureState::Capturing));
        assert!(cell.set(CaptureState::Stopped));
        assert_eq!(cell.get(), CaptureState::Stopped);
    }

    #[test]
    fn failed_is_only_reachable_from_reconnecting() {
        let cell = StateCell::default();
        cell.set(CaptureState::Capturing);

        assert!(!cell.set(CaptureState::Failed));
        assert_eq!(cell.get(), CaptureState::Capturing);

        cell.set(CaptureState::Reconnecting);
        assert!(cell.set(CaptureState::Failed));
        assert!(cell.get().is_terminal());
    }

    #[test]
    fn terminal_states_only_restart_into_capturing() {
        let cell = StateCell::new(CaptureState::Stopped);
        assert!(!cell.set(CaptureState::Reconnecting));
        assert!(!cell.set(CaptureState::Failed));
        assert!(cell.set(CaptureState::Capturing));

        let cell = StateCell::new(CaptureState::Failed);
        assert!(!cell.set(CaptureState::Stopped));
        assert!(cell.set(CaptureState::Capturing));
    }
}
