//! Mutual exclusion across every draw and edit session.

use crate::shapes::ShapeKind;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Draw,
    Edit,
}

/// Who currently holds the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionHolder {
    pub kind: ShapeKind,
    pub session_id: u64,
    pub mode: SessionMode,
}

#[derive(Debug, Default)]
struct GateState {
    holder: Option<SessionHolder>,
    next_session: u64,
}

/// Shared "one session at a time" flag.
///
/// Clones share state. Independent gates never interact, so every
/// [`Authoring`](crate::Authoring) instance has its own.
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    state: Rc<RefCell<GateState>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().holder.is_some()
    }

    pub fn holder(&self) -> Option<SessionHolder> {
        self.state.borrow().holder
    }

    /// Claim the gate. Fails without side effects while another session holds it.
    pub fn try_acquire(&self, kind: ShapeKind, mode: SessionMode) -> Option<SessionToken> {
        let mut state = self.state.borrow_mut();
        if let Some(current) = state.holder {
            log::debug!(
                "gate busy: {:?} {} session {} holds it",
                current.mode,
                current.kind,
                current.session_id
            );
            return None;
        }
        state.next_session += 1;
        let holder = SessionHolder {
            kind,
            session_id: state.next_session,
            mode,
        };
        state.holder = Some(holder);
        log::debug!("gate acquired by {:?} {} session {}", mode, kind, holder.session_id);
        Some(SessionToken {
            gate: self.clone(),
            holder,
            released: false,
        })
    }
}

/// Proof of holding the gate. Releases it once, on `release()` or drop.
pub struct SessionToken {
    gate: SessionGate,
    holder: SessionHolder,
    released: bool,
}

impl SessionToken {
    pub fn holder(&self) -> SessionHolder {
        self.holder
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let mut state = self.gate.state.borrow_mut();
        if state.holder == Some(self.holder) {
            state.holder = None;
            log::debug!("gate released by session {}", self.holder.session_id);
        }
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("holder", &self.holder)
            .field("released", &self.released)
            .finish()
    }
}
