//! Publish/subscribe channel for session lifecycle events.
//!
//! Each shape tool owns one bus. Handlers run synchronously, in subscription
//! order, on the thread that delivers pointer input. A handler that fails or
//! panics is logged and skipped; the rest still run.

use crate::geo::GeoPoint;
use crate::shapes::{ShapeId, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::panic::{AssertUnwindSafe, catch_unwind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    DrawMove,
    DrawCertain,
    DrawFinish,
    EditMove,
    EditCertain,
    EditFinish,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::DrawMove,
        EventKind::DrawCertain,
        EventKind::DrawFinish,
        EventKind::EditMove,
        EventKind::EditCertain,
        EventKind::EditFinish,
    ];
}

/// Event payload.
///
/// Single-point shapes report `position`; every other shape reports
/// `positions`. Per-vertex events also carry `index` and the `position` of
/// that vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub id: ShapeId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub positions: Option<Vec<GeoPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub shape_kind: ShapeKind,
    pub event: EventKind,
    pub data: EventData,
}

impl InteractionEvent {
    /// Build an event, choosing `position` or `positions` from the shape kind.
    pub fn new(
        shape_kind: ShapeKind,
        event: EventKind,
        id: ShapeId,
        index: Option<usize>,
        points: &[GeoPoint],
    ) -> Self {
        let vertex = index.and_then(|i| points.get(i)).copied();
        let (position, positions) = if shape_kind.is_single_point() {
            (vertex.or(points.last().copied()), None)
        } else {
            (vertex, Some(points.to_vec()))
        };
        Self {
            shape_kind,
            event,
            data: EventData {
                id,
                index,
                position,
                positions,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub type HandlerResult = Result<(), Box<dyn Error>>;

/// Subscriber callback.
pub type EventHandler = Box<dyn FnMut(&InteractionEvent) -> HandlerResult>;

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<(SubscriptionId, EventHandler)>>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self.handlers.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventBus").field("handlers", &counts).finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed to `kind`.
    pub fn off(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(sub, _)| *sub != id);
        list.len() != before
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver an event to every handler of its kind. Returns how many failed.
    pub fn emit(&mut self, event: &InteractionEvent) -> usize {
        let Some(list) = self.handlers.get_mut(&event.event) else {
            return 0;
        };
        let mut failures = 0;
        for (id, handler) in list.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures += 1;
                    log::warn!("{:?} handler {:?} failed: {}", event.event, id, err);
                }
                Err(_) => {
                    failures += 1;
                    log::warn!("{:?} handler {:?} panicked", event.event, id);
                }
            }
        }
        failures
    }
}
