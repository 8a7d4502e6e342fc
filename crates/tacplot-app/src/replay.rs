//! Drive the authoring engine from a script.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tacplot_core::{
    Authoring, AuthoringConfig, EventKind, InteractionEvent, Layer, MemoryLayer, OffscreenViewport,
    Pending, SessionError, ShapeDescriptor, ShapeId, ShapeKind,
};

use crate::script::{Script, Step};

/// How one draw or edit ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub kind: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ShapeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Shapes left in the layer, in insertion order.
    pub shapes: Vec<ShapeDescriptor>,
    pub outcomes: Vec<Outcome>,
    pub events: Vec<InteractionEvent>,
}

pub struct Replay {
    engine: Authoring<OffscreenViewport, MemoryLayer>,
    pending: Vec<(ShapeKind, Pending<ShapeDescriptor>)>,
    outcomes: Vec<Outcome>,
    events: Rc<RefCell<Vec<InteractionEvent>>>,
    /// Last shape finished per kind, the default edit target.
    last: Vec<(ShapeKind, ShapeId)>,
}

impl Replay {
    pub fn new(script: &Script, config: AuthoringConfig) -> Self {
        let mut viewport = OffscreenViewport::new();
        viewport.camera = script.scene.camera.clone();
        viewport.extent = script.scene.extent;

        let mut engine = Authoring::new(viewport, MemoryLayer::new(), config);
        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in ShapeKind::ALL {
            for event in EventKind::ALL {
                let sink = events.clone();
                engine.subscribe(
                    kind,
                    event,
                    Box::new(move |e: &InteractionEvent| {
                        sink.borrow_mut().push(e.clone());
                        Ok(())
                    }),
                );
            }
        }

        Self {
            engine,
            pending: Vec::new(),
            outcomes: Vec::new(),
            events,
            last: Vec::new(),
        }
    }

    pub fn step(&mut self, step: &Step) {
        match step {
            Step::Draw { kind, options } => {
                let result = self.engine.draw(*kind, options.clone());
                self.pending.push((*kind, result));
            }
            Step::Edit { kind, id } => {
                let target = id.or_else(|| self.last_of(*kind));
                let result = match target {
                    Some(id) => self.engine.edit(*kind, id),
                    None => Pending::rejected(SessionError::InvalidParameters(format!(
                        "no {kind} shape to edit"
                    ))),
                };
                self.pending.push((*kind, result));
            }
            Step::Pointer { event } => self.engine.handle_pointer(*event),
            Step::Finish { kind } => {
                self.engine.finish(*kind);
            }
            Step::Interrupt { kind } => {
                self.engine.interrupt(*kind);
            }
            Step::Remove { kind, id } => {
                if let Err(err) = self.engine.remove(*kind, *id) {
                    log::warn!("remove failed: {}", err);
                }
            }
        }
        self.collect();
    }

    /// Record every result that has arrived.
    fn collect(&mut self) {
        let mut still_open = Vec::new();
        for (kind, mut result) in self.pending.drain(..) {
            match result.try_take() {
                Some(outcome) => {
                    let outcome = Self::outcome(kind, outcome);
                    if let Some(id) = outcome.id {
                        self.last.retain(|(k, _)| *k != kind);
                        self.last.push((kind, id));
                    }
                    self.outcomes.push(outcome);
                }
                None => still_open.push((kind, result)),
            }
        }
        self.pending = still_open;
    }

    fn outcome(kind: ShapeKind, result: Result<ShapeDescriptor, SessionError>) -> Outcome {
        match result {
            Ok(shape) => Outcome {
                kind,
                id: Some(shape.id),
                error: None,
            },
            Err(err) => Outcome {
                kind,
                id: None,
                error: Some(err.to_string()),
            },
        }
    }

    fn last_of(&self, kind: ShapeKind) -> Option<ShapeId> {
        self.last.iter().find(|(k, _)| *k == kind).map(|(_, id)| *id)
    }

    /// Interrupt a draw left open, put back a shape left in an open edit,
    /// wait for every result and build the report.
    pub fn finish(mut self) -> Report {
        if self.engine.interrupt_active() {
            log::warn!("script ended with a draw in progress; interrupted");
        }
        if self.engine.abandon_edit() {
            log::warn!("script ended with an edit in progress; shape left unchanged");
        }
        let pending = std::mem::take(&mut self.pending);
        let Self {
            engine,
            mut outcomes,
            events,
            ..
        } = self;

        let layer = engine.layer();
        let shapes = layer.list().into_iter().filter_map(|id| layer.get(id).cloned()).collect();
        drop(engine);
        for (kind, result) in pending {
            outcomes.push(Self::outcome(kind, pollster::block_on(result)));
        }

        let events = events.borrow().clone();
        Report {
            shapes,
            outcomes,
            events,
        }
    }
}

/// Replay a whole script.
pub fn run(script: &Script, config: AuthoringConfig) -> Report {
    let mut replay = Replay::new(script, config);
    for step in &script.steps {
        replay.step(step);
    }
    replay.finish()
}
