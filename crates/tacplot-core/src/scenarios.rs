//! End-to-end authoring scenarios through the facade.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};

use crate::error::SessionError;
use crate::events::{EventKind, InteractionEvent};
use crate::geo::GeoPoint;
use crate::layer::{Layer, MemoryLayer};
use crate::session::DrawOptions;
use crate::shapes::{ShapeDescriptor, ShapeKind, ShapeParameters, StraightArrowParams};
use crate::viewport::OffscreenViewport;
use crate::{Authoring, AuthoringConfig, PointerEvent};

type Engine = Authoring<OffscreenViewport, MemoryLayer>;

fn engine() -> Engine {
    Authoring::new(
        OffscreenViewport::new(),
        MemoryLayer::new(),
        AuthoringConfig::default(),
    )
}

fn record(engine: &mut Engine, kind: ShapeKind, events: &[EventKind]) -> Rc<RefCell<Vec<InteractionEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for &event in events {
        let log = log.clone();
        engine.subscribe(
            kind,
            event,
            Box::new(move |e| {
                log.borrow_mut().push(e.clone());
                Ok(())
            }),
        );
    }
    log
}

fn clicks(engine: &mut Engine, points: &[(f64, f64)]) {
    for &(x, y) in points {
        engine.handle_pointer(PointerEvent::click(x, y));
    }
}

/// Nothing left behind by a finished or aborted session.
fn assert_clean(engine: &Engine) {
    assert!(!engine.gate().is_busy());
    assert!(!engine.has_input_handler());
    assert!(engine.viewport().is_navigation_enabled());
    assert_eq!(engine.viewport().primitive_count(), 0);
}

fn stored(engine: &mut Engine, kind: ShapeKind, points: &[(f64, f64)]) -> ShapeDescriptor {
    let points = points.iter().map(|&p| GeoPoint::from(p)).collect();
    let shape = ShapeDescriptor::create(kind, points, ShapeParameters::default_for(kind)).unwrap();
    engine.layer_mut().save(shape.id, shape.clone()).unwrap();
    shape
}

#[test]
fn test_polygon_scenario() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    clicks(&mut engine, &[(100.0, 30.0), (101.0, 30.0), (100.0, 31.0)]);
    engine.handle_pointer(PointerEvent::right_click(100.0, 31.0));

    let shape = result.try_take().unwrap().unwrap();
    let expected: Vec<GeoPoint> = [(100.0, 30.0), (101.0, 30.0), (100.0, 31.0)]
        .into_iter()
        .map(GeoPoint::from)
        .collect();
    assert_eq!(shape.control_points, expected);
    assert!(shape.outline.closed);
    assert_eq!(engine.layer().get(shape.id), Some(&shape));
    assert_clean(&engine);
}

#[test]
fn test_polygon_with_two_points_is_rejected() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    clicks(&mut engine, &[(100.0, 30.0), (101.0, 30.0)]);
    engine.handle_pointer(PointerEvent::moved(100.5, 31.0));
    engine.handle_pointer(PointerEvent::right_click(100.5, 31.0));

    let err = result.try_take().unwrap().unwrap_err();
    assert!(matches!(err, SessionError::InsufficientPoints { actual: 2, .. }));
    assert!(err.to_string().contains("at least three vertexes"));
    assert!(engine.layer().is_empty());
    assert_clean(&engine);
}

#[test]
fn test_minimum_points_per_kind() {
    let cases = [
        (ShapeKind::Polyline, 1),
        (ShapeKind::Wall, 1),
        (ShapeKind::Polygon, 2),
        (ShapeKind::AttackArrow, 2),
        (ShapeKind::PincerArrow, 2),
        (ShapeKind::StraightArrow, 1),
    ];
    for (kind, count) in cases {
        let mut engine = engine();
        let mut result = engine.draw(kind, DrawOptions::default());
        let points: Vec<_> = (0..count).map(|i| (i as f64, i as f64 * 0.5)).collect();
        clicks(&mut engine, &points);
        engine.handle_pointer(PointerEvent::right_click(50.0, 50.0));
        assert!(
            matches!(result.try_take(), Some(Err(SessionError::InsufficientPoints { .. }))),
            "{kind} finished with {count} points"
        );
        assert_clean(&engine);
    }
}

#[test]
fn test_straight_arrow_scenario() {
    let mut engine = engine();
    let params = ShapeParameters::StraightArrow(StraightArrowParams {
        head_angle: std::f64::consts::PI / 8.5,
        neck_angle: std::f64::consts::PI / 13.0,
        ..Default::default()
    });
    let mut result = engine.draw(ShapeKind::StraightArrow, DrawOptions::with_parameters(params));
    engine.handle_pointer(PointerEvent::click(100.0, 30.0));
    engine.handle_pointer(PointerEvent::moved(100.5, 30.5));
    assert_eq!(engine.viewport().outlines().len(), 1);
    engine.handle_pointer(PointerEvent::click(101.0, 31.0));

    // The second click reaches the maximum and finishes on its own.
    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(
        shape.control_points,
        vec![GeoPoint::surface(100.0, 30.0), GeoPoint::surface(101.0, 31.0)]
    );
    assert_eq!(shape.outline.len(), 8);
    assert!(shape.outline.closed);
    let tail = Point::new(100.0, 30.0);
    let tip = Point::new(101.0, 31.0);
    let head = shape.outline.positions[2].planar();
    assert!(head.distance(tip) < head.distance(tail));
    assert_clean(&engine);
}

#[test]
fn test_mutual_exclusion_across_kinds() {
    let mut engine = engine();
    let line = stored(&mut engine, ShapeKind::Polyline, &[(0.0, 0.0), (1.0, 1.0)]);

    let mut polygon = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    clicks(&mut engine, &[(100.0, 30.0)]);
    let holder = engine.active_session();

    for kind in ShapeKind::ALL {
        let mut other = engine.draw(kind, DrawOptions::default());
        assert_eq!(other.try_take(), Some(Err(SessionError::Busy)), "{kind} draw");
    }
    let mut edit = engine.edit(ShapeKind::Polyline, line.id);
    assert_eq!(edit.try_take(), Some(Err(SessionError::Busy)));
    assert_eq!(engine.active_session(), holder);
    assert!(engine.layer().contains(line.id));

    // The polygon session is untouched and still accepts input.
    clicks(&mut engine, &[(101.0, 30.0), (100.0, 31.0)]);
    engine.handle_pointer(PointerEvent::right_click(0.0, 0.0));
    let shape = polygon.try_take().unwrap().unwrap();
    assert_eq!(shape.control_points.len(), 3);
    assert_clean(&engine);
}

#[test]
fn test_edit_blocks_draw() {
    let mut engine = engine();
    let line = stored(&mut engine, ShapeKind::Polyline, &[(0.0, 0.0), (10.0, 0.0)]);
    let _edit = engine.edit(ShapeKind::Polyline, line.id);
    let mut draw = engine.draw(ShapeKind::Point, DrawOptions::default());
    assert_eq!(draw.try_take(), Some(Err(SessionError::Busy)));
}

#[test]
fn test_draw_certain_order() {
    let mut engine = engine();
    let log = record(
        &mut engine,
        ShapeKind::Polyline,
        &[EventKind::DrawCertain, EventKind::DrawMove, EventKind::DrawFinish],
    );
    let mut result = engine.draw(ShapeKind::Polyline, DrawOptions::default());
    let points = [(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)];
    for &(x, y) in &points {
        engine.handle_pointer(PointerEvent::moved(x - 1.0, y - 1.0));
        engine.handle_pointer(PointerEvent::click(x, y));
    }
    engine.handle_pointer(PointerEvent::right_click(0.0, 0.0));
    let shape = result.try_take().unwrap().unwrap();

    let log = log.borrow();
    let certain: Vec<_> = log
        .iter()
        .filter(|e| e.event == EventKind::DrawCertain)
        .map(|e| (e.data.index, e.data.position))
        .collect();
    let expected: Vec<_> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| (Some(i), Some(GeoPoint::from(p))))
        .collect();
    assert_eq!(certain, expected);

    // The first move comes before any anchor and previews nothing.
    let kinds: Vec<_> = log.iter().map(|e| e.event).collect();
    use EventKind::*;
    assert_eq!(
        kinds,
        vec![DrawCertain, DrawMove, DrawCertain, DrawMove, DrawCertain, DrawFinish]
    );
    let finish = log.last().unwrap();
    assert_eq!(finish.data.id, shape.id);
    assert_eq!(finish.data.positions.as_deref(), Some(&shape.control_points[..]));
}

#[test]
fn test_tentative_point_is_not_committed() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    clicks(&mut engine, &[(0.0, 0.0), (10.0, 0.0)]);
    engine.handle_pointer(PointerEvent::moved(7.0, 7.0));
    let preview = engine.viewport().outlines()[0].clone();
    assert!(preview.closed);
    assert!(preview.positions.contains(&GeoPoint::surface(7.0, 7.0)));

    engine.handle_pointer(PointerEvent::click(0.0, 10.0));
    engine.handle_pointer(PointerEvent::moved(3.0, 3.0));
    engine.handle_pointer(PointerEvent::right_click(3.0, 3.0));
    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(
        shape.control_points,
        vec![
            GeoPoint::surface(0.0, 0.0),
            GeoPoint::surface(10.0, 0.0),
            GeoPoint::surface(0.0, 10.0)
        ]
    );
}

#[test]
fn test_off_surface_clicks_are_ignored() {
    let viewport = OffscreenViewport::new().with_extent(Rect::new(0.0, 0.0, 100.0, 100.0));
    let mut engine = Authoring::new(viewport, MemoryLayer::new(), AuthoringConfig::default());
    let log = record(&mut engine, ShapeKind::Polyline, &[EventKind::DrawCertain]);
    let mut result = engine.draw(ShapeKind::Polyline, DrawOptions::default());
    clicks(&mut engine, &[(10.0, 10.0), (-5.0, 10.0), (20.0, 20.0)]);
    engine.handle_pointer(PointerEvent::right_click(0.0, 0.0));

    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(shape.control_points.len(), 2);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_round_trip_edit() {
    let mut engine = engine();
    let original = stored(
        &mut engine,
        ShapeKind::Polygon,
        &[(100.0, 30.0), (110.0, 30.0), (100.0, 40.0)],
    );
    let log = record(
        &mut engine,
        ShapeKind::Polygon,
        &[EventKind::EditMove, EventKind::EditCertain, EventKind::EditFinish],
    );

    let mut result = engine.edit(ShapeKind::Polygon, original.id);
    assert!(!engine.layer().contains(original.id));
    assert_eq!(engine.viewport().marker_count(), 3);
    assert_eq!(engine.viewport().outlines().len(), 1);

    engine.handle_pointer(PointerEvent::down(110.0, 30.0));
    assert!(!engine.viewport().is_navigation_enabled());
    engine.handle_pointer(PointerEvent::moved(112.0, 33.0));
    engine.handle_pointer(PointerEvent::moved(115.0, 35.0));
    engine.handle_pointer(PointerEvent::up(115.0, 35.0));
    assert!(engine.viewport().is_navigation_enabled());
    assert!(result.try_take().is_none());

    // Clicking the moved marker keeps the session open.
    engine.handle_pointer(PointerEvent::click(115.0, 35.0));
    assert!(engine.has_input_handler());

    engine.handle_pointer(PointerEvent::click(300.0, 300.0));
    let edited = result.try_take().unwrap().unwrap();

    let mut expected = original.control_points.clone();
    expected[1] = GeoPoint::surface(115.0, 35.0);
    assert_eq!(edited.id, original.id);
    assert_eq!(edited.control_points, expected);
    assert_eq!(engine.layer().get(original.id), Some(&edited));
    assert_clean(&engine);

    let kinds: Vec<_> = log.borrow().iter().map(|e| (e.event, e.data.index)).collect();
    assert_eq!(
        kinds,
        vec![
            (EventKind::EditMove, Some(1)),
            (EventKind::EditMove, Some(1)),
            (EventKind::EditCertain, Some(1)),
            (EventKind::EditFinish, None),
        ]
    );
}

#[test]
fn test_edit_missing_shape() {
    let mut engine = engine();
    let mut result = engine.edit(ShapeKind::Polygon, uuid::Uuid::new_v4());
    assert!(matches!(result.try_take(), Some(Err(SessionError::NotFound { .. }))));
    assert_clean(&engine);
}

#[test]
fn test_stroke_cannot_be_edited() {
    let mut engine = engine();
    let stroke = stored(&mut engine, ShapeKind::Stroke, &[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0)]);
    let mut result = engine.edit(ShapeKind::Stroke, stroke.id);
    let err = result.try_take().unwrap().unwrap_err();
    assert!(matches!(err, SessionError::Unsupported { kind: ShapeKind::Stroke, .. }));
    assert!(engine.layer().contains(stroke.id));
}

#[test]
fn test_interrupt_is_idempotent() {
    let mut engine = engine();
    assert!(!engine.interrupt(ShapeKind::Polygon));

    let mut result = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    clicks(&mut engine, &[(0.0, 0.0), (10.0, 0.0)]);
    engine.handle_pointer(PointerEvent::moved(5.0, 5.0));
    assert_eq!(engine.viewport().primitive_count(), 1);

    assert!(engine.interrupt(ShapeKind::Polygon));
    assert_eq!(result.try_take(), Some(Err(SessionError::Interrupted)));
    assert_clean(&engine);
    assert!(engine.layer().is_empty());

    // A second interrupt must not release a session started since.
    let _line = engine.draw(ShapeKind::Polyline, DrawOptions::default());
    assert!(!engine.interrupt(ShapeKind::Polygon));
    assert_eq!(engine.active_session().unwrap().kind, ShapeKind::Polyline);
}

#[test]
fn test_interrupt_does_not_end_edits() {
    let mut engine = engine();
    let line = stored(&mut engine, ShapeKind::Polyline, &[(0.0, 0.0), (10.0, 0.0)]);
    let mut result = engine.edit(ShapeKind::Polyline, line.id);
    assert!(!engine.interrupt(ShapeKind::Polyline));
    assert!(engine.has_input_handler());
    engine.handle_pointer(PointerEvent::click(50.0, 50.0));
    assert_eq!(result.try_take().unwrap().unwrap().control_points, line.control_points);
}

#[test]
fn test_abandoned_edit_leaves_shape_stored() {
    let mut engine = engine();
    let original = stored(
        &mut engine,
        ShapeKind::AttackArrow,
        &[(0.0, 0.0), (0.0, 2.0), (10.0, 1.0)],
    );
    let mut result = engine.edit(ShapeKind::AttackArrow, original.id);
    engine.handle_pointer(PointerEvent::down(10.0, 1.0));
    engine.handle_pointer(PointerEvent::moved(12.0, 4.0));
    assert!(!engine.layer().contains(original.id));

    assert!(!engine.interrupt_active());
    assert!(engine.abandon_edit());
    assert_eq!(result.try_take(), Some(Err(SessionError::Abandoned)));
    assert_eq!(engine.layer().get(original.id), Some(&original));
    assert_clean(&engine);
    assert!(!engine.abandon_edit());
}

#[test]
fn test_abandon_edit_ignores_draws() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    assert!(!engine.abandon_edit());
    assert!(engine.has_input_handler());
    assert!(result.try_take().is_none());
}

#[test]
fn test_rectangle_drag() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::Rectangle, DrawOptions::default());
    engine.handle_pointer(PointerEvent::moved(1.0, 1.0));
    assert!(engine.viewport().is_navigation_enabled());

    engine.handle_pointer(PointerEvent::down(0.0, 0.0));
    assert!(!engine.viewport().is_navigation_enabled());
    engine.handle_pointer(PointerEvent::moved(1.0, 1.0));
    engine.handle_pointer(PointerEvent::moved(4.0, 2.0));
    assert_eq!(engine.viewport().outlines()[0].len(), 5);
    engine.handle_pointer(PointerEvent::up(4.0, 2.0));

    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(
        shape.control_points,
        vec![GeoPoint::surface(0.0, 0.0), GeoPoint::surface(4.0, 2.0)]
    );
    assert_eq!(shape.outline.len(), 5);
    assert_clean(&engine);
}

#[test]
fn test_stroke_keeps_every_sample() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::Stroke, DrawOptions::default());
    engine.handle_pointer(PointerEvent::down(0.0, 0.0));
    for x in 1..=5 {
        engine.handle_pointer(PointerEvent::moved(x as f64, (x * x) as f64));
    }
    engine.handle_pointer(PointerEvent::up(6.0, 36.0));
    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(shape.control_points.len(), 7);
    assert!(!shape.outline.closed);
    assert_clean(&engine);
}

#[test]
fn test_pincer_arrow_finishes_at_five_anchors() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::PincerArrow, DrawOptions::default());
    clicks(
        &mut engine,
        &[(0.0, 0.0), (40.0, 0.0), (10.0, 50.0), (30.0, 50.0), (20.0, 5.0)],
    );
    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(shape.control_points.len(), 5);
    assert!(shape.outline.closed);
    assert_clean(&engine);
}

#[test]
fn test_pincer_arrow_with_three_anchors() {
    let mut engine = engine();
    let mut result = engine.draw(ShapeKind::PincerArrow, DrawOptions::default());
    clicks(&mut engine, &[(0.0, 0.0), (40.0, 0.0), (10.0, 50.0)]);
    engine.handle_pointer(PointerEvent::right_click(10.0, 50.0));
    let shape = result.try_take().unwrap().unwrap();
    assert_eq!(shape.control_points.len(), 3);
    let mirrored = Point::new(30.0, 50.0);
    assert!(
        shape
            .outline
            .positions
            .iter()
            .any(|p| p.planar().distance(mirrored) < 1e-9)
    );
}

#[test]
fn test_failing_subscriber_does_not_break_draw() {
    let mut engine = engine();
    engine.subscribe(
        ShapeKind::Point,
        EventKind::DrawFinish,
        Box::new(|_| Err("subscriber failed".into())),
    );
    let log = record(&mut engine, ShapeKind::Point, &[EventKind::DrawFinish]);
    let mut result = engine.draw(ShapeKind::Point, DrawOptions::default());
    engine.handle_pointer(PointerEvent::click(1.0, 1.0));
    assert!(result.try_take().unwrap().is_ok());
    assert_eq!(log.borrow().len(), 1);
    assert_clean(&engine);
}

#[test]
fn test_unsubscribe() {
    let mut engine = engine();
    let log = Rc::new(RefCell::new(0));
    let counter = log.clone();
    let id = engine.subscribe(
        ShapeKind::Point,
        EventKind::DrawCertain,
        Box::new(move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        }),
    );
    let _first = engine.draw(ShapeKind::Point, DrawOptions::default());
    engine.handle_pointer(PointerEvent::click(1.0, 1.0));
    assert!(engine.unsubscribe(ShapeKind::Point, EventKind::DrawCertain, id));
    let _second = engine.draw(ShapeKind::Point, DrawOptions::default());
    engine.handle_pointer(PointerEvent::click(2.0, 2.0));
    assert_eq!(*log.borrow(), 1);
}

#[test]
fn test_dropped_engine_abandons_session() {
    let mut engine = engine();
    let result = engine.draw(ShapeKind::Polygon, DrawOptions::default());
    drop(engine);
    assert_eq!(pollster::block_on(result), Err(SessionError::Abandoned));
}

#[test]
fn test_sequential_draws_reuse_tool() {
    let mut engine = engine();
    for i in 0..3 {
        let result = engine.draw(ShapeKind::Label, DrawOptions::default());
        engine.handle_pointer(PointerEvent::click(i as f64, 0.0));
        assert!(pollster::block_on(result).is_ok());
    }
    assert_eq!(engine.layer().len(), 3);
    assert_eq!(engine.remove(ShapeKind::Label, None).unwrap(), 3);
    assert!(engine.layer().is_empty());
}
