use egui::{pos2, vec2, Pos2, Rect};
use icon_editor::config::EditorConfig;
use icon_editor::geometry::Point;
use icon_editor::input::{hit_test, InputEvent, PointerTarget};
use icon_editor::renderer::canvas_document;
use icon_editor::shape::{find_open_shape_index, Shape};
use icon_editor::state::{DrawMode, DrawStateMachine, VertexRef};

fn canvas() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(512.0, 512.0))
}

// Press and release at the same spot, the way a plain click arrives
fn click(machine: &mut DrawStateMachine, shapes: &[Shape], viewport: &Rect, at: Pos2) -> Vec<Shape> {
    let config = EditorConfig::default();
    let doc = canvas_document(shapes, machine.mode(), machine.cursor(), &config);
    let target = hit_test(&doc, viewport, at);

    let mut current = shapes.to_vec();
    for event in [
        InputEvent::PointerMove { position: at },
        InputEvent::PointerDown { position: at, target },
        InputEvent::PointerUp { position: at },
    ] {
        if let Some(next) = machine.handle_event(&event, &current, viewport) {
            current = next;
        }
    }
    current
}

fn open_shape_count(shapes: &[Shape]) -> usize {
    shapes.iter().filter(|shape| shape.is_open()).count()
}

#[test]
fn test_draw_and_close_triangle() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();
    assert_eq!(machine.mode(), DrawMode::Ready);

    let shapes = click(&mut machine, &[], &viewport, pos2(10.0, 10.0));
    assert_eq!(shapes, vec![Shape::new(vec![Point::new(10.0, 10.0)])]);
    assert_eq!(machine.mode(), DrawMode::Drawing);

    let shapes = click(&mut machine, &shapes, &viewport, pos2(100.0, 10.0));
    assert_eq!(shapes[0].points, vec![Point::new(10.0, 10.0), Point::new(100.0, 10.0)]);
    assert_eq!(machine.mode(), DrawMode::Drawing);

    // About 2.2 away from the first point, so this closes the shape
    let shapes = click(&mut machine, &shapes, &viewport, pos2(12.0, 11.0));
    assert_eq!(
        shapes[0].points,
        vec![Point::new(10.0, 10.0), Point::new(100.0, 10.0), Point::new(10.0, 10.0)]
    );
    assert!(shapes[0].is_closed());
    assert_eq!(machine.mode(), DrawMode::Ready);
}

#[test]
fn test_next_click_after_closing_starts_new_shape() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();
    let mut shapes = Vec::new();
    for at in [pos2(10.0, 10.0), pos2(100.0, 10.0), pos2(100.0, 100.0), pos2(11.0, 10.0)] {
        shapes = click(&mut machine, &shapes, &viewport, at);
    }
    assert_eq!(shapes.len(), 1);
    assert!(shapes[0].is_closed());

    shapes = click(&mut machine, &shapes, &viewport, pos2(300.0, 300.0));
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[1].points, vec![Point::new(300.0, 300.0)]);
    assert_eq!(find_open_shape_index(&shapes), Some(1));
    assert_eq!(machine.mode(), DrawMode::Drawing);
}

#[test]
fn test_at_most_one_open_shape() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();
    let mut shapes = Vec::new();

    let clicks = [
        (20.0, 20.0), (200.0, 20.0), (200.0, 200.0), (22.0, 22.0),
        (300.0, 300.0), (400.0, 300.0), (305.0, 302.0),
        (50.0, 400.0), (60.0, 480.0), (120.0, 450.0),
    ];
    for (x, y) in clicks {
        shapes = click(&mut machine, &shapes, &viewport, pos2(x, y));
        assert!(open_shape_count(&shapes) <= 1, "more than one open shape: {shapes:?}");
        assert_eq!(machine.mode().is_drawing(), find_open_shape_index(&shapes).is_some());
    }
    assert_eq!(shapes.len(), 3);
    assert!(shapes[0].is_closed());
    assert!(shapes[1].is_closed());
    assert!(shapes[2].is_open());
}

#[test]
fn test_release_outside_canvas_is_ignored() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();

    assert!(machine
        .handle_event(&InputEvent::PointerUp { position: pos2(600.0, 10.0) }, &[], &viewport)
        .is_none());
    assert_eq!(machine.mode(), DrawMode::Ready);

    let shapes = click(&mut machine, &[], &viewport, pos2(10.0, 10.0));
    assert!(machine
        .handle_event(&InputEvent::PointerUp { position: pos2(-1.0, 10.0) }, &shapes, &viewport)
        .is_none());
    assert_eq!(machine.mode(), DrawMode::Drawing);
}

#[test]
fn test_release_on_canvas_edge_counts() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();
    let shapes = machine
        .handle_event(&InputEvent::PointerUp { position: pos2(512.0, 0.0) }, &[], &viewport)
        .unwrap();
    assert_eq!(shapes[0].points, vec![Point::new(512.0, 0.0)]);
}

#[test]
fn test_drag_closed_start_point_keeps_shape_closed() {
    let viewport = canvas();
    let shapes = vec![Shape::new(vec![
        Point::new(10.0, 10.0),
        Point::new(100.0, 10.0),
        Point::new(100.0, 100.0),
        Point::new(10.0, 10.0),
    ])];
    let mut machine = DrawStateMachine::default();

    let doc = canvas_document(&shapes, machine.mode(), machine.cursor(), &EditorConfig::default());
    let target = hit_test(&doc, &viewport, pos2(11.0, 9.0));
    // The repeated end point is drawn last, so it is the one hit
    assert_eq!(
        target,
        PointerTarget::VertexHandle(VertexRef { shape_index: 0, vertex_index: 3 })
    );

    assert!(machine
        .handle_event(&InputEvent::PointerDown { position: pos2(11.0, 9.0), target }, &shapes, &viewport)
        .is_none());
    assert!(machine.mode().is_dragging());

    let moved = machine
        .handle_event(&InputEvent::PointerMove { position: pos2(40.0, 50.0) }, &shapes, &viewport)
        .unwrap();
    assert_eq!(moved[0].points[0], Point::new(40.0, 50.0));
    assert_eq!(moved[0].points[3], Point::new(40.0, 50.0));
    assert!(moved[0].is_closed());

    // Releasing ends the drag without adding a vertex
    assert!(machine
        .handle_event(&InputEvent::PointerUp { position: pos2(40.0, 50.0) }, &moved, &viewport)
        .is_none());
    assert_eq!(machine.mode(), DrawMode::Ready);
}

#[test]
fn test_drag_ends_even_outside_canvas() {
    let viewport = canvas();
    let shapes = vec![Shape::new(vec![Point::new(10.0, 10.0), Point::new(100.0, 10.0)])];
    let mut machine = DrawStateMachine::default();
    let target = PointerTarget::VertexHandle(VertexRef { shape_index: 0, vertex_index: 1 });

    machine.handle_event(&InputEvent::PointerDown { position: pos2(100.0, 10.0), target }, &shapes, &viewport);
    let moved = machine
        .handle_event(&InputEvent::PointerMove { position: pos2(700.0, 10.0) }, &shapes, &viewport)
        .unwrap();
    // Moving the open end leaves the start alone
    assert_eq!(moved[0].points, vec![Point::new(10.0, 10.0), Point::new(700.0, 10.0)]);

    assert!(machine
        .handle_event(&InputEvent::PointerUp { position: pos2(700.0, 10.0) }, &moved, &viewport)
        .is_none());
    assert_eq!(machine.mode(), DrawMode::Ready);
}

#[test]
fn test_pointer_down_ignored_while_drawing() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();
    let shapes = click(&mut machine, &[], &viewport, pos2(10.0, 10.0));

    let target = PointerTarget::VertexHandle(VertexRef { shape_index: 0, vertex_index: 0 });
    machine.handle_event(&InputEvent::PointerDown { position: pos2(10.0, 10.0), target }, &shapes, &viewport);
    assert_eq!(machine.mode(), DrawMode::Drawing);
}

#[test]
fn test_pointer_down_on_background_stays_ready() {
    let viewport = canvas();
    let mut machine = DrawStateMachine::default();
    let event = InputEvent::PointerDown {
        position: pos2(50.0, 50.0),
        target: PointerTarget::CanvasBackground,
    };
    assert!(machine.handle_event(&event, &[], &viewport).is_none());
    assert_eq!(machine.mode(), DrawMode::Ready);
}

#[test]
fn test_offset_canvas_maps_to_local_coordinates() {
    let viewport = Rect::from_min_size(pos2(100.0, 50.0), vec2(512.0, 512.0));
    let mut machine = DrawStateMachine::default();

    let shapes = click(&mut machine, &[], &viewport, pos2(110.0, 60.0));
    assert_eq!(shapes[0].points, vec![Point::new(10.0, 10.0)]);
    assert_eq!(machine.cursor(), Point::new(10.0, 10.0));

    // Left of the offset canvas
    let unchanged = click(&mut machine, &shapes, &viewport, pos2(50.0, 60.0));
    assert_eq!(unchanged, shapes);
}

#[test]
fn test_resync_follows_loaded_shapes() {
    let mut machine = DrawStateMachine::default();
    machine.resync(&[Shape::new(vec![Point::new(1.0, 1.0)])]);
    assert_eq!(machine.mode(), DrawMode::Drawing);

    machine.resync(&[]);
    assert_eq!(machine.mode(), DrawMode::Ready);
}
