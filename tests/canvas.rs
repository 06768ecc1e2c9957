use scribble_notes::canvas::render::{HIGHLIGHT_WIDTH, PEN_WIDTH, line_width};
use scribble_notes::{CanvasSession, HexColor, Point, Stroke, Tool};

fn draw(canvas: &mut CanvasSession, from: (f32, f32), to: (f32, f32)) -> bool {
    canvas.begin_stroke(Point::new(from.0, from.1));
    canvas.extend_stroke(Point::new(to.0, to.1));
    canvas.commit_stroke()
}

#[test]
fn undo_all_then_redo_all_restores_order() {
    let mut canvas = CanvasSession::new((50, 50));
    for i in 0..4 {
        let y = i as f32 * 10.0;
        assert!(draw(&mut canvas, (0.0, y), (40.0, y)));
    }
    let original: Vec<Stroke> = canvas.history().committed().to_vec();

    for _ in 0..4 {
        assert!(canvas.undo());
    }
    assert!(!canvas.undo());
    assert!(canvas.history().committed().is_empty());
    let reversed: Vec<Stroke> = original.iter().rev().cloned().collect();
    assert_eq!(canvas.history().undone(), reversed.as_slice());

    for _ in 0..4 {
        assert!(canvas.redo());
    }
    assert!(!canvas.redo());
    assert_eq!(canvas.history().committed(), original.as_slice());
    assert!(canvas.history().undone().is_empty());
}

#[test]
fn example_two_strokes_one_undo() {
    let mut canvas = CanvasSession::new((20, 20));
    draw(&mut canvas, (0.0, 0.0), (5.0, 5.0));
    draw(&mut canvas, (10.0, 10.0), (15.0, 15.0));
    let s1 = canvas.history().committed()[0].clone();
    let s2 = canvas.history().committed()[1].clone();

    canvas.undo();
    assert_eq!(canvas.history().committed(), std::slice::from_ref(&s1));
    assert_eq!(canvas.history().undone(), std::slice::from_ref(&s2));

    canvas.redo();
    assert_eq!(canvas.history().committed(), [s1, s2].as_slice());
    assert!(canvas.history().undone().is_empty());
}

#[test]
fn new_stroke_invalidates_redo() {
    let mut canvas = CanvasSession::new((20, 20));
    draw(&mut canvas, (0.0, 0.0), (5.0, 5.0));
    draw(&mut canvas, (0.0, 5.0), (5.0, 10.0));
    canvas.undo();
    canvas.undo();
    assert_eq!(canvas.history().undone().len(), 2);

    draw(&mut canvas, (1.0, 1.0), (2.0, 2.0));
    assert!(canvas.history().undone().is_empty());
    assert!(!canvas.redo());
    assert_eq!(canvas.history().committed().len(), 1);
}

#[test]
fn click_without_drag_is_still_a_stroke_but_draws_nothing() {
    let mut canvas = CanvasSession::new((10, 10));
    canvas.begin_stroke(Point::new(5.0, 5.0));
    assert!(canvas.commit_stroke());
    assert_eq!(canvas.history().committed()[0].path().len(), 1);
    assert!(canvas.render().pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn commit_closes_the_buffer() {
    let mut canvas = CanvasSession::new((10, 10));
    draw(&mut canvas, (0.0, 0.0), (9.0, 9.0));
    assert!(!canvas.is_drawing());
    assert!(!canvas.extend_stroke(Point::new(1.0, 1.0)));
    assert!(!canvas.commit_stroke());
    assert_eq!(canvas.history().committed().len(), 1);
}

#[test]
fn undo_removes_stroke_from_render() {
    let mut canvas = CanvasSession::new((20, 20));
    canvas.set_color(HexColor::from_rgb(0, 128, 0));
    draw(&mut canvas, (0.0, 10.0), (19.0, 10.0));
    assert_eq!(canvas.render().get_pixel(10, 10).0, [0, 128, 0, 255]);

    canvas.undo();
    assert!(canvas.take_redraw());
    assert_eq!(canvas.render().get_pixel(10, 10).0, [255, 255, 255, 255]);

    canvas.redo();
    assert!(canvas.take_redraw());
    assert_eq!(canvas.render().get_pixel(10, 10).0, [0, 128, 0, 255]);
}

#[test]
fn eraser_cuts_through_background() {
    let mut canvas = CanvasSession::new((20, 20));
    canvas.set_background(HexColor::from_rgb(10, 20, 30));
    canvas.set_tool(Tool::Erase);
    draw(&mut canvas, (0.0, 10.0), (19.0, 10.0));

    let img = canvas.render();
    assert_eq!(img.get_pixel(10, 10).0[3], 0);
    assert_eq!(img.get_pixel(10, 2).0, [10, 20, 30, 255]);
}

#[test]
fn width_depends_only_on_tool() {
    assert_eq!(line_width(Tool::Highlight), HIGHLIGHT_WIDTH);
    assert_eq!(line_width(Tool::Pen), PEN_WIDTH);
    assert_eq!(line_width(Tool::Erase), PEN_WIDTH);
    assert!(HIGHLIGHT_WIDTH > PEN_WIDTH);
}

#[test]
fn stroke_dragged_far_off_canvas_still_renders() {
    let mut canvas = CanvasSession::new((20, 10));
    canvas.begin_stroke(Point::new(-3.0e9, 5.0));
    canvas.extend_stroke(Point::new(3.0e9, 5.0));
    assert_eq!(canvas.render().get_pixel(10, 5).0, [0, 0, 0, 255]);
    assert!(canvas.commit_stroke());
    assert_eq!(canvas.render().get_pixel(10, 5).0, [0, 0, 0, 255]);
}

#[test]
fn hex_color_input_is_validated() {
    let mut canvas = CanvasSession::new((20, 10));
    assert!(canvas.set_color_hex("not a color").is_err());
    assert_eq!(canvas.color(), HexColor::BLACK);
    canvas.set_color_hex("#00ff00").unwrap();
    draw(&mut canvas, (0.0, 5.0), (19.0, 5.0));
    assert_eq!(canvas.render().get_pixel(10, 5).0, [0, 255, 0, 255]);
}
