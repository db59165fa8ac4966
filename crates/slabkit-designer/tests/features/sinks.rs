use slabkit_core::Point;
use slabkit_designer::model::{Piece, Sink, SinkSide};
use slabkit_designer::sink_placement::{
    faucet_holes, faucet_holes_on_canvas, sink_center, sink_center_on_canvas, sink_pose,
};

const EPS: f64 = 1e-9;

fn sink(side: SinkSide, centerline: f64, setback: f64, h: f64) -> Sink {
    let mut sink = Sink::new("s");
    sink.make_custom();
    sink.set_size(20.0, h);
    sink.side = side;
    sink.centerline = centerline;
    sink.set_setback(setback);
    sink
}

#[test]
fn test_front_and_left_centres() {
    let front = sink(SinkSide::Front, 20.0, 3.0, 17.0);
    assert_eq!(sink_center(60.0, 30.0, &front), Point::new(20.0, 11.5));

    let left = sink(SinkSide::Left, 12.0, 3.0, 17.0);
    assert_eq!(sink_center(60.0, 30.0, &left), Point::new(11.5, 12.0));

    let piece = Piece::new("p", "P", 60.0, 30.0);
    assert_eq!(sink_pose(&piece, &front).local_angle, 0.0);
    assert_eq!(sink_pose(&piece, &left).local_angle, 90.0);
}

#[test]
fn test_back_and_right_measure_from_far_edge() {
    let back = sink(SinkSide::Back, 30.0, 3.125, 17.0);
    let c = sink_center(60.0, 30.0, &back);
    assert!((c.y - (30.0 - 3.125 - 8.5)).abs() < EPS);

    let right = sink(SinkSide::Right, 15.0, 2.0, 10.0);
    assert_eq!(sink_center(60.0, 30.0, &right), Point::new(53.0, 15.0));
}

#[test]
fn test_all_faucet_slots_are_symmetric() {
    let mut s = sink(SinkSide::Front, 20.0, 3.0, 17.0);
    s.set_faucets(0..=8).unwrap();
    let offsets: Vec<f64> = faucet_holes(&s).iter().map(|h| h.center.x).collect();
    assert_eq!(
        offsets,
        vec![-8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0]
    );
}

#[test]
fn test_sink_follows_piece_on_canvas() {
    let mut piece = Piece::new("p", "P", 60.0, 30.0);
    piece.x = 10.0;
    piece.y = 10.0;
    let s = sink(SinkSide::Front, 20.0, 3.0, 17.0);
    assert_eq!(sink_center_on_canvas(&piece, &s), Point::new(30.0, 21.5));
}

#[test]
fn test_faucet_distance_survives_rotation() {
    let mut piece = Piece::new("p", "P", 60.0, 30.0);
    piece.add_sink(sink(SinkSide::Back, 30.0, 3.0, 10.0)).unwrap();
    for rotation in [0.0, 30.0, 90.0, 215.0] {
        piece.set_rotation(rotation);
        let s = &piece.sinks[0];
        let center = sink_center_on_canvas(&piece, s);
        let holes = faucet_holes_on_canvas(&piece, s);
        assert_eq!(holes.len(), 1);
        // hole row sits half the sink depth plus the backset from the centre
        assert!((holes[0].distance_to(&center) - 7.5).abs() < 1e-6);
        assert!(piece.contains_point(holes[0]));
    }
}

#[test]
fn test_resize_pulls_centerlines_onto_edges() {
    let mut piece = Piece::new("p", "P", 60.0, 30.0);
    piece.add_sink(sink(SinkSide::Front, 50.0, 3.0, 10.0)).unwrap();
    piece.add_sink(sink(SinkSide::Left, 25.0, 3.0, 10.0)).unwrap();
    piece.set_size(40.0, 20.0);
    piece.clamp_sink_centerlines();
    assert_eq!(piece.sinks[0].centerline, 40.0);
    assert_eq!(piece.sinks[1].centerline, 20.0);
}

#[test]
fn test_editor_resize_keeps_sinks_on_piece() {
    let mut editor = slabkit_designer::Editor::new();
    let id = editor.add_piece();
    editor.set_piece_size(&id, 60.0, 30.0).unwrap();
    editor.add_sink(&id).unwrap();
    editor.set_sink_centerline(&id, 0, 55.0).unwrap();
    editor.set_piece_size(&id, 36.0, 30.0).unwrap();
    let piece = editor.layout().piece(&id).unwrap();
    assert_eq!(piece.sinks[0].centerline, 36.0);
}
