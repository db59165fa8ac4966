use slabkit_core::Point;
use slabkit_designer::mask_raster::{encode_png, rasterize_mask};
use slabkit_designer::model::{Layout, Piece, Sink, SinkShape, SinkSide};
use slabkit_designer::overlay_mask::{build_overlay_clip, build_overlay_mask, MaskPaint};

/// 60×30 piece at (10, 10) with a 20×10 front sink centred at (40, 18).
fn kitchen() -> Layout {
    let mut layout = Layout::new("l", "Layout 1");
    layout.scale = 1.0;
    let mut piece = Piece::new("p", "Run", 60.0, 30.0);
    piece.x = 10.0;
    piece.y = 10.0;
    let mut sink = Sink::new("s");
    sink.make_custom();
    sink.shape = SinkShape::Rect;
    sink.set_size(20.0, 10.0);
    sink.set_corner_radius(0.0);
    sink.side = SinkSide::Front;
    sink.centerline = 30.0;
    sink.set_setback(3.0);
    piece.add_sink(sink).unwrap();
    layout.insert_piece(piece);
    layout
}

#[test]
fn test_mask_reveals_piece_and_hides_cutouts() {
    let mask = build_overlay_mask(&kitchen());
    assert_eq!(mask.count(MaskPaint::Reveal), 1);
    assert_eq!(mask.count(MaskPaint::Hide), 2);

    assert!(mask.coverage_at(Point::new(15.0, 35.0)));
    assert!(!mask.coverage_at(Point::new(40.0, 18.0)));
    assert!(!mask.coverage_at(Point::new(40.0, 10.5)));
    assert!(!mask.coverage_at(Point::new(5.0, 5.0)));
}

#[test]
fn test_clip_keeps_cutouts_visible() {
    let clip = build_overlay_clip(&kitchen());
    assert_eq!(clip.count(MaskPaint::Hide), 0);
    assert!(clip.coverage_at(Point::new(40.0, 18.0)));
}

#[test]
fn test_empty_layout_hides_everything() {
    let mask = build_overlay_mask(&Layout::new("l", "Empty"));
    assert!(mask.is_empty());
    assert!(!mask.coverage_at(Point::new(10.0, 10.0)));
}

#[test]
fn test_raster_matches_geometry() {
    let mask = build_overlay_mask(&kitchen());
    let image = rasterize_mask(&mask).unwrap();
    assert_eq!(image.dimensions(), (180, 120));
    assert_eq!(image.get_pixel(15, 35).0[0], 255);
    assert_eq!(image.get_pixel(40, 18).0[0], 0);
    assert_eq!(image.get_pixel(100, 100).0[0], 0);

    let png = encode_png(&image).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}
