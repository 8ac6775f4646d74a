use orthomark_core::{AffineTransform, Crs, Point};
use orthomark_designer::{
    CancelPrompt, Commit, PointerButton, Session, SessionOptions, ToolKind, ToolOutcome,
};

fn click(session: &mut Session, x: f64, y: f64) -> ToolOutcome {
    session.pointer_down(Point::new(x, y), PointerButton::Primary, &mut CancelPrompt)
}

fn line(session: &mut Session, from: (f64, f64), to: (f64, f64)) {
    session.start_tool(ToolKind::Line);
    click(session, from.0, from.1);
    click(session, to.0, to.1);
    session.stop_tool();
}

/// A click near an existing endpoint starts the new line on that endpoint
#[test]
fn test_line_start_snaps_to_endpoint() {
    let mut session = Session::default();
    line(&mut session, (0.0, 0.0), (100.0, 0.0));
    line(&mut session, (3.0, 1.0), (50.0, 50.0));

    let lines: Vec<_> = session.document().shapes.lines().map(|(_, l)| *l).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].p1, Point::new(0.0, 0.0));
    assert_eq!(lines[1].p2, Point::new(50.0, 50.0));
}

#[test]
fn test_line_tool_chains_segments() {
    let mut session = Session::default();
    session.start_tool(ToolKind::Line);
    click(&mut session, 0.0, 0.0);
    click(&mut session, 100.0, 0.0);
    click(&mut session, 100.0, 100.0);
    assert_eq!(session.document().shapes.lines().count(), 2);

    let second = session.document().shapes.lines().nth(1).map(|(_, l)| *l).unwrap();
    assert_eq!(second.p1, Point::new(100.0, 0.0));
}

#[test]
fn test_escape_drops_line_preview() {
    let mut session = Session::default();
    session.start_tool(ToolKind::Line);
    click(&mut session, 10.0, 10.0);
    session.pointer_move(Point::new(80.0, 80.0));
    assert!(session.draft().is_some());

    session.stop_tool();
    assert!(session.document().shapes.is_empty());
    assert!(session.draft().is_none());
    assert_eq!(session.active_tool(), None);
}

#[test]
fn test_polygon_needs_three_vertices() {
    let mut session = Session::default();
    session.start_tool(ToolKind::Polygon);
    click(&mut session, 0.0, 0.0);
    click(&mut session, 10.0, 0.0);
    let outcome = session.pointer_down(
        Point::new(0.0, 0.0),
        PointerButton::Secondary,
        &mut CancelPrompt,
    );
    assert_eq!(outcome, ToolOutcome::Discarded);

    session.start_tool(ToolKind::Polygon);
    click(&mut session, 0.0, 0.0);
    click(&mut session, 10.0, 0.0);
    click(&mut session, 10.0, 10.0);
    let outcome = session.pointer_down(
        Point::new(0.0, 0.0),
        PointerButton::Secondary,
        &mut CancelPrompt,
    );
    assert!(matches!(outcome, ToolOutcome::Committed(Commit::Polygon(_))));

    let polygons: Vec<_> = session.document().shapes.polygons().collect();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].1.vertices().len(), 3);
}

/// Erasing a line takes the coordinate label on its endpoint with it
#[test]
fn test_erase_cascades_to_labels() {
    let mut session = Session::default();
    session.load_transform(AffineTransform::north_up(500_000.0, 3_500_000.0, 0.1, 0.1));
    line(&mut session, (0.0, 0.0), (100.0, 0.0));

    session.start_tool(ToolKind::PointCoordinate);
    let outcome = click(&mut session, 100.0, 0.0);
    assert_eq!(
        outcome,
        ToolOutcome::Committed(Commit::CoordinateLabel { raw_pixels: false })
    );
    assert_eq!(session.document().shapes.labels().len(), 1);

    session.start_tool(ToolKind::Erase);
    let outcome = click(&mut session, 98.0, 1.0);
    assert!(matches!(outcome, ToolOutcome::Committed(Commit::Erased(_))));
    assert!(session.document().shapes.is_empty());
    assert!(session.document().shapes.labels().is_empty());
}

/// A position the CRS cannot reproject still gets a label, in raw pixels
#[test]
fn test_point_coordinate_falls_back_to_pixels() {
    let mut session = Session::default();
    // Northing far outside any Gauss-Krüger zone
    session.load_transform(AffineTransform::north_up(500_000.0, 1e12, 0.1, 0.1));
    session.start_tool(ToolKind::PointCoordinate);

    let outcome = click(&mut session, 1.0, 1.0);
    assert_eq!(
        outcome,
        ToolOutcome::Committed(Commit::CoordinateLabel { raw_pixels: true })
    );
    let labels = session.document().shapes.labels();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "X: 1.0000\nY: 1.0000");
    assert_eq!(session.active_tool(), Some(ToolKind::PointCoordinate));
}

#[test]
fn test_erase_misses_outside_threshold() {
    let mut session = Session::default();
    line(&mut session, (0.0, 0.0), (100.0, 0.0));
    session.start_tool(ToolKind::Erase);
    // the segment interior is not a target, only endpoints are
    click(&mut session, 50.0, 0.0);
    assert_eq!(session.document().shapes.len(), 1);
}

#[test]
fn test_dimension_units() {
    let mut session = Session::default();
    session.start_tool(ToolKind::Dimension);
    click(&mut session, 0.0, 0.0);
    assert_eq!(
        click(&mut session, 3.0, 4.0),
        ToolOutcome::Committed(Commit::Dimension("5.00 px".into()))
    );

    session.load_transform(AffineTransform::north_up(500_000.0, 3_500_000.0, 2.0, 2.0));
    click(&mut session, 0.0, 0.0);
    assert_eq!(
        click(&mut session, 3.0, 4.0),
        ToolOutcome::Committed(Commit::Dimension("10.00 m".into()))
    );
    assert_eq!(session.document().dimensions().len(), 2);
}

#[test]
fn test_dimension_on_geographic_raster_stays_in_pixels() {
    let mut session = Session::new(SessionOptions {
        source_crs: Crs::CGCS2000,
        ..SessionOptions::default()
    });
    session.load_transform(AffineTransform::north_up(117.0, 31.0, 0.0001, 0.0001));
    session.start_tool(ToolKind::Dimension);
    click(&mut session, 0.0, 0.0);
    assert_eq!(
        click(&mut session, 3.0, 4.0),
        ToolOutcome::Committed(Commit::Dimension("5.00 px".into()))
    );
}

#[test]
fn test_clear_shapes_is_idempotent() {
    let mut session = Session::default();
    line(&mut session, (0.0, 0.0), (100.0, 0.0));
    assert_eq!(session.clear_shapes(), 1);
    assert_eq!(session.clear_shapes(), 0);
    assert!(session.document().shapes.is_empty());
}

#[test]
fn test_clear_polygons_keeps_lines() {
    let mut session = Session::default();
    line(&mut session, (0.0, 0.0), (100.0, 0.0));
    session.start_tool(ToolKind::Polygon);
    for (x, y) in [(200.0, 200.0), (300.0, 200.0), (300.0, 300.0)] {
        click(&mut session, x, y);
    }
    session.stop_tool();

    assert_eq!(session.clear_polygons(), 1);
    assert_eq!(session.document().shapes.lines().count(), 1);
}

#[test]
fn test_new_lines_use_current_colour() {
    let mut session = Session::default();
    session.set_color("green").unwrap();
    line(&mut session, (0.0, 0.0), (100.0, 0.0));
    let (_, l) = session.document().shapes.lines().next().unwrap();
    assert_eq!(l.color.name(), "green");
}
