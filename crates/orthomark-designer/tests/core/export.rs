use orthomark_core::{AffineTransform, Bounds, Point};
use orthomark_designer::{
    CancelPrompt, ExportOptions, PointerButton, Reply, ScriptedPrompt, Session, SessionCommand,
    SessionOptions, ToolKind,
};

fn session() -> Session {
    let mut session = Session::new(SessionOptions {
        export: ExportOptions {
            dpi: 20,
            ..Default::default()
        },
        ..Default::default()
    });
    session.load_transform(AffineTransform::north_up(500_000.0, 3_500_000.0, 0.1, 0.1));

    session.start_tool(ToolKind::Line);
    for (x, y) in [(100.0, 100.0), (400.0, 100.0)] {
        session.pointer_down(Point::new(x, y), PointerButton::Primary, &mut CancelPrompt);
    }
    session.start_tool(ToolKind::Polygon);
    for (x, y) in [(100.0, 200.0), (300.0, 200.0), (300.0, 400.0)] {
        session.pointer_down(Point::new(x, y), PointerButton::Primary, &mut CancelPrompt);
    }
    session.start_tool(ToolKind::CoordinatePick);
    session.pointer_down(
        Point::new(250.0, 250.0),
        PointerButton::Primary,
        &mut ScriptedPrompt::new().confirm("控制点", "屋顶"),
    );
    session.stop_tool();
    session
}

#[test]
fn test_png_size_follows_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.png");
    let mut session = session();
    session.set_view(Bounds::new(0.0, 0.0, 500.0, 250.0));

    let size = session.export_png(&path).unwrap();
    assert_eq!(size, (200, 100));
    let image = image::open(&path).unwrap();
    assert_eq!(image.width(), 200);
    assert_eq!(image.height(), 100);
}

#[test]
fn test_dxf_layers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.dxf");
    let session = session();

    // one line, one polygon, one survey label
    assert_eq!(session.export_dxf(&path).unwrap(), 3);
    let drawing = dxf::Drawing::load_file(&path).unwrap();
    let mut layers: Vec<String> = drawing
        .entities()
        .map(|e| e.common.layer.clone())
        .collect();
    layers.sort();
    assert_eq!(layers, vec!["LABELS", "LINES", "POLYGONS"]);
}

#[test]
fn test_coords_csv_via_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coords.csv");
    let mut session = session();

    let reply = session
        .apply(SessionCommand::ExportCoords(path.clone()), &mut CancelPrompt)
        .unwrap();
    assert!(matches!(reply, Reply::Exported { .. }));

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "序号,测点类型,纬度,经度,海拔高程,测点说明");
    assert!(lines[1].starts_with("1,控制点,"));
    assert!(lines[1].ends_with(",0.000,屋顶"));
}
