use orthomark_core::{AffineTransform, Point};
use orthomark_designer::{
    CancelPrompt, Commit, Notice, PointerButton, ScriptedPrompt, Session, ToolKind, ToolOutcome,
};

fn loaded_session() -> Session {
    let mut session = Session::default();
    session.load_transform(AffineTransform::north_up(500_000.0, 3_500_000.0, 0.1, 0.1));
    session
}

#[test]
fn test_pick_requires_dataset() {
    let mut session = Session::default();
    session.start_tool(ToolKind::CoordinatePick);
    let outcome = session.pointer_down(
        Point::new(1.0, 1.0),
        PointerButton::Primary,
        &mut ScriptedPrompt::new().confirm("a", "b"),
    );
    assert_eq!(outcome, ToolOutcome::Notice(Notice::NoDataset));
    assert!(session.document().survey_points().is_empty());
}

#[test]
fn test_cancelled_pick_records_nothing() {
    let mut session = loaded_session();
    session.start_tool(ToolKind::CoordinatePick);
    let outcome =
        session.pointer_down(Point::new(1.0, 1.0), PointerButton::Primary, &mut CancelPrompt);
    assert_eq!(outcome, ToolOutcome::Notice(Notice::PromptCancelled));
    assert!(session.document().survey_points().is_empty());
    assert!(session.document().shapes.labels().is_empty());
}

#[test]
fn test_pick_numbers_points_sequentially() {
    let mut session = loaded_session();
    session.start_tool(ToolKind::CoordinatePick);
    let mut prompt = ScriptedPrompt::new()
        .confirm("界址点", "东侧")
        .confirm("", "");

    let first = session.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary, &mut prompt);
    let second = session.pointer_down(Point::new(20.0, 10.0), PointerButton::Primary, &mut prompt);
    assert_eq!(first, ToolOutcome::Committed(Commit::SurveyPoint(1)));
    assert_eq!(second, ToolOutcome::Committed(Commit::SurveyPoint(2)));

    let points = session.document().survey_points();
    assert_eq!(points[0].point_type, "界址点");
    assert_eq!(points[0].altitude_text(), "0.000");
    assert!(points[0].latitude.to_string().ends_with('N'));
    assert!(points[0].longitude.to_string().starts_with("117°"));

    assert_eq!(session.clear_coords(), 2);
    assert!(session.document().survey_points().is_empty());
    assert!(session.document().shapes.labels().is_empty());
}

#[test]
fn test_annotation_requires_both_fields() {
    let mut session = loaded_session();
    session.start_tool(ToolKind::Annotate);
    let mut prompt = ScriptedPrompt::new().confirm("1", "").confirm("1", "排水沟");

    let rejected = session.pointer_down(Point::new(5.0, 5.0), PointerButton::Primary, &mut prompt);
    assert_eq!(rejected, ToolOutcome::Notice(Notice::IncompleteFields));

    let accepted = session.pointer_down(Point::new(5.0, 5.0), PointerButton::Primary, &mut prompt);
    assert_eq!(
        accepted,
        ToolOutcome::Committed(Commit::Annotation { order: "1".into() })
    );
    assert_eq!(session.document().annotations()[0].content, "排水沟");
    assert_eq!(session.clear_annotations(), 1);
}

/// Clearing drafted shapes leaves survey points and their labels in step
#[test]
fn test_clear_shapes_keeps_survey_labels() {
    let mut session = loaded_session();
    session.start_tool(ToolKind::Line);
    session.pointer_down(Point::new(0.0, 0.0), PointerButton::Primary, &mut CancelPrompt);
    session.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary, &mut CancelPrompt);

    session.start_tool(ToolKind::CoordinatePick);
    let mut prompt = ScriptedPrompt::new().confirm("界址点", "");
    let outcome = session.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary, &mut prompt);
    assert_eq!(outcome, ToolOutcome::Committed(Commit::SurveyPoint(1)));

    session.start_tool(ToolKind::Erase);
    session.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary, &mut CancelPrompt);
    assert!(session.document().shapes.is_empty());
    assert_eq!(session.document().shapes.labels().len(), 1);

    session.clear_shapes();
    assert_eq!(session.document().survey_points().len(), 1);
    assert_eq!(session.document().shapes.labels().len(), 1);

    assert_eq!(session.clear_coords(), 1);
    assert!(session.document().shapes.labels().is_empty());
}
