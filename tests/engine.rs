use cairo::{Context, ImageSurface};
use classboard::config::{Action, KeybindingsConfig};
use classboard::draw::{Color, WHITE};
use classboard::input::{Key, Tool, ToolState, Whiteboard, WhiteboardEvent};
use classboard::script::ReplayScript;

fn make_whiteboard(width: i32, height: i32) -> Whiteboard {
    let keybindings = KeybindingsConfig::default();
    let action_map = keybindings.build_action_map().unwrap();
    Whiteboard::with_defaults(width, height, ToolState::default(), action_map, 50).unwrap()
}

/// Composites the whiteboard over a board color, the way a host repaints.
fn present(board: &Whiteboard, background: Color) -> ImageSurface {
    let width = board.surface().width();
    let height = board.surface().height();
    let target = ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&target).unwrap();
    classboard::draw::render_board_background(&ctx, background);
    ctx.set_source_surface(board.surface().image(), 0.0, 0.0)
        .unwrap();
    ctx.paint().unwrap();
    drop(ctx);
    target
}

fn surface_has_ink(surface: &mut ImageSurface) -> bool {
    // Anything other than opaque white
    surface
        .data()
        .map(|data| data.iter().any(|byte| *byte != 0xFF))
        .unwrap_or(false)
}

#[test]
fn host_presents_strokes_over_board_color() {
    let mut board = make_whiteboard(120, 80);
    let mut blank = present(&board, WHITE);
    assert!(!surface_has_ink(&mut blank));

    board.on_pointer_down(10.0, 10.0);
    board.on_pointer_move(100.0, 60.0);
    board.on_pointer_up();

    let mut drawn = present(&board, WHITE);
    assert!(surface_has_ink(&mut drawn));
    assert!(board.needs_redraw);
}

#[test]
fn keyboard_driven_session_matches_history_contract() {
    let mut board = make_whiteboard(120, 80);

    for y in [10.0, 30.0, 50.0] {
        board.on_pointer_down(10.0, y);
        board.on_pointer_move(100.0, y);
        board.on_pointer_up();
    }
    assert_eq!(board.history().len(), 4);

    board.on_key_press(Key::Ctrl);
    board.on_key_press(Key::Char('z'));
    board.on_key_press(Key::Char('z'));
    board.on_key_release(Key::Ctrl);
    assert_eq!(board.history().cursor(), 1);

    // Drawing after undo drops both redo entries
    board.on_pointer_down(10.0, 70.0);
    board.on_pointer_move(100.0, 70.0);
    board.on_pointer_up();
    assert_eq!(board.history().len(), 3);
    assert!(!board.redo_available());
}

#[test]
fn text_prompt_flow_through_events() {
    let mut board = make_whiteboard(200, 100);
    board.on_key_press(Key::Char('t'));
    assert_eq!(board.tool_state().tool, Tool::Text);

    board.on_pointer_down(20.0, 50.0);
    let events = board.take_events();
    let Some(WhiteboardEvent::TextInputRequested { x, y }) = events.last().cloned() else {
        panic!("expected a text request, got {events:?}");
    };
    assert_eq!((x, y), (20.0, 50.0));

    // Host prompt owns focus while the user types
    board.set_text_entry_focused(true);
    board.on_key_press(Key::Ctrl);
    assert!(!board.on_key_press(Key::Char('z')));
    board.on_key_release(Key::Ctrl);
    board.set_text_entry_focused(false);

    assert!(board.commit_text("  Lesson 1  "));
    assert_eq!(board.history().len(), 2);
    let mut presented = present(&board, WHITE);
    assert!(surface_has_ink(&mut presented));
}

#[test]
fn clear_action_then_undo_restores_drawing() {
    let mut board = make_whiteboard(60, 60);
    board.on_pointer_down(5.0, 5.0);
    board.on_pointer_move(55.0, 55.0);
    board.on_pointer_up();
    let drawn = board.capture_surface().unwrap();

    board.handle_action(Action::ClearCanvas);
    assert!(board.capture_surface().unwrap().is_blank());

    board.handle_action(Action::Undo);
    assert_eq!(board.capture_surface().unwrap(), drawn);
}

#[test]
fn replay_script_from_config_defaults() {
    let script = ReplayScript::parse(
        r#"
        [[step]]
        op = "size"
        size = 8

        [[step]]
        op = "stroke"
        points = [[10, 10], [80, 10]]

        [[step]]
        op = "tool"
        tool = "eraser"

        [[step]]
        op = "stroke"
        points = [[40, 10]]

        [[step]]
        op = "undo"
        "#,
    )
    .unwrap();

    let mut board = Whiteboard::from_config(&classboard::Config::default()).unwrap();
    let summary = script.apply(&mut board).unwrap();

    assert_eq!(summary.steps, 5);
    assert_eq!(board.history().len(), 3);
    assert_eq!(board.history().cursor(), 1);
    // Undoing the erase brings the stroke back intact
    let snapshot = board.capture_surface().unwrap();
    assert_eq!(snapshot.alpha(40, 10), Some(255));
}
