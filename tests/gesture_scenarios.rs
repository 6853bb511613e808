use keyball_gesture::{
    gesture::{
        active_config, current_state, Action, ClickCount, Direction, GestureEngine, GestureState,
        StateCell, TickInput,
    },
    layers, status,
};

fn fresh_engine() -> GestureEngine {
    GestureEngine::new(active_config(), Box::leak(Box::new(StateCell::new())))
}

#[test]
fn repository_config_keeps_click_path_inside_idle_timeout() {
    let config = active_config();
    let thresholds = config.thresholds;

    assert!(thresholds.swipe_min_movement > thresholds.click_eligible_max_movement);
    assert!(config.swipe.continue_movement <= thresholds.swipe_min_movement);
    assert!(
        u32::from(thresholds.idle_timeout_ticks)
            >= u32::from(thresholds.settle_ticks) + u32::from(thresholds.click_window_ticks)
    );
}

#[test]
fn double_click_with_repository_config() {
    let config = active_config();
    let settle = u32::from(config.thresholds.settle_ticks);
    let window = u32::from(config.thresholds.click_window_ticks);
    let mut engine = fresh_engine();
    let mut actions = Vec::new();

    for t in 1..=settle {
        actions.extend(engine.tick(TickInput::still(t)).action);
    }
    assert_eq!(engine.state(), GestureState::Clickable);

    actions.extend(engine.tick(TickInput::press(settle + 1)).action);
    actions.extend(engine.tick(TickInput::still(settle + 2)).action);
    actions.extend(engine.tick(TickInput::press(settle + 3)).action);
    assert_eq!(engine.state(), GestureState::Clicking);

    let mut t = settle + 4;
    let mut returned_at = None;
    while t <= settle + 4 + window {
        let output = engine.tick(TickInput::still(t));
        actions.extend(output.action);
        if returned_at.is_none() && output.trace.state == GestureState::None {
            returned_at = Some(t);
        }
        t += 1;
    }

    let toggle = Action::LayerToggle(config.click_layer.layer);
    let mut expected = Vec::new();
    if config.click_layer.enabled {
        expected.push(toggle);
    }
    expected.push(Action::Click(ClickCount::Single));
    expected.push(Action::Click(ClickCount::Double));
    if config.click_layer.enabled {
        expected.push(toggle);
    }
    assert_eq!(actions, expected);
    assert_eq!(returned_at, Some(settle + 4 + window));
}

#[test]
fn flick_emits_single_swipe_start() {
    let config = active_config();
    let per_tick = config.thresholds.swipe_min_movement / 2 + 1;
    let dx = -i16::try_from(per_tick).unwrap_or(i16::MAX);
    let mut engine = fresh_engine();

    let actions: Vec<Action> = (1..=2)
        .filter_map(|t| engine.tick(TickInput::moved(t, dx, 0)).action)
        .collect();
    assert_eq!(actions, vec![Action::SwipeStart(Direction::Left)]);
    assert_eq!(engine.state(), GestureState::Swipe);

    let stop = engine.tick(TickInput::still(3));
    assert_eq!(stop.trace.state, GestureState::None);
    assert_eq!(stop.action, None);
}

#[test]
fn default_engine_publishes_to_the_global_cell() {
    let mut engine = GestureEngine::default();

    engine.tick(TickInput::still(1));
    assert_eq!(current_state(), GestureState::Waiting);
    assert_eq!(status::format_state_line(current_state()).as_str(), "  WAITING");

    engine.reset();
    assert_eq!(current_state(), GestureState::None);
}

#[test]
fn indicator_uses_repository_scroll_layers() {
    let config = active_config();
    let scrolling: Vec<u8> = (0..8)
        .filter(|layer| {
            layers::indicate(*layer, &config.indicator, config.click_layer.layer).scroll_mode
        })
        .collect();
    assert_eq!(scrolling, vec![1, 3]);
    assert_eq!(
        layers::indicate(config.click_layer.layer, &config.indicator, config.click_layer.layer)
            .color,
        layers::HSV_TURQUOISE
    );
}
