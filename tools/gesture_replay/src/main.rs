use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use keyball_gesture::gesture::{
    active_config, Action, GestureEngine, GestureState, StateCell, TickInput,
};

const TRACE_HEADER: &str = "motion,t,dx,dy,press,release";

static REPLAY_STATE: StateCell = StateCell::new();

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;
    let mut tail_ticks = u32::from(active_config().thresholds.idle_timeout_ticks);

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "--tail" => {
                idx += 1;
                let Some(raw) = args.get(idx) else {
                    return Err("missing tick count after --tail".into());
                };
                tail_ticks = raw
                    .parse::<u32>()
                    .map_err(|e| format!("invalid --tail '{raw}': {e}"))?;
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let inputs = parse_trace(&trace_path)?;
    let Replay { events, actions } = replay(&inputs, tail_ticks, &REPLAY_STATE);

    println!("event,t,kind,detail");
    for line in &events {
        println!("{line}");
    }

    if let Some(expect_path) = expect_path {
        let expected = parse_expected_actions(&expect_path)?;
        if actions != expected {
            eprintln!("expected actions: {}", expected.join(","));
            eprintln!("actual actions:   {}", actions.join(","));
            return Err("action sequence mismatch".into());
        }
    }

    Ok(())
}

struct Replay {
    events: Vec<String>,
    actions: Vec<String>,
}

fn replay(inputs: &[TickInput], tail_ticks: u32, observer: &'static StateCell) -> Replay {
    // Let click windows and swipes settle after the capture stops.
    let last_t = inputs.last().map_or(0, |input| input.motion.t);
    let tail = (1..=tail_ticks).map(|offset| TickInput::still(last_t.saturating_add(offset)));

    let mut engine = GestureEngine::new(active_config(), observer);
    let mut state = GestureState::None;
    let mut out = Replay {
        events: Vec::new(),
        actions: Vec::new(),
    };

    for input in inputs.iter().copied().chain(tail) {
        let output = engine.tick(input);
        if output.trace.state != state {
            out.events.push(format!(
                "event,{},state,{}->{}",
                input.motion.t,
                state.label(),
                output.trace.state.label()
            ));
            state = output.trace.state;
        }
        if let Some(action) = output.action {
            let label = action_label(action);
            out.events
                .push(format!("event,{},action,{}", input.motion.t, label));
            out.actions.push(label);
        }
    }

    out
}

fn usage() -> String {
    "usage: gesture_replay <trace.csv> [--expect expected_actions.txt] [--tail ticks]".to_string()
}

fn action_label(action: Action) -> String {
    match action {
        Action::Click(count) => format!("click_{}", count.presses()),
        Action::SwipeStart(direction) => format!("swipe_start_{}", direction.label()),
        Action::SwipeRepeat(direction) => format!("swipe_repeat_{}", direction.label()),
        Action::LayerToggle(layer) => format!("layer_toggle_{layer}"),
    }
}

fn parse_trace(path: &Path) -> Result<Vec<TickInput>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out: Vec<TickInput> = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() < 4 {
            return Err(format!(
                "{}:{} invalid trace line, expected at least 4 columns",
                path.display(),
                line_no
            ));
        }
        if parts[0].trim() != "motion" {
            continue;
        }

        let t = parse_u32(parts[1], path, line_no, "t")?;
        let dx = parse_i16(parts[2], path, line_no, "dx")?;
        let dy = parse_i16(parts[3], path, line_no, "dy")?;
        let pressed = match parts.get(4) {
            Some(raw) => parse_flag(raw, path, line_no, "press")?,
            None => false,
        };
        let released = match parts.get(5) {
            Some(raw) => parse_flag(raw, path, line_no, "release")?,
            None => false,
        };

        let mut input = TickInput::moved(t, dx, dy);
        input.button.pressed = pressed;
        input.button.released = released;
        out.push(input);
    }

    Ok(out)
}

fn parse_expected_actions(path: &Path) -> Result<Vec<String>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut actions = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        actions.push(token.to_ascii_lowercase());
    }

    Ok(actions)
}

fn parse_u32(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<u32, String> {
    raw.trim().parse::<u32>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}

fn parse_i16(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<i16, String> {
    raw.trim().parse::<i16>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}

fn parse_flag(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<bool, String> {
    match raw.trim() {
        "" | "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!(
            "{}:{} invalid {} '{}': expected 0 or 1",
            path.display(),
            line_no,
            field,
            other
        )),
    }
}
