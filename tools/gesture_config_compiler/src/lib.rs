use std::{fmt, fs, path::Path};

use serde::Deserialize;

const MAX_LAYER: u8 = 31;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GestureFile {
    pub thresholds: ThresholdSection,
    pub swipe: SwipeSection,
    pub click_layer: ClickLayerSection,
    pub indicator: IndicatorSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSection {
    pub click_eligible_max_movement: u16,
    pub settle_ticks: u16,
    pub click_window_ticks: u16,
    pub swipe_min_movement: u16,
    pub swipe_min_duration: u16,
    pub idle_timeout_ticks: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SwipeSection {
    pub continue_movement: u16,
    pub repeat_ticks: u16,
    pub directions: u8,
    pub diagonal_ratio_x100: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClickLayerSection {
    pub enabled: bool,
    pub layer: u8,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IndicatorSection {
    pub scroll_layers: Vec<u8>,
}

pub fn parse_gesture_file(path: &Path) -> Result<GestureFile, ConfigCompilerError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gesture_str(&text)
}

pub fn parse_gesture_str(text: &str) -> Result<GestureFile, ConfigCompilerError> {
    toml::from_str(text).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &GestureFile) -> Result<(), ConfigCompilerError> {
    let t = &config.thresholds;
    let s = &config.swipe;

    for (name, value) in [
        ("thresholds.settle_ticks", t.settle_ticks),
        ("thresholds.click_window_ticks", t.click_window_ticks),
        ("thresholds.swipe_min_duration", t.swipe_min_duration),
        ("thresholds.idle_timeout_ticks", t.idle_timeout_ticks),
        ("swipe.continue_movement", s.continue_movement),
        ("swipe.repeat_ticks", s.repeat_ticks),
    ] {
        if value == 0 {
            return Err(invalid(format!("{name} must be > 0")));
        }
    }

    if t.swipe_min_movement <= t.click_eligible_max_movement {
        return Err(invalid(
            "thresholds.swipe_min_movement must be > thresholds.click_eligible_max_movement",
        ));
    }
    if s.continue_movement > t.swipe_min_movement {
        return Err(invalid(
            "swipe.continue_movement must be <= thresholds.swipe_min_movement",
        ));
    }
    if u32::from(t.idle_timeout_ticks) < u32::from(t.settle_ticks) + u32::from(t.click_window_ticks)
    {
        return Err(invalid(
            "thresholds.idle_timeout_ticks must be >= settle_ticks + click_window_ticks",
        ));
    }
    if !matches!(s.directions, 4 | 8) {
        return Err(invalid("swipe.directions must be 4 or 8"));
    }
    if !(1..=100).contains(&s.diagonal_ratio_x100) {
        return Err(invalid("swipe.diagonal_ratio_x100 must be within 1..=100"));
    }
    if config.click_layer.layer > MAX_LAYER {
        return Err(invalid(format!("click_layer.layer must be <= {MAX_LAYER}")));
    }
    if let Some(layer) = config
        .indicator
        .scroll_layers
        .iter()
        .find(|layer| **layer > MAX_LAYER)
    {
        return Err(invalid(format!(
            "indicator.scroll_layers entry {layer} must be <= {MAX_LAYER}"
        )));
    }

    Ok(())
}

pub fn scroll_layer_mask(layers: &[u8]) -> u32 {
    layers
        .iter()
        .fold(0u32, |mask, layer| {
            mask | 1u32.checked_shl(u32::from(*layer)).unwrap_or(0)
        })
}

pub fn render_generated_config(config: &GestureFile) -> String {
    let t = &config.thresholds;
    let s = &config.swipe;
    let direction_mode = if s.directions == 8 {
        "DirectionMode::Eight"
    } else {
        "DirectionMode::Four"
    };
    let mask = scroll_layer_mask(&config.indicator.scroll_layers);

    let mut out = String::new();
    out.push_str("// @generated by gesture_config_compiler. Do not edit.\n");
    out.push_str("pub static GESTURE_CONFIG: GestureConfig = GestureConfig {\n");
    out.push_str("    thresholds: ThresholdConfig {\n");
    out.push_str(&format!(
        "        click_eligible_max_movement: {},\n",
        t.click_eligible_max_movement
    ));
    out.push_str(&format!("        settle_ticks: {},\n", t.settle_ticks));
    out.push_str(&format!(
        "        click_window_ticks: {},\n",
        t.click_window_ticks
    ));
    out.push_str(&format!(
        "        swipe_min_movement: {},\n",
        t.swipe_min_movement
    ));
    out.push_str(&format!(
        "        swipe_min_duration: {},\n",
        t.swipe_min_duration
    ));
    out.push_str(&format!(
        "        idle_timeout_ticks: {},\n",
        t.idle_timeout_ticks
    ));
    out.push_str("    },\n");
    out.push_str("    swipe: SwipeConfig {\n");
    out.push_str(&format!(
        "        continue_movement: {},\n",
        s.continue_movement
    ));
    out.push_str(&format!("        repeat_ticks: {},\n", s.repeat_ticks));
    out.push_str(&format!("        direction_mode: {direction_mode},\n"));
    out.push_str(&format!(
        "        diagonal_ratio_x100: {},\n",
        s.diagonal_ratio_x100
    ));
    out.push_str("    },\n");
    out.push_str("    click_layer: ClickLayerConfig {\n");
    out.push_str(&format!("        enabled: {},\n", config.click_layer.enabled));
    out.push_str(&format!("        layer: {},\n", config.click_layer.layer));
    out.push_str("    },\n");
    out.push_str("    indicator: IndicatorConfig {\n");
    out.push_str(&format!("        scroll_layer_mask: {mask:#010x},\n"));
    out.push_str("    },\n");
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gesture_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}

fn invalid(msg: impl Into<String>) -> ConfigCompilerError {
    ConfigCompilerError::Validation(msg.into())
}
