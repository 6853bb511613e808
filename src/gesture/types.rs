use core::fmt;

pub type LayerId = u8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionSample {
    pub dx: i16,
    pub dy: i16,
    pub t: u32,
}

impl MotionSample {
    /// Manhattan distance of this tick's displacement.
    pub const fn step(&self) -> u32 {
        self.dx.unsigned_abs() as u32 + self.dy.unsigned_abs() as u32
    }

    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonEdges {
    pub pressed: bool,
    pub released: bool,
}

impl ButtonEdges {
    pub const fn any(&self) -> bool {
        self.pressed || self.released
    }
}

/// Everything the host hands over for one polling tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub motion: MotionSample,
    pub button: ButtonEdges,
}

impl TickInput {
    pub const fn still(t: u32) -> Self {
        Self::moved(t, 0, 0)
    }

    pub const fn moved(t: u32, dx: i16, dy: i16) -> Self {
        Self {
            motion: MotionSample { dx, dy, t },
            button: ButtonEdges {
                pressed: false,
                released: false,
            },
        }
    }

    pub const fn press(t: u32) -> Self {
        Self {
            motion: MotionSample { dx: 0, dy: 0, t },
            button: ButtonEdges {
                pressed: true,
                released: false,
            },
        }
    }

    pub const fn release(t: u32) -> Self {
        Self {
            motion: MotionSample { dx: 0, dy: 0, t },
            button: ButtonEdges {
                pressed: false,
                released: true,
            },
        }
    }

    pub const fn is_idle(&self) -> bool {
        self.motion.is_zero() && !self.button.any()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum GestureState {
    #[default]
    None = 0,
    Waiting = 1,
    Clickable = 2,
    Clicking = 3,
    Clicked = 4,
    Swipe = 5,
    Swiping = 6,
}

impl GestureState {
    pub const ALL: [GestureState; 7] = [
        GestureState::None,
        GestureState::Waiting,
        GestureState::Clickable,
        GestureState::Clicking,
        GestureState::Clicked,
        GestureState::Swipe,
        GestureState::Swiping,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Unknown raw values read back as `None`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Waiting,
            2 => Self::Clickable,
            3 => Self::Clicking,
            4 => Self::Clicked,
            5 => Self::Swipe,
            6 => Self::Swiping,
            _ => Self::None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Waiting => "WAITING",
            Self::Clickable => "CLICKABLE",
            Self::Clicking => "CLICKING",
            Self::Clicked => "CLICKED",
            Self::Swipe => "SWIPE",
            Self::Swiping => "SWIPING",
        }
    }

    pub const fn is_click_family(self) -> bool {
        matches!(self, Self::Clickable | Self::Clicking | Self::Clicked)
    }

    pub const fn is_swipe_family(self) -> bool {
        matches!(self, Self::Swipe | Self::Swiping)
    }
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "up_left",
            Self::UpRight => "up_right",
            Self::DownLeft => "down_left",
            Self::DownRight => "down_right",
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionMode {
    #[default]
    Four,
    Eight,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ClickCount {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl ClickCount {
    /// Chained taps stop counting at three.
    pub const fn next(self) -> Self {
        match self {
            Self::Single => Self::Double,
            Self::Double | Self::Triple => Self::Triple,
        }
    }

    pub const fn presses(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Click(ClickCount),
    SwipeStart(Direction),
    SwipeRepeat(Direction),
    LayerToggle(LayerId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccumulatedMovement {
    pub magnitude: u32,
    pub duration: u16,
    pub direction_hint: Option<Direction>,
}
