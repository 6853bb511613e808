use super::types::{AccumulatedMovement, Direction, DirectionMode, MotionSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionBuckets {
    pub mode: DirectionMode,
    pub diagonal_ratio_x100: u16,
}

impl DirectionBuckets {
    pub const fn new(mode: DirectionMode, diagonal_ratio_x100: u16) -> Self {
        Self {
            mode,
            diagonal_ratio_x100,
        }
    }

    pub fn classify(&self, dx: i32, dy: i32) -> Option<Direction> {
        if dx == 0 && dy == 0 {
            return None;
        }

        let abs_dx = i64::from(dx).abs();
        let abs_dy = i64::from(dy).abs();
        let major = abs_dx.max(abs_dy);
        let minor = abs_dx.min(abs_dy);

        if matches!(self.mode, DirectionMode::Eight)
            && minor * 100 >= major * i64::from(self.diagonal_ratio_x100)
        {
            return Some(match (dx < 0, dy < 0) {
                (true, true) => Direction::UpLeft,
                (false, true) => Direction::UpRight,
                (true, false) => Direction::DownLeft,
                (false, false) => Direction::DownRight,
            });
        }

        if abs_dx >= abs_dy {
            if dx >= 0 {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if dy >= 0 {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }
}

/// Displacement integrated since the classifier's last transition.
#[derive(Clone, Copy, Debug)]
pub struct MovementAccumulator {
    buckets: DirectionBuckets,
    magnitude: u32,
    duration: u16,
    sum_dx: i32,
    sum_dy: i32,
}

impl MovementAccumulator {
    pub const fn new(buckets: DirectionBuckets) -> Self {
        Self {
            buckets,
            magnitude: 0,
            duration: 0,
            sum_dx: 0,
            sum_dy: 0,
        }
    }

    pub fn accumulate(&mut self, sample: &MotionSample) -> AccumulatedMovement {
        self.magnitude = self.magnitude.saturating_add(sample.step());
        self.duration = self.duration.saturating_add(1);
        self.sum_dx = self.sum_dx.saturating_add(i32::from(sample.dx));
        self.sum_dy = self.sum_dy.saturating_add(i32::from(sample.dy));
        self.snapshot()
    }

    pub fn clear(&mut self) {
        self.magnitude = 0;
        self.duration = 0;
        self.sum_dx = 0;
        self.sum_dy = 0;
    }

    pub fn snapshot(&self) -> AccumulatedMovement {
        AccumulatedMovement {
            magnitude: self.magnitude,
            duration: self.duration,
            direction_hint: self.buckets.classify(self.sum_dx, self.sum_dy),
        }
    }
}
