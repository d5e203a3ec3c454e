//! Closed-loop following of generated trajectories.
//!
//! The follower is a pure controller: each control cycle the caller hands it
//! a [`FollowerInput`] snapshot of sensor readings and gets back a
//! [`FollowerOutput`] with motor commands in [-1, 1]. Wiring the snapshot to
//! encoders, a gyro and motor controllers is the embedding's job, which keeps
//! the core free of device I/O and trivially testable with synthetic clocks.

use serde::{Deserialize, Serialize};

use crate::core::math::angle_diff;
use crate::trajectory::TankDriveTrajectory;

/// Gains for the tank drive follower's control law.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowerGains {
    /// Velocity feedforward.
    pub kv: f64,
    /// Acceleration feedforward.
    pub ka: f64,
    /// Proportional gain on wheel position error.
    pub kp: f64,
    /// Derivative gain on wheel position error.
    pub kd: f64,
    /// Proportional gain on facing error, applied differentially.
    pub kdp: f64,
}

impl FollowerGains {
    /// Feedforward-only gains; useful when no encoders are available.
    pub fn feedforward(kv: f64, ka: f64) -> Self {
        Self {
            kv,
            ka,
            ..Self::default()
        }
    }
}

/// Sensor readings for one control cycle.
///
/// Distance and direction readings are optional; the corresponding feedback
/// terms are skipped when they are absent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FollowerInput {
    /// Monotonic timestamp in seconds.
    pub timestamp: f64,
    /// Accumulated left wheel distance, if an encoder is available.
    pub l_dist: Option<f64>,
    /// Accumulated right wheel distance, if an encoder is available.
    pub r_dist: Option<f64>,
    /// Absolute robot facing in radians, if a gyro is available.
    pub direction: Option<f64>,
}

/// Motor commands and the error terms behind them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FollowerOutput {
    /// Left motor command in [-1, 1].
    pub left: f64,
    /// Right motor command in [-1, 1].
    pub right: f64,
    /// Last left wheel position error.
    pub l_err: f64,
    /// Last right wheel position error.
    pub r_err: f64,
    /// Last facing error.
    pub dir_err: f64,
}

#[derive(Clone, Copy, Debug)]
struct FollowerState {
    init_time: f64,
    last_time: f64,
    l_init_dist: f64,
    r_init_dist: f64,
    init_direction: f64,
    l_last_err: f64,
    r_last_err: f64,
}

/// Feedback/feedforward follower for tank drive trajectories.
///
/// The control law per wheel is
/// `ka * accel + kv * vel + kp * err + kd * d_err` with the facing error
/// scaled by `kdp` subtracted from the left output and added to the right,
/// and the result clamped to [-1, 1].
#[derive(Clone, Debug)]
pub struct TankFollower {
    traj: TankDriveTrajectory,
    gains: FollowerGains,
    state: Option<FollowerState>,
    last_output: FollowerOutput,
}

impl TankFollower {
    /// Create a follower over a trajectory with the given gains.
    pub fn new(traj: TankDriveTrajectory, gains: FollowerGains) -> Self {
        Self {
            traj,
            gains,
            state: None,
            last_output: FollowerOutput::default(),
        }
    }

    /// The trajectory being followed.
    pub fn trajectory(&self) -> &TankDriveTrajectory {
        &self.traj
    }

    /// Update the gains. Takes effect on the next cycle.
    pub fn set_gains(&mut self, gains: FollowerGains) {
        self.gains = gains;
    }

    /// Whether [`TankFollower::initialize`] ran and the trajectory has not
    /// finished or been stopped.
    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// The output of the most recent cycle.
    pub fn last_output(&self) -> FollowerOutput {
        self.last_output
    }

    /// Latch the reference time, distances and direction. Does nothing when
    /// already running.
    pub fn initialize(&mut self, input: &FollowerInput) {
        if self.state.is_some() {
            return;
        }
        self.state = Some(FollowerState {
            init_time: input.timestamp,
            last_time: input.timestamp,
            l_init_dist: input.l_dist.unwrap_or(0.0),
            r_init_dist: input.r_dist.unwrap_or(0.0),
            init_direction: input.direction.unwrap_or(0.0),
            l_last_err: 0.0,
            r_last_err: 0.0,
        });
        log::debug!("follower initialized at t={}", input.timestamp);
    }

    /// Run one control cycle. Initializes on the first call. Returns `None`
    /// once the trajectory time has elapsed, after which the follower stops.
    pub fn run(&mut self, input: &FollowerInput) -> Option<FollowerOutput> {
        if self.state.is_none() {
            self.initialize(input);
        }
        let mut state = self.state.take()?;

        let dt = input.timestamp - state.last_time;
        let t = input.timestamp - state.init_time;
        if t > self.traj.total_time() {
            self.stop();
            return None;
        }

        let gains = self.gains;
        let m = self.traj.get(t);

        let mut l_err = 0.0;
        let mut r_err = 0.0;
        let mut l_deriv = 0.0;
        let mut r_deriv = 0.0;
        if let (Some(l_dist), Some(r_dist)) = (input.l_dist, input.r_dist) {
            l_err = m.l_dist - (l_dist - state.l_init_dist);
            r_err = m.r_dist - (r_dist - state.r_init_dist);
            if dt > 0.0 {
                // Error rate minus the setpoint velocity is the true
                // velocity error.
                l_deriv = (l_err - state.l_last_err) / dt - m.l_vel;
                r_deriv = (r_err - state.r_last_err) / dt - m.r_vel;
            }
        }

        let mut dir_err = 0.0;
        if let Some(direction) = input.direction {
            // Positive when the robot needs to turn left.
            dir_err = angle_diff(direction - state.init_direction, m.rfacing());
        }

        let left = (gains.ka * m.l_accel
            + gains.kv * m.l_vel
            + gains.kp * l_err
            + gains.kd * l_deriv
            - gains.kdp * dir_err)
            .clamp(-1.0, 1.0);
        let right = (gains.ka * m.r_accel
            + gains.kv * m.r_vel
            + gains.kp * r_err
            + gains.kd * r_deriv
            + gains.kdp * dir_err)
            .clamp(-1.0, 1.0);

        state.last_time = input.timestamp;
        state.l_last_err = l_err;
        state.r_last_err = r_err;
        self.state = Some(state);

        let output = FollowerOutput {
            left,
            right,
            l_err,
            r_err,
            dir_err,
        };
        self.last_output = output;
        Some(output)
    }

    /// Stop following; the next [`TankFollower::run`] starts over.
    pub fn stop(&mut self) {
        self.state = None;
    }
}
