//! Per-wheel trajectories for tank drive robots.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::config::{RobotSpecs, TrajectoryParams};
use crate::core::math::{lerp, lerp_angle, rabs, rangle};
use crate::error::{PlanError, Result};
use crate::path::{Path, WheelView};

use super::basic::BasicTrajectory;
use super::moment::TankDriveMoment;

/// A trajectory with separate distance, velocity and acceleration tracks for
/// the left and right wheels of a tank drive robot.
///
/// Derived from a [`BasicTrajectory`] generated with `is_tank` set: the
/// centerline velocity splits into wheel velocities by the curvature-induced
/// differential, wheel distances accumulate from chord lengths of the wheel
/// paths, and wheel accelerations are finite differences of the velocities.
#[derive(Clone, Debug)]
pub struct TankDriveTrajectory {
    path: Arc<Path>,
    moments: Vec<TankDriveMoment>,
    wheels: WheelView,
    init_facing: f64,
    backwards: bool,
    specs: RobotSpecs,
    params: TrajectoryParams,
}

impl TankDriveTrajectory {
    /// Derive wheel tracks from a centerline trajectory.
    ///
    /// Fails with [`PlanError::InvalidParams`] unless the source trajectory
    /// was generated with `is_tank` (the wheel derivation needs the signed
    /// curvature samples only tank generation produces).
    pub fn new(traj: &BasicTrajectory) -> Result<Self> {
        if !traj.params().is_tank {
            return Err(PlanError::InvalidParams(
                "source trajectory was not generated for tank drive".to_string(),
            ));
        }

        let specs = *traj.specs();
        let base_radius = specs.base_width / 2.0;
        let wheels = WheelView {
            base_radius,
            backwards: traj.backwards(),
        };
        let path = Arc::clone(traj.path());
        let basic = traj.moments();
        let patht = traj.patht();
        let pathr = traj.pathr();

        let mut moments = Vec::with_capacity(basic.len());
        if traj.params().waypoints[0].velocity.is_some() {
            // A rolling start: the wheel speeds already differ by the
            // curvature differential at the first sample.
            let v = basic[0].vel;
            let d = v / pathr[0] * base_radius;
            moments.push(TankDriveMoment::new(
                0.0,
                0.0,
                v - d,
                v + d,
                0.0,
                0.0,
                basic[0].heading,
                0.0,
            ));
        } else {
            moments.push(TankDriveMoment::new(
                0.0,
                0.0,
                0.0,
                0.0,
                0.0,
                0.0,
                basic[0].heading,
                0.0,
            ));
        }

        let mut prev_wheels = wheels.wheels_at(&path, 0.0);
        for i in 1..basic.len() {
            let here = wheels.wheels_at(&path, patht[i]);
            let mut dl = prev_wheels.0.dist(here.0);
            let mut dr = prev_wheels.1.dist(here.1);
            let dt = basic[i].time - basic[i - 1].time;
            prev_wheels = here;

            let d = basic[i].vel / pathr[i] * base_radius;
            let lv = rabs(basic[i].vel - d, specs.max_v);
            let rv = rabs(basic[i].vel + d, specs.max_v);
            // Chord lengths are unsigned; a wheel spinning backwards loses
            // distance instead of gaining it.
            if lv < 0.0 {
                dl = -dl;
            }
            if rv < 0.0 {
                dr = -dr;
            }

            let prev = moments[i - 1];
            moments.push(TankDriveMoment::new(
                prev.l_dist + dl,
                prev.r_dist + dr,
                lv,
                rv,
                0.0,
                0.0,
                basic[i].heading,
                basic[i].time,
            ));
            moments[i - 1].l_accel = (lv - prev.l_vel) / dt;
            moments[i - 1].r_accel = (rv - prev.r_vel) / dt;
        }

        let init_facing = traj.init_facing();
        let backwards = traj.backwards();
        for m in &mut moments {
            m.init_facing = init_facing;
            m.backwards = backwards;
        }

        Ok(Self {
            path,
            moments,
            wheels,
            init_facing,
            backwards,
            specs,
            params: traj.params().clone(),
        })
    }

    /// The path this trajectory follows.
    #[inline]
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    /// All generated moments, ordered by time.
    #[inline]
    pub fn moments(&self) -> &[TankDriveMoment] {
        &self.moments
    }

    /// The wheel-placement view used to derive the tracks.
    #[inline]
    pub fn wheel_view(&self) -> WheelView {
        self.wheels
    }

    /// The robot specs the trajectory was generated with.
    #[inline]
    pub fn specs(&self) -> &RobotSpecs {
        &self.specs
    }

    /// The generation parameters.
    #[inline]
    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    /// Absolute facing of the robot at the start of the trajectory.
    #[inline]
    pub fn init_facing(&self) -> f64 {
        self.init_facing
    }

    /// Whether this trajectory drives the robot in reverse.
    #[inline]
    pub fn backwards(&self) -> bool {
        self.backwards
    }

    /// Total time to drive the trajectory.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.moments[self.moments.len() - 1].time
    }

    /// State at the given time, linearly interpolated between the bracketing
    /// moments. Times outside [0, total_time] clamp to the endpoints.
    pub fn get(&self, time: f64) -> TankDriveMoment {
        let moments = &self.moments;
        let n = moments.len();
        if time <= 0.0 {
            return moments[0];
        }
        if time >= self.total_time() {
            return moments[n - 1];
        }

        let idx = moments.partition_point(|m| m.time < time);
        let after = moments[idx];
        if after.time == time {
            return after;
        }
        let before = moments[idx - 1];
        let f = (time - before.time) / (after.time - before.time);
        TankDriveMoment {
            l_dist: lerp(before.l_dist, after.l_dist, f),
            r_dist: lerp(before.r_dist, after.r_dist, f),
            l_vel: lerp(before.l_vel, after.l_vel, f),
            r_vel: lerp(before.r_vel, after.r_vel, f),
            l_accel: lerp(before.l_accel, after.l_accel, f),
            r_accel: lerp(before.r_accel, after.r_accel, f),
            heading: lerp_angle(before.heading, after.heading, f),
            time,
            init_facing: self.init_facing,
            backwards: self.backwards,
        }
    }

    /// Rebuild around transformed moments, restamping the backwards flag and
    /// the initial facing and refreshing the params' waypoints from the path.
    fn with_moments(&self, path: Path, mut moments: Vec<TankDriveMoment>, backwards: bool) -> Self {
        let path = Arc::new(path);
        let mut params = self.params.clone();
        params.waypoints = path.waypoints().to_vec();

        for m in &mut moments {
            m.backwards = backwards;
        }
        let init_facing = moments[0].afacing();
        for m in &mut moments {
            m.init_facing = init_facing;
        }

        Self {
            path,
            moments,
            wheels: WheelView {
                base_radius: self.wheels.base_radius,
                backwards,
            },
            init_facing,
            backwards,
            specs: self.specs,
            params,
        }
    }

    /// Mirror the trajectory across the robot's forward axis: the wheel
    /// tracks swap sides and headings negate.
    pub fn mirror_lr(&self) -> Self {
        let moments = self
            .moments
            .iter()
            .map(|m| TankDriveMoment {
                l_dist: m.r_dist,
                r_dist: m.l_dist,
                l_vel: m.r_vel,
                r_vel: m.l_vel,
                l_accel: m.r_accel,
                r_accel: m.l_accel,
                heading: rangle(-m.heading),
                ..*m
            })
            .collect();
        self.with_moments(self.path.mirror_lr(), moments, self.backwards)
    }

    /// Mirror the trajectory across the robot's lateral axis: both wheels
    /// run their own tracks in reverse.
    pub fn mirror_fb(&self) -> Self {
        let moments = self
            .moments
            .iter()
            .map(|m| TankDriveMoment {
                l_dist: -m.l_dist,
                r_dist: -m.r_dist,
                l_vel: -m.l_vel,
                r_vel: -m.r_vel,
                l_accel: -m.l_accel,
                r_accel: -m.r_accel,
                heading: rangle(PI - m.heading),
                ..*m
            })
            .collect();
        self.with_moments(self.path.mirror_fb(), moments, !self.backwards)
    }

    /// Execute the same ground path in reverse. The robot now faces the other
    /// way along the path, so the wheel tracks swap sides as well as running
    /// backwards. Times restart from zero.
    pub fn retrace(&self) -> Self {
        let last = self.moments[self.moments.len() - 1];
        let moments = self
            .moments
            .iter()
            .rev()
            .map(|m| TankDriveMoment {
                l_dist: m.r_dist - last.r_dist,
                r_dist: m.l_dist - last.l_dist,
                l_vel: -m.r_vel,
                r_vel: -m.l_vel,
                l_accel: m.r_accel,
                r_accel: m.l_accel,
                heading: rangle(m.heading + PI),
                time: last.time - m.time,
                ..*m
            })
            .collect();
        self.with_moments(self.path.retrace(), moments, !self.backwards)
    }
}
