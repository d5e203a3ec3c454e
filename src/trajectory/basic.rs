//! Centerline trajectory generation by two-pass velocity profiling.

use std::collections::{HashSet, VecDeque};
use std::f64::consts::PI;
use std::sync::Arc;

use crate::config::{RobotSpecs, TrajectoryParams};
use crate::core::math::{curvature, lerp, lerp_angle, rangle};
use crate::error::{PlanError, Result};
use crate::path::Path;

use super::moment::BasicMoment;

/// A time-parameterized trajectory for a robot with limited velocity and
/// acceleration, generated over a [`Path`] through the configured waypoints.
///
/// The profile is built in two passes over moments spaced a constant arc
/// length apart: a forward pass accelerates as hard as the limits and the
/// per-sample velocity caps allow, and a backward pass pulls velocities down
/// wherever the robot could not brake in time. A final sweep integrates time
/// across the samples. Tank drive trajectories are derived from this one via
/// [`super::TankDriveTrajectory`].
#[derive(Clone, Debug)]
pub struct BasicTrajectory {
    path: Arc<Path>,
    moments: Vec<BasicMoment>,
    /// Path parameter for each moment.
    patht: Vec<f64>,
    /// Signed radius of curvature for each moment; empty unless `is_tank`.
    pathr: Vec<f64>,
    init_facing: f64,
    backwards: bool,
    specs: RobotSpecs,
    params: TrajectoryParams,
}

impl BasicTrajectory {
    /// Generate a trajectory from robot limits and generation parameters.
    pub fn new(specs: RobotSpecs, params: TrajectoryParams) -> Result<Self> {
        specs.validate()?;
        params.validate()?;

        let seg_count = params.seg_count;
        let mut path = Path::new(params.waypoints.clone(), params.alpha, params.path_type)?;
        let ds = 1.0 / seg_count as f64;
        let total = path.compute_len(seg_count + 1);
        let dpi = total / seg_count as f64;
        let path = Arc::new(path);
        let waypoints = &params.waypoints;

        // Interior waypoint velocity constraints, keyed by arc length and
        // kept in traversal order.
        let wpdt = 1.0 / (waypoints.len() - 1) as f64;
        let mut constraints: VecDeque<(f64, f64)> = VecDeque::new();
        for (i, wp) in waypoints
            .iter()
            .enumerate()
            .take(waypoints.len() - 1)
            .skip(1)
        {
            if let Some(v) = wp.velocity {
                constraints.push_back((path.t2s(i as f64 * wpdt)? * total, v));
            }
        }

        // Sample the path: parameter, heading, and for tank drive the signed
        // curvature radius plus the turn-limited velocity cap.
        let mut patht = Vec::with_capacity(seg_count);
        let mut pathr = Vec::with_capacity(if params.is_tank { seg_count } else { 0 });
        let mut headings = Vec::with_capacity(seg_count);
        let mut mv = Vec::with_capacity(seg_count);

        for i in 0..seg_count {
            let t = path.s2t(ds * i as f64)?;
            patht.push(t);
            let d = path.deriv_at(t);
            headings.push(d.x.atan2(d.y));

            if params.is_tank {
                let dd = path.second_deriv_at(t);
                let r = 1.0 / curvature(d.x, dd.x, d.y, dd.y);
                pathr.push(r);
                // The outer wheel moves faster than the center by the ratio
                // below, so the center must slow to keep it under max_v.
                mv.push(specs.max_v / (1.0 + specs.base_width / (2.0 * r.abs())));
            } else {
                mv.push(specs.max_v);
            }
        }

        let mut moments = Vec::with_capacity(seg_count);
        let start_vel = waypoints[0].velocity.unwrap_or(0.0);
        moments.push(BasicMoment::new(0.0, start_vel, 0.0, headings[0]));

        // Exact time deltas for transitions where the kinematics pin them
        // down; NaN entries fall back to dist/vel during integration.
        let mut time_diff = vec![f64::NAN; seg_count.saturating_sub(1)];
        let mut constrained: HashSet<usize> = HashSet::new();

        // Forward pass.
        for i in 1..seg_count {
            let dist = i as f64 * dpi;

            let pending = constraints
                .front()
                .copied()
                .filter(|&(cdist, _)| dist >= cdist);
            if let Some((cdist, cvel)) = pending {
                constraints.pop_front();
                let prev_vel = moments[i - 1].vel;
                if cvel > prev_vel {
                    // Feasibility gate: the raw velocity-squared difference
                    // against max_a, without the 1/(2 dpi) factor.
                    let accel = cvel * cvel - prev_vel * prev_vel;
                    if accel > specs.max_a {
                        return Err(PlanError::ConstraintInfeasible {
                            dist: cdist,
                            velocity: cvel,
                        });
                    }
                    moments[i - 1].accel = accel;
                    time_diff[i - 1] = (cvel - prev_vel) / accel;
                } else {
                    // Deceleration into the constraint is imposed by the
                    // backward pass.
                    moments[i - 1].accel = 0.0;
                }
                moments.push(BasicMoment::new(dist, cvel, 0.0, headings[i]));
                constrained.insert(i);
                continue;
            }

            let prev_vel = moments[i - 1].vel;
            if prev_vel < mv[i] {
                let reachable = (prev_vel * prev_vel + 2.0 * specs.max_a * dpi).sqrt();
                let vel = if reachable > mv[i] {
                    // Solve for the acceleration that lands exactly on the cap.
                    moments[i - 1].accel = (mv[i] * mv[i] - prev_vel * prev_vel) / (2.0 * dpi);
                    mv[i]
                } else {
                    moments[i - 1].accel = specs.max_a;
                    reachable
                };
                moments.push(BasicMoment::new(dist, vel, 0.0, headings[i]));
                time_diff[i - 1] = (vel - prev_vel) / moments[i - 1].accel;
            } else {
                moments.push(BasicMoment::new(dist, mv[i], 0.0, headings[i]));
                moments[i - 1].accel = 0.0;
            }
        }

        // The trajectory ends at the end waypoint's velocity, or at rest.
        let n = moments.len();
        moments[n - 1].vel = waypoints[waypoints.len() - 1].velocity.unwrap_or(0.0);
        moments[n - 1].accel = 0.0;

        // Backward pass: wherever the forward pass left a velocity the robot
        // cannot brake away from, pull it down.
        for i in (0..n - 1).rev() {
            if moments[i].vel > moments[i + 1].vel {
                let reachable = (moments[i + 1].vel * moments[i + 1].vel
                    + 2.0 * specs.max_a * dpi)
                    .sqrt();
                if reachable > moments[i].vel {
                    // Partial deceleration suffices.
                    let accel = (moments[i].vel * moments[i].vel
                        - moments[i + 1].vel * moments[i + 1].vel)
                        / (2.0 * dpi);
                    moments[i].accel = -accel;
                } else {
                    if constrained.contains(&i) {
                        return Err(PlanError::ConstraintInfeasible {
                            dist: moments[i].dist,
                            velocity: moments[i].vel,
                        });
                    }
                    moments[i].vel = reachable;
                    moments[i].accel = -specs.max_a;
                }
                time_diff[i] = (moments[i + 1].vel - moments[i].vel) / moments[i].accel;
            }
        }

        // Time integration.
        for i in 1..n {
            let dt = if time_diff[i - 1].is_nan() {
                (moments[i].dist - moments[i - 1].dist) / moments[i - 1].vel
            } else {
                time_diff[i - 1]
            };
            moments[i].time = moments[i - 1].time + dt;
        }

        let init_facing = moments[0].afacing();
        for m in &mut moments {
            m.init_facing = init_facing;
        }

        log::debug!(
            "profiled {} moments over {:.3} units in {:.3}s",
            n,
            total,
            moments[n - 1].time
        );

        Ok(Self {
            path,
            moments,
            patht,
            pathr,
            init_facing,
            backwards: false,
            specs,
            params,
        })
    }

    /// The path this trajectory follows.
    #[inline]
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    /// All generated moments, ordered by time.
    #[inline]
    pub fn moments(&self) -> &[BasicMoment] {
        &self.moments
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

    #[inline]
    pub(crate) fn patht(&self) -> &[f64] {
        &self.patht
    }

    #[inline]
    pub(crate) fn pathr(&self) -> &[f64] {
        &self.pathr
    }

    /// State at the given time, linearly interpolated between the bracketing
    /// moments. Times outside [0, total_time] clamp to the endpoints.
    pub fn get(&self, time: f64) -> BasicMoment {
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
        BasicMoment {
            dist: lerp(before.dist, after.dist, f),
            vel: lerp(before.vel, after.vel, f),
            accel: lerp(before.accel, after.accel, f),
            heading: lerp_angle(before.heading, after.heading, f),
            time,
            init_facing: self.init_facing,
            backwards: self.backwards,
        }
    }

    /// Rebuild around transformed moments, restamping the backwards flag and
    /// the initial facing and refreshing the params' waypoints from the path.
    fn with_moments(
        &self,
        path: Path,
        mut moments: Vec<BasicMoment>,
        patht: Vec<f64>,
        pathr: Vec<f64>,
        backwards: bool,
    ) -> Self {
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
            patht,
            pathr,
            init_facing,
            backwards,
            specs: self.specs,
            params,
        }
    }

    /// Mirror the trajectory across the robot's forward axis: headings
    /// negate, left turns become right turns.
    pub fn mirror_lr(&self) -> Self {
        let moments = self
            .moments
            .iter()
            .map(|m| BasicMoment {
                heading: rangle(-m.heading),
                ..*m
            })
            .collect();
        let pathr = self.pathr.iter().map(|r| -r).collect();
        self.with_moments(
            self.path.mirror_lr(),
            moments,
            self.patht.clone(),
            pathr,
            self.backwards,
        )
    }

    /// Mirror the trajectory across the robot's lateral axis: the robot
    /// covers the reflected path driving in reverse.
    pub fn mirror_fb(&self) -> Self {
        let moments = self
            .moments
            .iter()
            .map(|m| BasicMoment {
                dist: -m.dist,
                vel: -m.vel,
                accel: -m.accel,
                heading: rangle(PI - m.heading),
                ..*m
            })
            .collect();
        self.with_moments(
            self.path.mirror_fb(),
            moments,
            self.patht.clone(),
            self.pathr.clone(),
            !self.backwards,
        )
    }

    /// Execute the same ground path in reverse, ending where the original
    /// started. Times restart from zero.
    pub fn retrace(&self) -> Self {
        let last = self.moments[self.moments.len() - 1];
        let moments = self
            .moments
            .iter()
            .rev()
            .map(|m| BasicMoment {
                dist: m.dist - last.dist,
                vel: -m.vel,
                accel: m.accel,
                heading: rangle(m.heading + PI),
                time: last.time - m.time,
                ..*m
            })
            .collect();
        let patht = self.patht.iter().rev().copied().collect();
        let pathr = self.pathr.iter().rev().copied().collect();
        self.with_moments(self.path.retrace(), moments, patht, pathr, !self.backwards)
    }
}
