//! Bidirectional RRT for rigid-body motion in SE(3)
//!
//! Two trees are grown alternately, one forward from the start and one
//! backward from the goal. After every successful extension the other
//! tree tries to link directly to the vertex just added. Orientation is
//! step-limited during extension, translation is not.

use std::fmt;
use std::time::{Duration, Instant};

use nalgebra::{Quaternion, UnitQuaternion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{
    CollisionChecker, Configuration, PlanningResult, RotationSynthesizer, TranslationLimits,
    TranslationSynthesizer,
};
use crate::path_planning::se3_rrt::config::PlannerConfig;
use crate::path_planning::se3_rrt::feasibility::{check_trajectory, is_feasible_configuration, Feasibility};
use crate::path_planning::se3_rrt::metric::{nearest_neighbor_indices, Se3Metric};
use crate::path_planning::se3_rrt::sampling::random_configuration;
use crate::path_planning::se3_rrt::segment::{Se3Trajectory, TrajectorySegment};
use crate::path_planning::se3_rrt::tree::{Tree, TreeRole};
use crate::trajectory::{CubicTranslationInterpolator, So3CubicInterpolator};

/// Outcome of an extension or connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendStatus {
    /// The target was added as is
    Reached,
    /// A vertex one step toward the target was added
    Advanced,
    /// No ranked candidate gave a feasible motion
    Trapped,
}

/// Segment type produced by a pair of synthesizers
pub type SegmentOf<R, T> =
    TrajectorySegment<<R as RotationSynthesizer>::Path, <T as TranslationSynthesizer>::Path>;

/// Bidirectional RRT planner
pub struct BiRrtPlanner<C, R = So3CubicInterpolator, T = CubicTranslationInterpolator>
where
    C: CollisionChecker,
    R: RotationSynthesizer,
    T: TranslationSynthesizer,
{
    checker: C,
    rotation_synthesizer: R,
    translation_synthesizer: T,
    config: PlannerConfig,
    metric: Se3Metric,
    limits: Option<TranslationLimits>,
    forward: Tree<SegmentOf<R, T>>,
    backward: Tree<SegmentOf<R, T>>,
    // set once, when the trees are linked
    connecting: Option<SegmentOf<R, T>>,
    iterations: usize,
    running_time: Duration,
    rng: StdRng,
}

impl<C: CollisionChecker> BiRrtPlanner<C> {
    /// Planner with the default cubic interpolants
    pub fn new(start: Configuration, goal: Configuration, checker: C, config: PlannerConfig) -> PlanningResult<Self> {
        Self::with_synthesizers(
            start,
            goal,
            checker,
            So3CubicInterpolator,
            CubicTranslationInterpolator,
            config,
        )
    }
}

impl<C, R, T> BiRrtPlanner<C, R, T>
where
    C: CollisionChecker,
    R: RotationSynthesizer,
    T: TranslationSynthesizer,
{
    pub fn with_synthesizers(
        start: Configuration,
        goal: Configuration,
        checker: C,
        rotation_synthesizer: R,
        translation_synthesizer: T,
        config: PlannerConfig,
    ) -> PlanningResult<Self> {
        config.validate()?;
        if !is_feasible_configuration(&checker, &start) {
            log::warn!("Start configuration is in collision");
        }
        if !is_feasible_configuration(&checker, &goal) {
            log::warn!("Goal configuration is in collision");
        }

        Ok(BiRrtPlanner {
            checker,
            rotation_synthesizer,
            translation_synthesizer,
            metric: Se3Metric::from_config(&config),
            config,
            limits: None,
            forward: Tree::new(TreeRole::Forward, start),
            backward: Tree::new(TreeRole::Backward, goal),
            connecting: None,
            iterations: 0,
            running_time: Duration::ZERO,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the random source, e.g. with a seeded one for reproducible runs
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn set_translational_limits(&mut self, limits: TranslationLimits) {
        self.limits = Some(limits);
    }

    pub fn translational_limits(&self) -> Option<&TranslationLimits> {
        self.limits.as_ref()
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    pub fn is_solved(&self) -> bool {
        self.connecting.is_some()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn running_time(&self) -> Duration {
        self.running_time
    }

    pub fn forward_tree(&self) -> &Tree<SegmentOf<R, T>> {
        &self.forward
    }

    pub fn backward_tree(&self) -> &Tree<SegmentOf<R, T>> {
        &self.backward
    }

    pub fn connecting_segment(&self) -> Option<&SegmentOf<R, T>> {
        self.connecting.as_ref()
    }

    pub fn distance(&self, a: &Configuration, b: &Configuration) -> f64 {
        self.metric.distance(a, b)
    }

    fn tree(&self, role: TreeRole) -> &Tree<SegmentOf<R, T>> {
        match role {
            TreeRole::Forward => &self.forward,
            TreeRole::Backward => &self.backward,
        }
    }

    fn tree_mut(&mut self, role: TreeRole) -> &mut Tree<SegmentOf<R, T>> {
        match role {
            TreeRole::Forward => &mut self.forward,
            TreeRole::Backward => &mut self.backward,
        }
    }

    /// Tree grown in the current iteration: forward on odd iterations,
    /// backward on even ones.
    pub fn growth_role(&self) -> TreeRole {
        if self.iterations % 2 == 1 {
            TreeRole::Forward
        } else {
            TreeRole::Backward
        }
    }

    fn ranked_candidates(&self, query: &Configuration, role: TreeRole) -> Vec<usize> {
        nearest_neighbor_indices(&self.metric, query, self.tree(role), self.config.max_neighbors)
    }

    fn build_segment(&self, begin: &Configuration, end: &Configuration) -> SegmentOf<R, T> {
        let duration = self.config.interpolation_duration;
        TrajectorySegment::new(
            self.rotation_synthesizer.build(
                &begin.orientation,
                &end.orientation,
                &begin.angular_rate,
                &end.angular_rate,
                duration,
            ),
            self.translation_synthesizer.build(
                &begin.position,
                &end.position,
                &begin.linear_rate,
                &end.linear_rate,
                duration,
            ),
        )
    }

    fn check_segment(&self, segment: &SegmentOf<R, T>) -> Feasibility {
        check_trajectory(
            &self.checker,
            &segment.rotation,
            &segment.translation,
            self.config.discretization_time_step,
        )
    }

    /// Share of the quaternion chord covered by one step from a vertex at
    /// distance `delta`, capped at the whole chord
    fn step_fraction(&self, delta: f64) -> f64 {
        (self.config.step_size / delta.sqrt()).min(1.0)
    }

    /// Move `from` toward `toward` by `fraction` of the quaternion chord,
    /// then project back onto the unit sphere.
    fn step_orientation(from: &UnitQuaternion<f64>, toward: &UnitQuaternion<f64>, fraction: f64) -> UnitQuaternion<f64> {
        let a = from.coords;
        let mut b = toward.coords;
        if a.dot(&b) < 0.0 {
            b = -b;
        }
        UnitQuaternion::from_quaternion(Quaternion::from(a + (b - a) * fraction))
    }

    /// Grow the tree of the current iteration toward `sample`
    pub fn extend(&mut self, sample: &Configuration) -> ExtendStatus {
        self.extend_toward(self.growth_role(), sample)
    }

    /// Grow the tree of `role` toward `sample`.
    ///
    /// Candidates are tried in ascending distance; the first one whose
    /// step is feasible gets the new vertex. The tree is only modified on
    /// success.
    pub fn extend_toward(&mut self, role: TreeRole, sample: &Configuration) -> ExtendStatus {
        for index in self.ranked_candidates(sample, role) {
            let near = self.tree(role).vertices()[index].config().clone();

            let delta = self.metric.distance(&near, sample);
            let fraction = self.step_fraction(delta);
            // a full-chord step lands on the sample orientation
            let (orientation, status) = if delta <= self.config.step_size || fraction >= 1.0 {
                (sample.orientation, ExtendStatus::Reached)
            } else {
                (
                    Self::step_orientation(&near.orientation, &sample.orientation, fraction),
                    ExtendStatus::Advanced,
                )
            };
            let new_config = Configuration::with_rates(
                orientation,
                sample.angular_rate,
                sample.position,
                sample.linear_rate,
            );

            if !is_feasible_configuration(&self.checker, &new_config) {
                log::debug!("[Extend {:?}] TRAPPED (infeasible configuration)", role);
                continue;
            }

            let segment = match role {
                TreeRole::Forward => self.build_segment(&near, &new_config),
                TreeRole::Backward => self.build_segment(&new_config, &near),
            };
            if let Feasibility::Infeasible { time } = self.check_segment(&segment) {
                log::debug!("[Extend {:?}] TRAPPED (trajectory in collision at t = {:.3})", role, time);
                continue;
            }

            self.tree_mut(role)
                .add_vertex(index, new_config, segment)
                .expect("ranked candidate indices belong to the grown tree");
            return status;
        }
        ExtendStatus::Trapped
    }

    /// Link the tree not grown this iteration to the vertex just added to
    /// the other one.
    ///
    /// Every ranked candidate is tried with the full direct motion. On
    /// success the candidate becomes the linked tree's connection point and
    /// the motion is stored as the connecting segment. Nothing changes on
    /// failure.
    pub fn connect(&mut self) -> ExtendStatus {
        if self.is_solved() {
            return ExtendStatus::Reached;
        }

        let extended = self.growth_role();
        let target = extended.other();
        let anchor = self.tree(extended).last().config().clone();

        for index in self.ranked_candidates(&anchor, target) {
            let candidate = self.tree(target).vertices()[index].config();
            let segment = match target {
                TreeRole::Forward => self.build_segment(candidate, &anchor),
                TreeRole::Backward => self.build_segment(&anchor, candidate),
            };
            if self.check_segment(&segment).is_feasible() {
                self.tree_mut(target).mark_connection(index);
                self.connecting = Some(segment);
                log::info!(
                    "Path found: total number of iterations {}, tree start {}, tree end {}",
                    self.iterations,
                    self.forward.len(),
                    self.backward.len()
                );
                return ExtendStatus::Reached;
            }
        }
        ExtendStatus::Trapped
    }

    /// One sample / extend / connect iteration. Returns whether the trees
    /// are connected.
    pub fn step(&mut self) -> PlanningResult<bool> {
        if self.is_solved() {
            return Ok(true);
        }
        let started = Instant::now();
        let result = self.iterate();
        self.running_time += started.elapsed();
        result
    }

    fn iterate(&mut self) -> PlanningResult<bool> {
        let sample = random_configuration(&mut self.rng, self.limits.as_ref(), &self.config)?;
        self.iterations += 1;
        log::trace!("iteration : {}", self.iterations);

        if self.extend(&sample) != ExtendStatus::Trapped {
            log::trace!(
                "Tree start : {}; Tree end : {}",
                self.forward.len(),
                self.backward.len()
            );
            if self.connect() == ExtendStatus::Reached {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn initial_connect(&mut self) -> bool {
        let started = Instant::now();
        let connected = self.connect() == ExtendStatus::Reached;
        self.running_time += started.elapsed();
        connected
    }

    /// Plan for up to `allotted` wall-clock time.
    ///
    /// The budget is checked between iterations, so a slow iteration can
    /// overrun it. Returns `Ok(false)` when time runs out; calling again
    /// continues the search with a fresh budget.
    pub fn run(&mut self, allotted: Duration) -> PlanningResult<bool> {
        if self.is_solved() {
            log::info!("The planner has already found a path.");
            return Ok(true);
        }

        let run_started = Instant::now();
        if self.initial_connect() {
            return Ok(true);
        }

        let previous = self.iterations;
        while run_started.elapsed() < allotted {
            if self.step()? {
                log::info!("Total running time : {:?}", self.running_time);
                return Ok(true);
            }
        }

        log::info!(
            "Allotted time {:?} is exhausted after {} iterations",
            allotted,
            self.iterations - previous
        );
        Ok(false)
    }

    /// Same as [`run`](Self::run) but bounded by an iteration count
    pub fn run_iterations(&mut self, max_iterations: usize) -> PlanningResult<bool> {
        if self.is_solved() {
            return Ok(true);
        }
        if self.initial_connect() {
            return Ok(true);
        }
        for _ in 0..max_iterations {
            if self.step()? {
                return Ok(true);
            }
        }
        log::info!("No path after {} iterations", max_iterations);
        Ok(false)
    }

    /// Segments from start to goal, empty while not solved
    pub fn final_path(&self) -> Vec<SegmentOf<R, T>> {
        let connecting = match &self.connecting {
            Some(segment) => segment,
            None => return Vec::new(),
        };
        let mut path: Vec<SegmentOf<R, T>> = self.forward.segments_to_tip().into_iter().cloned().collect();
        path.push(connecting.clone());
        path.extend(self.backward.segments_to_tip().into_iter().cloned());
        path
    }

    pub fn final_trajectory(&self) -> Se3Trajectory<R::Path, T::Path> {
        Se3Trajectory::new(self.final_path())
    }

    /// Vertex configurations along the path from start to goal
    pub fn final_waypoints(&self) -> Vec<Configuration> {
        if !self.is_solved() {
            return Vec::new();
        }
        self.forward
            .configurations_to_tip()
            .into_iter()
            .chain(self.backward.configurations_to_tip())
            .cloned()
            .collect()
    }

    /// Translation part of the path in the piecewise-polynomial text form
    pub fn final_translation_string(&self) -> String
    where
        T::Path: fmt::Display,
    {
        self.final_path()
            .iter()
            .map(|s| s.translation.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<C, R, T> fmt::Display for BiRrtPlanner<C, R, T>
where
    C: CollisionChecker,
    R: RotationSynthesizer,
    T: TranslationSynthesizer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total running time : {} sec.", self.running_time.as_secs_f64())?;
        write!(f, "Total number of iterations : {}", self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{PlanningError, RotationPath};
    use crate::path_planning::se3_rrt::metric::rotation_geodesic;
    use crate::trajectory::PiecewisePolynomial;
    use nalgebra::{Isometry3, Vector3};
    use std::cell::Cell;
    use std::rc::Rc;

    fn free(_: &Isometry3<f64>) -> bool {
        false
    }

    // slab at |x| < 0.1 spanning the whole translation box
    fn full_wall(pose: &Isometry3<f64>) -> bool {
        pose.translation.vector.x.abs() < 0.1
    }

    // same slab with an opening above y = 0.5
    fn wall_with_gap(pose: &Isometry3<f64>) -> bool {
        let p = pose.translation.vector;
        p.x.abs() < 0.1 && p.y < 0.5
    }

    fn at(x: f64, y: f64, z: f64) -> Configuration {
        Configuration::new(UnitQuaternion::identity(), Vector3::new(x, y, z))
    }

    fn box_limits() -> TranslationLimits {
        TranslationLimits::new(Vector3::new(-1.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0)).unwrap()
    }

    fn planner<C: CollisionChecker>(start: Configuration, goal: Configuration, checker: C) -> BiRrtPlanner<C> {
        let mut planner = BiRrtPlanner::new(start, goal, checker, PlannerConfig::default())
            .unwrap()
            .with_seed(11);
        planner.set_translational_limits(box_limits());
        planner
    }

    fn assert_same_pose(a: &Isometry3<f64>, b: &Isometry3<f64>) {
        assert!((a.translation.vector - b.translation.vector).norm() < 1e-9);
        assert!(rotation_geodesic(&a.rotation, &b.rotation) < 1e-9);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PlannerConfig {
            step_size: -1.0,
            ..Default::default()
        };
        let result = BiRrtPlanner::new(at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), free, config);
        assert!(matches!(result, Err(PlanningError::InvalidParameter(_))));
    }

    #[test]
    fn test_identical_start_and_goal_connect_immediately() {
        let start = at(0.2, -0.3, 0.5);
        let mut planner = BiRrtPlanner::new(start.clone(), start, full_wall, PlannerConfig::default()).unwrap();

        // limits are never needed when the first connection succeeds
        assert!(planner.run(Duration::from_millis(50)).unwrap());
        assert!(planner.is_solved());
        assert_eq!(planner.iterations(), 0);
        assert_eq!(planner.final_path().len(), 1);
        assert_eq!(planner.final_waypoints().len(), 2);
    }

    #[test]
    fn test_nearby_goal_with_clear_line_connects_immediately() {
        let start = at(-0.5, 0.0, 0.5);
        let goal = Configuration::new(
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3),
            Vector3::new(-0.3, 0.1, 0.5),
        );
        let mut planner = planner(start, goal, full_wall);
        assert_eq!(planner.connect(), ExtendStatus::Reached);
        assert_eq!(planner.iterations(), 0);
        assert!(planner.is_solved());
    }

    #[test]
    fn test_run_after_solved_does_no_work() {
        let calls = Rc::new(Cell::new(0usize));
        let counter = calls.clone();
        let checker = move |_: &Isometry3<f64>| {
            counter.set(counter.get() + 1);
            false
        };
        let mut planner = planner(at(0.0, 0.0, 0.5), at(0.5, 0.5, 0.5), checker);
        assert!(planner.run(Duration::from_millis(50)).unwrap());

        let calls_before = calls.get();
        let iterations_before = planner.iterations();
        let forward_before = planner.forward_tree().len();
        assert!(planner.run(Duration::from_millis(50)).unwrap());
        assert!(planner.run_iterations(10).unwrap());
        assert!(planner.step().unwrap());
        assert_eq!(planner.connect(), ExtendStatus::Reached);
        assert_eq!(calls.get(), calls_before);
        assert_eq!(planner.iterations(), iterations_before);
        assert_eq!(planner.forward_tree().len(), forward_before);
    }

    #[test]
    fn test_missing_limits_surface_as_configuration_error() {
        let mut planner =
            BiRrtPlanner::new(at(-0.5, 0.0, 0.5), at(0.5, 0.0, 0.5), full_wall, PlannerConfig::default()).unwrap();
        let result = planner.run(Duration::from_millis(50));
        assert!(matches!(result, Err(PlanningError::Configuration(_))));
        assert_eq!(planner.iterations(), 0);
        assert!(!planner.is_solved());
    }

    #[test]
    fn test_first_iteration_grows_forward_tree() {
        let mut planner = planner(at(-0.5, -0.5, 0.5), at(0.5, 0.5, 0.5), free);
        assert_eq!(planner.growth_role(), TreeRole::Backward);

        assert!(planner.step().unwrap());
        assert_eq!(planner.iterations(), 1);
        assert_eq!(planner.forward_tree().len(), 2);
        assert_eq!(planner.backward_tree().len(), 1);
        assert_eq!(planner.backward_tree().tip(), 0);

        let path = planner.final_path();
        assert_eq!(path.len(), 2);
        let text = planner.final_translation_string();
        let parsed: PiecewisePolynomial = text.parse().unwrap();
        assert_eq!(parsed.chunks().len(), 2);
        assert!((parsed.duration() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_extend_reached_adds_sample_exactly() {
        let mut planner = planner(at(0.0, 0.0, 0.5), at(0.9, 0.9, 0.5), free);
        let sample = at(0.3, 0.0, 0.5);
        assert_eq!(planner.extend_toward(TreeRole::Forward, &sample), ExtendStatus::Reached);

        let tree = planner.forward_tree();
        assert_eq!(tree.len(), 2);
        let added = tree.last();
        assert_eq!(added.parent(), Some(0));
        assert_eq!(added.depth(), 1);
        assert_eq!(added.config(), &sample);
    }

    #[test]
    fn test_extend_advanced_limits_rotation_only() {
        let mut planner = planner(at(0.0, 0.0, 0.5), at(0.9, 0.9, 0.5), free);
        let target = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 3.0);
        let sample = Configuration::new(target, Vector3::new(0.8, -0.6, 0.2));
        assert_eq!(planner.extend_toward(TreeRole::Forward, &sample), ExtendStatus::Advanced);

        let added = planner.forward_tree().last().config().clone();
        // translation goes all the way, rotation only part of it
        assert_eq!(added.position, sample.position);
        let moved = rotation_geodesic(&UnitQuaternion::identity(), &added.orientation);
        assert!(moved > 0.0);
        assert!(moved < 3.0);
        assert!(rotation_geodesic(&added.orientation, &target) < 3.0);

        // the stored segment joins the parent to the new vertex
        let segment = planner.forward_tree().last().incoming_segment().unwrap();
        assert_same_pose(&segment.start_pose(), &at(0.0, 0.0, 0.5).pose());
        assert_same_pose(&segment.end_pose(), &added.pose());
    }

    #[test]
    fn test_backward_extension_segment_ends_at_parent() {
        let goal = at(0.5, 0.5, 0.5);
        let mut planner = planner(at(-0.5, -0.5, 0.5), goal.clone(), free);
        let sample = at(0.7, 0.2, 0.5);
        assert_eq!(planner.extend_toward(TreeRole::Backward, &sample), ExtendStatus::Reached);

        let segment = planner.backward_tree().last().incoming_segment().unwrap();
        assert_same_pose(&segment.start_pose(), &sample.pose());
        assert_same_pose(&segment.end_pose(), &goal.pose());
    }

    #[test]
    fn test_extend_trapped_leaves_trees_unchanged() {
        let mut planner = planner(at(-0.5, 0.0, 0.5), at(0.5, 0.0, 0.5), full_wall);

        // sample inside the wall
        assert_eq!(planner.extend_toward(TreeRole::Forward, &at(0.0, 0.3, 0.5)), ExtendStatus::Trapped);
        // sample beyond the wall
        assert_eq!(planner.extend_toward(TreeRole::Forward, &at(0.6, 0.3, 0.5)), ExtendStatus::Trapped);
        assert_eq!(planner.forward_tree().len(), 1);
        assert_eq!(planner.backward_tree().len(), 1);
    }

    #[test]
    fn test_extend_falls_back_to_farther_candidate() {
        // small box right between the nearest vertex and the sample
        let blocker = |pose: &Isometry3<f64>| {
            let p = pose.translation.vector;
            (p.x - 1.25).abs() < 0.1 && (p.y - 0.5).abs() < 0.1
        };
        let mut planner = BiRrtPlanner::new(at(0.0, 0.0, 0.0), at(3.0, 3.0, 0.0), blocker, PlannerConfig::default())
            .unwrap()
            .with_seed(3);
        assert_ne!(planner.extend_toward(TreeRole::Forward, &at(1.0, 0.0, 0.0)), ExtendStatus::Trapped);

        let sample = at(1.5, 1.0, 0.0);
        assert_ne!(planner.extend_toward(TreeRole::Forward, &sample), ExtendStatus::Trapped);
        let tree = planner.forward_tree();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.last().parent(), Some(0));
    }

    #[test]
    fn test_extend_with_long_step_reaches_sample() {
        let config = PlannerConfig {
            step_size: 2.0,
            ..Default::default()
        };
        let mut planner = BiRrtPlanner::new(at(0.0, 0.0, 0.0), at(5.0, 0.0, 0.0), free, config)
            .unwrap()
            .with_seed(7);
        // delta is about 3.5: beyond the step, yet sqrt(delta) < step
        let sample = Configuration::new(
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.5),
            Vector3::new(3.0, 0.0, 0.0),
        );
        assert!(planner.distance(&at(0.0, 0.0, 0.0), &sample) > 2.0);
        assert_eq!(planner.extend_toward(TreeRole::Forward, &sample), ExtendStatus::Reached);
        assert_eq!(planner.forward_tree().last().config(), &sample);
    }

    #[test]
    fn test_connect_falls_back_to_farther_candidate() {
        // small box on the direct motion from the newest vertex to the goal
        let blocker = |pose: &Isometry3<f64>| {
            let p = pose.translation.vector;
            (p.x - 1.5).abs() < 0.1 && p.y.abs() < 0.1
        };
        let mut planner = BiRrtPlanner::new(at(0.0, 1.0, 0.0), at(2.0, 0.0, 0.0), blocker, PlannerConfig::default())
            .unwrap()
            .with_seed(3);
        assert_ne!(planner.extend_toward(TreeRole::Forward, &at(1.0, 0.0, 0.0)), ExtendStatus::Trapped);
        assert_eq!(planner.forward_tree().len(), 2);

        // growth role is backward before the first iteration, so link from
        // the goal tree's newest vertex into the forward tree
        assert_eq!(planner.growth_role(), TreeRole::Backward);
        assert_eq!(planner.connect(), ExtendStatus::Reached);
        assert!(planner.is_solved());
        assert_eq!(planner.forward_tree().tip(), 0);
        assert_eq!(planner.final_path().len(), 1);
    }

    #[test]
    fn test_failed_connect_mutates_nothing() {
        let mut planner = planner(at(-0.5, 0.0, 0.5), at(0.5, 0.0, 0.5), full_wall);
        assert_ne!(planner.extend_toward(TreeRole::Forward, &at(-0.8, 0.6, 0.2)), ExtendStatus::Trapped);

        let forward = (planner.forward_tree().len(), planner.forward_tree().tip());
        let backward = (planner.backward_tree().len(), planner.backward_tree().tip());
        assert_eq!(planner.connect(), ExtendStatus::Trapped);
        assert!(!planner.is_solved());
        assert!(planner.connecting_segment().is_none());
        assert_eq!((planner.forward_tree().len(), planner.forward_tree().tip()), forward);
        assert_eq!((planner.backward_tree().len(), planner.backward_tree().tip()), backward);
        assert!(planner.final_path().is_empty());
        assert!(planner.final_waypoints().is_empty());
        assert!(planner.final_translation_string().is_empty());
    }

    #[test]
    fn test_impassable_wall_exhausts_budget() {
        let mut planner = planner(at(-0.5, 0.0, 0.5), at(0.5, 0.0, 0.5), full_wall);
        let solved = planner.run(Duration::from_millis(200)).unwrap();
        assert!(!solved);
        assert!(planner.iterations() > 0);
        assert!(planner.running_time() > Duration::ZERO);
        assert!(planner.final_path().is_empty());

        for tree in [planner.forward_tree(), planner.backward_tree()] {
            for (i, v) in tree.vertices().iter().enumerate() {
                assert!(!full_wall(&v.config().pose()));
                let chain = tree.chain_to_root(i);
                assert_eq!(chain.len(), v.depth() + 1);
            }
        }
        assert!(planner.forward_tree().vertices().iter().all(|v| v.config().position.x <= -0.1));
        assert!(planner.backward_tree().vertices().iter().all(|v| v.config().position.x >= 0.1));

        // more budget keeps searching from the same trees
        let grown = planner.forward_tree().len() + planner.backward_tree().len();
        assert!(!planner.run(Duration::from_millis(20)).unwrap());
        assert!(planner.forward_tree().len() + planner.backward_tree().len() >= grown);
    }

    #[test]
    fn test_wall_with_gap_yields_continuous_path() {
        let start = at(-0.5, -0.5, 0.5);
        let goal = Configuration::new(
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 2.5),
            Vector3::new(0.5, -0.5, 0.5),
        );
        let mut planner = planner(start.clone(), goal.clone(), wall_with_gap);
        assert_eq!(planner.connect(), ExtendStatus::Trapped);

        assert!(planner.run_iterations(2000).unwrap());
        assert!(planner.iterations() > 0);

        let trajectory = planner.final_trajectory();
        let segments = trajectory.segments();
        assert!(segments.len() >= 2);
        assert_same_pose(&segments[0].start_pose(), &start.pose());
        assert_same_pose(&segments[segments.len() - 1].end_pose(), &goal.pose());
        for pair in segments.windows(2) {
            assert_same_pose(&pair[0].end_pose(), &pair[1].start_pose());
        }
        for segment in segments {
            assert!(check_trajectory(&wall_with_gap, &segment.rotation, &segment.translation, 0.01).is_feasible());
        }

        let duration = trajectory.duration();
        assert!((duration - 0.5 * segments.len() as f64).abs() < 1e-9);
        assert_same_pose(&trajectory.pose_at(duration).unwrap(), &goal.pose());
        assert!((segments[0].rotation.duration() - 0.5).abs() < 1e-12);

        let waypoints = planner.final_waypoints();
        assert_eq!(waypoints.len(), segments.len() + 1);
        assert_eq!(waypoints[0], start);
        assert_eq!(waypoints[waypoints.len() - 1], goal);
    }

    #[test]
    fn test_same_seed_same_search() {
        let run = || {
            let mut planner = planner(at(-0.5, -0.5, 0.5), at(0.5, -0.5, 0.5), wall_with_gap);
            planner.run_iterations(2000).unwrap();
            (
                planner.iterations(),
                planner.forward_tree().len(),
                planner.backward_tree().len(),
                planner.final_waypoints(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_display_summary() {
        let planner = planner(at(0.0, 0.0, 0.0), at(1.0, 0.0, 0.0), free);
        let summary = planner.to_string();
        assert!(summary.starts_with("Total running time : "));
        assert!(summary.ends_with("Total number of iterations : 0"));
    }
}
