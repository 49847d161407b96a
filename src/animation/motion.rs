use crate::animation::ease::Ease;
use crate::foundation::core::Coord;
use crate::foundation::error::{TermfxError, TermfxResult};
use crate::foundation::ids::PathId;

/// Ordered waypoint traversal.
///
/// A path starts from wherever its character stands when it is activated, then visits each
/// waypoint in order. Every segment is eased independently.
#[derive(Clone, Debug)]
pub struct Path {
    id: PathId,
    waypoints: Vec<Coord>,
    speed: f64, // cells per tick
    ease: Ease,

    origin: Coord,
    segment: usize,
    traveled: f64, // distance along current segment
    complete: bool,
}

impl Path {
    fn new(id: PathId, speed: f64, ease: Ease) -> Self {
        Self {
            id,
            waypoints: Vec::new(),
            speed,
            ease,
            origin: Coord::default(),
            segment: 0,
            traveled: 0.0,
            complete: false,
        }
    }

    /// Handle issued by the owning [`Motion`].
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Append a waypoint. Returns `self` for chaining.
    pub fn new_waypoint(&mut self, coord: Coord) -> &mut Self {
        self.waypoints.push(coord);
        self
    }

    /// Waypoints in visiting order.
    pub fn waypoints(&self) -> &[Coord] {
        &self.waypoints
    }

    /// Travel per tick, in cells.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Easing applied to each segment's progress.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Index of the waypoint currently being approached.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// `true` once the last waypoint has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn reset(&mut self, origin: Coord) {
        self.origin = origin;
        self.segment = 0;
        self.traveled = 0.0;
        self.complete = false;
    }

    fn segment_bounds(&self) -> (Coord, Coord) {
        let start = match self.segment {
            0 => self.origin,
            i => self.waypoints[i - 1],
        };
        (start, self.waypoints[self.segment])
    }
}

/// Position state of one character plus the paths it owns.
#[derive(Clone, Debug)]
pub struct Motion {
    current: Coord,
    paths: Vec<Path>,
    active: Option<PathId>,
}

impl Motion {
    /// Motion standing at `start` with no paths.
    pub fn new(start: Coord) -> Self {
        Self {
            current: start,
            paths: Vec::new(),
            active: None,
        }
    }

    /// Current position, rounded to the grid.
    pub fn current_coord(&self) -> Coord {
        self.current
    }

    /// Teleport without touching the active path's progress.
    pub fn set_coordinate(&mut self, coord: Coord) {
        self.current = coord;
    }

    /// Create a path owned by this motion. `speed` is in cells per tick and must be positive.
    pub fn new_path(&mut self, speed: f64, ease: Ease) -> TermfxResult<&mut Path> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(TermfxError::config(format!(
                "path speed must be a positive number, got {speed}"
            )));
        }
        let id = PathId(self.paths.len() as u32);
        self.paths.push(Path::new(id, speed, ease));
        let idx = self.paths.len() - 1;
        Ok(&mut self.paths[idx])
    }

    /// Look up a path by handle.
    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.0 as usize)
    }

    /// Mutable access to a path, e.g. to add waypoints after creation.
    pub fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.get_mut(id.0 as usize)
    }

    /// Currently followed path, if any.
    pub fn active_path(&self) -> Option<PathId> {
        self.active
    }

    /// Make `id` the single active path, restarting it from the current position.
    pub fn activate_path(&mut self, id: PathId) -> TermfxResult<()> {
        let current = self.current;
        let path = self
            .paths
            .get_mut(id.0 as usize)
            .ok_or_else(|| TermfxError::invariant(format!("unknown path {id:?}")))?;
        if path.waypoints.is_empty() {
            return Err(TermfxError::invariant(format!(
                "path {id:?} has no waypoints"
            )));
        }
        path.reset(current);
        self.active = Some(id);
        Ok(())
    }

    /// Stop following `id` if it is the active path.
    pub fn deactivate_path(&mut self, id: PathId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// `true` while an active path still has distance to cover.
    pub fn is_moving(&self) -> bool {
        self.active
            .and_then(|id| self.path(id))
            .is_some_and(|p| !p.complete)
    }

    /// Advance the active path by one tick of travel.
    ///
    /// Returns the path id on the tick its final waypoint is reached, and `None` on every other
    /// tick, including all ticks after completion.
    pub(crate) fn step(&mut self) -> Option<PathId> {
        let id = self.active?;
        let path = self.paths.get_mut(id.0 as usize)?;
        if path.complete {
            return None;
        }

        let (start, end) = path.segment_bounds();
        let length = start.distance(end);
        path.traveled = (path.traveled + path.speed).min(length);
        let progress = if length > 0.0 {
            path.traveled / length
        } else {
            1.0
        };
        self.current = start.lerp(end, path.ease.apply(progress));

        if progress < 1.0 {
            return None;
        }
        self.current = end;
        if path.segment + 1 < path.waypoints.len() {
            path.segment += 1;
            path.traveled = 0.0;
            None
        } else {
            path.complete = true;
            Some(id)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
