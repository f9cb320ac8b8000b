//! Poisson-disc (blue-noise) point sampling and prop scattering.
//!
//! Bridson-style dart throwing: an active spawn list grows outward from one
//! random seed point, each candidate is tested against a background grid whose
//! cells are small enough to hold at most one accepted point, and a spawn point
//! is retired once `attempts` candidates around it have all been rejected.

use std::time::{Duration, Instant};

use glam::{DVec2, DVec3};
use hashbrown::HashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::seed::{SCATTER_STREAM, det_cos, det_sin, stream_rng};

/// A 2D point inside the sampling domain.
pub type SamplePoint = DVec2;

/// Candidates tried around a spawn point before it is retired.
pub const DEFAULT_ATTEMPTS: u32 = 30;

/// Optional limits for long-running sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleBudget {
    /// Stop once this many points have been accepted.
    pub max_points: Option<usize>,
    /// Stop once this much wall-clock time has elapsed. Results under a time
    /// budget depend on machine speed and are not reproducible.
    pub time_limit: Option<Duration>,
}

impl SampleBudget {
    /// No limits: sample until the domain is saturated.
    pub const UNLIMITED: Self = Self {
        max_points: None,
        time_limit: None,
    };
}

/// Sparse background grid used for neighbour lookups.
///
/// Cell size is `min_distance / √2`, so a cell's diagonal equals the minimum
/// distance and no cell can hold two accepted points.
struct SpawnGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), SamplePoint>,
}

impl SpawnGrid {
    fn new(min_distance: f64) -> Self {
        Self {
            cell_size: min_distance / std::f64::consts::SQRT_2,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: SamplePoint) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, p: SamplePoint) {
        let cell = self.cell_of(p);
        self.cells.insert(cell, p);
    }

    /// Returns `true` if no accepted point lies closer than `min_distance`.
    ///
    /// Two cells in each direction cover the full interaction radius.
    fn is_clear(&self, p: SamplePoint, min_distance: f64) -> bool {
        let (cx, cy) = self.cell_of(p);
        let min_sq = min_distance * min_distance;
        for ny in (cy - 2)..=(cy + 2) {
            for nx in (cx - 2)..=(cx + 2) {
                if let Some(q) = self.cells.get(&(nx, ny))
                    && q.distance_squared(p) < min_sq
                {
                    return false;
                }
            }
        }
        true
    }
}

/// Generates blue-noise point sets over `[0, w] × [0, h]`.
#[derive(Clone, Copy, Debug)]
pub struct PoissonDiscSampler {
    min_distance: f64,
    domain: DVec2,
    attempts: u32,
}

impl PoissonDiscSampler {
    pub fn new(min_distance: f64, domain: DVec2) -> Self {
        Self {
            min_distance,
            domain,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Override the number of candidates tried per spawn point.
    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    pub fn domain(&self) -> DVec2 {
        self.domain
    }

    /// Returns `true` if the parameters describe a samplable domain.
    pub fn is_degenerate(&self) -> bool {
        !(self.min_distance.is_finite() && self.min_distance > 0.0)
            || !(self.domain.is_finite() && self.domain.x > 0.0 && self.domain.y > 0.0)
    }

    /// Sample with a ChaCha8 RNG derived from `seed`. Reproducible for the same
    /// seed and parameters unless a time budget cuts the run short.
    pub fn generate(&self, seed: u64, budget: SampleBudget) -> Vec<SamplePoint> {
        let mut rng = stream_rng(seed, SCATTER_STREAM);
        self.generate_with_rng(&mut rng, budget)
    }

    /// Sample using a caller-supplied RNG.
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R, budget: SampleBudget) -> Vec<SamplePoint> {
        if self.is_degenerate() {
            warn!(
                min_distance = self.min_distance,
                domain_x = self.domain.x,
                domain_y = self.domain.y,
                "degenerate sampling domain, returning no points"
            );
            return Vec::new();
        }
        if budget.max_points == Some(0) {
            return Vec::new();
        }

        let deadline = budget.time_limit.map(|limit| Instant::now() + limit);
        let r = self.min_distance;
        let mut grid = SpawnGrid::new(r);
        let mut points = Vec::new();
        let mut spawn_points = Vec::new();

        let first = DVec2::new(
            rng.random_range(0.0..self.domain.x),
            rng.random_range(0.0..self.domain.y),
        );
        grid.insert(first);
        points.push(first);
        spawn_points.push(first);

        'spawn: while !spawn_points.is_empty() {
            if let Some(deadline) = deadline
                && Instant::now() >= deadline
            {
                debug!(points = points.len(), "poisson sampling stopped by time budget");
                break;
            }

            let spawn_index = rng.random_range(0..spawn_points.len());
            let centre = spawn_points[spawn_index];

            for _ in 0..self.attempts {
                let angle = rng.random::<f64>() * std::f64::consts::TAU;
                let radius = rng.random_range(r..=2.0 * r);
                let candidate = centre + DVec2::new(det_cos(angle), det_sin(angle)) * radius;

                if self.in_domain(candidate) && grid.is_clear(candidate, r) {
                    grid.insert(candidate);
                    points.push(candidate);
                    spawn_points.push(candidate);

                    if budget.max_points.is_some_and(|max| points.len() >= max) {
                        debug!(points = points.len(), "poisson sampling stopped by point budget");
                        break 'spawn;
                    }
                    continue 'spawn;
                }
            }

            spawn_points.swap_remove(spawn_index);
        }

        points
    }

    fn in_domain(&self, p: SamplePoint) -> bool {
        p.x >= 0.0 && p.x <= self.domain.x && p.y >= 0.0 && p.y <= self.domain.y
    }
}

/// Generate a blue-noise point set with default attempts and no budget.
pub fn generate(min_distance: f64, domain: DVec2, seed: u64) -> Vec<SamplePoint> {
    PoissonDiscSampler::new(min_distance, domain).generate(seed, SampleBudget::UNLIMITED)
}

/// Prop-scattering parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterSettings {
    /// Minimum distance between placed props, in world units.
    pub min_distance: f64,
    /// Candidates tried per spawn point.
    pub attempts: u32,
    /// Seed for placement.
    pub seed: u64,
    /// Optional cap on the number of props.
    pub max_points: Option<usize>,
    /// Optional wall-clock cap in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            min_distance: 2.5,
            attempts: DEFAULT_ATTEMPTS,
            seed: 0,
            max_points: None,
            time_limit_ms: None,
        }
    }
}

impl ScatterSettings {
    pub fn budget(&self) -> SampleBudget {
        SampleBudget {
            max_points: self.max_points,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

/// Scatter props over a square `map_side_length` domain.
///
/// `place` is called once per accepted point with world position
/// `(x, height, y)`. Returns the number of props placed.
pub fn scatter_props(
    map_side_length: f64,
    height: f64,
    settings: &ScatterSettings,
    mut place: impl FnMut(DVec3),
) -> usize {
    let sampler = PoissonDiscSampler::new(settings.min_distance, DVec2::splat(map_side_length))
        .with_attempts(settings.attempts);
    let points = sampler.generate(settings.seed, settings.budget());
    for p in &points {
        place(DVec3::new(p.x, height, p.y));
    }
    points.len()
}
