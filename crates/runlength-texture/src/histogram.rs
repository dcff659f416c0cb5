//! Gray-level run-length histograms
//!
//! A [`RunLengthHistogram`] counts runs by (intensity bin, length bin) for
//! one voxel and one direction. Length bins are one pixel step wide: a run
//! of `L` voxels lands in length bin `L - 1`, so the histogram needs as
//! many length bins as the longest run a window can hold.
//!
//! [`accumulate_runs`] scans a [`NeighborhoodWindow`] along one resolved
//! [`Direction`] and fills the histogram. A voxel starts a run when the voxel
//! one step back is outside the window or holds a different bin, so every
//! maximal run is counted exactly once, from its first voxel. Runs stop at
//! the window edge, at excluded voxels and at bin changes; they are never
//! wrapped or extended past the window.

use crate::neighborhood::NeighborhoodWindow;
use crate::offset::Direction;

/// Dense (intensity bin × length bin) run counts.
///
/// Storage is row-major by intensity bin. The histogram is worker-private
/// scratch: [`clear`](Self::clear) resets it between voxel/direction
/// pairs without reallocating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLengthHistogram {
    intensity_bins: usize,
    length_bins: usize,
    counts: Vec<u32>,
    /// Runs per intensity bin
    intensity_totals: Vec<u32>,
    /// Runs per length bin
    length_totals: Vec<u32>,
    total_runs: u32,
}

impl RunLengthHistogram {
    /// Create an empty histogram.
    pub fn new(intensity_bins: usize, length_bins: usize) -> Self {
        RunLengthHistogram {
            intensity_bins,
            length_bins,
            counts: vec![0; intensity_bins * length_bins],
            intensity_totals: vec![0; intensity_bins],
            length_totals: vec![0; length_bins],
            total_runs: 0,
        }
    }

    /// Number of intensity bins
    #[inline]
    pub fn intensity_bins(&self) -> usize {
        self.intensity_bins
    }

    /// Number of run-length bins
    #[inline]
    pub fn length_bins(&self) -> usize {
        self.length_bins
    }

    /// Total number of accumulated runs
    #[inline]
    pub fn total_runs(&self) -> u32 {
        self.total_runs
    }

    /// Count for one (intensity bin, length bin) cell.
    #[inline]
    pub fn get(&self, intensity: usize, length: usize) -> u32 {
        self.counts[intensity * self.length_bins + length]
    }

    /// Counts of one intensity bin, indexed by length bin.
    #[inline]
    pub fn row(&self, intensity: usize) -> &[u32] {
        let start = intensity * self.length_bins;
        &self.counts[start..start + self.length_bins]
    }

    /// Number of runs in each intensity bin
    #[inline]
    pub fn intensity_marginal(&self) -> &[u32] {
        &self.intensity_totals
    }

    /// Number of runs in each length bin
    #[inline]
    pub fn length_marginal(&self) -> &[u32] {
        &self.length_totals
    }

    /// Record one run of `length` voxels (>= 1) in `intensity`.
    ///
    /// Runs longer than the histogram's length bins are folded into the
    /// last bin.
    #[inline]
    pub fn add_run(&mut self, intensity: usize, length: usize) {
        let bin = length.clamp(1, self.length_bins) - 1;
        self.counts[intensity * self.length_bins + bin] += 1;
        self.intensity_totals[intensity] += 1;
        self.length_totals[bin] += 1;
        self.total_runs += 1;
    }

    /// Reset every count to zero.
    pub fn clear(&mut self) {
        self.counts.fill(0);
        self.intensity_totals.fill(0);
        self.length_totals.fill(0);
        self.total_runs = 0;
    }
}

/// Accepted physical run lengths, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    /// Shortest accepted run distance
    pub min: f64,
    /// Longest accepted run distance
    pub max: f64,
}

impl DistanceRange {
    /// Check whether a run distance is accepted.
    #[inline]
    pub fn accepts(&self, distance: f64) -> bool {
        distance >= self.min && distance <= self.max
    }
}

impl Default for DistanceRange {
    fn default() -> Self {
        DistanceRange {
            min: f64::MIN,
            max: f64::MAX,
        }
    }
}

/// Add every run of `window` along `direction` to `hist`.
///
/// A run of `L` voxels has distance `L * step_length` and is dropped
/// unless `range` accepts it. `hist` is not cleared first.
pub fn accumulate_runs(
    window: &NeighborhoodWindow<'_>,
    direction: &Direction,
    range: DistanceRange,
    hist: &mut RunLengthHistogram,
) {
    let delta = direction.linear_delta();
    let components = direction.components();
    let mut probe = vec![0isize; components.len()];

    let mut voxels = window.iter();
    while let Some(start) = voxels.next() {
        let bin = window.bin_at(start);

        // Not a run start if the voxel one step back continues the run.
        if step_back(&mut probe, voxels.position(), components)
            && window.contains(&probe)
            && window.bin_at(start.wrapping_add_signed(-delta)) == bin
        {
            continue;
        }

        let mut length = 1usize;
        let mut linear = start;
        for (p, &x) in probe.iter_mut().zip(voxels.position()) {
            *p = x as isize;
        }
        loop {
            if !advance_probe(&mut probe, components) || !window.contains(&probe) {
                break;
            }
            linear = linear.wrapping_add_signed(delta);
            if window.bin_at(linear) != bin {
                break;
            }
            length += 1;
        }

        if range.accepts(length as f64 * direction.step_length()) {
            hist.add_run(bin as usize, length);
        }
    }
}

/// Write the voxel one step before `position` into `probe`.
///
/// Returns `false` if a coordinate leaves the `isize` range; such a
/// position is outside every window.
fn step_back(probe: &mut [isize], position: &[usize], components: &[isize]) -> bool {
    for ((p, &x), &c) in probe.iter_mut().zip(position).zip(components) {
        match (x as isize).checked_sub(c) {
            Some(v) => *p = v,
            None => return false,
        }
    }
    true
}

/// Move `probe` one step forward, or return `false` on overflow.
fn advance_probe(probe: &mut [isize], components: &[isize]) -> bool {
    for (p, &c) in probe.iter_mut().zip(components) {
        match p.checked_add(c) {
            Some(v) => *p = v,
            None => return false,
        }
    }
    true
}
