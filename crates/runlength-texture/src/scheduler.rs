//! Parallel dispatch over disjoint slabs
//!
//! The output image is cut into one slab per worker along its slowest
//! non-trivial axis (see [`Region::split`]). Because the layout is axis 0
//! fastest, each slab is a contiguous block of the output buffer, so the
//! buffer can be handed out as disjoint `&mut` slices and no worker ever
//! writes where another one does. Every voxel result depends only on
//! read-only inputs, so the output does not depend on the worker count.

use crate::{TextureError, TextureResult};
use rayon::prelude::*;
use runlength_core::{NdImage, Region};

/// Resolve the number of workers: the requested count, or the size of
/// rayon's global pool.
pub fn worker_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or_else(rayon::current_num_threads)
        .max(1)
}

/// Cut `region` into at most `workers` slabs and pair each slab with its
/// block of `data`.
///
/// `data` must be the axis-0-fastest buffer of an image whose full region
/// is `region`.
pub fn partition<'d, T>(
    region: &Region,
    data: &'d mut [T],
    workers: usize,
) -> TextureResult<Vec<(Region, &'d mut [T])>> {
    let slabs = region.split(workers);
    let mut jobs = Vec::with_capacity(slabs.len());
    let mut rest = data;
    for slab in slabs {
        let len = slab.num_voxels();
        if len > rest.len() {
            return Err(TextureError::Internal(format!(
                "slab {:?} exceeds remaining output ({} voxels)",
                slab,
                rest.len()
            )));
        }
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
        jobs.push((slab, head));
        rest = tail;
    }
    if !rest.is_empty() {
        return Err(TextureError::Internal(format!(
            "{} output voxels not covered by any slab",
            rest.len()
        )));
    }
    Ok(jobs)
}

/// Run `job` once per slab of `output` on a pool of `workers` threads.
///
/// `job` receives the slab and the matching output block, in slab
/// iteration order. The first error aborts the run.
pub fn for_each_slab<T, F>(output: &mut NdImage<T>, workers: usize, job: F) -> TextureResult<()>
where
    T: Send,
    F: Fn(&Region, &mut [T]) -> TextureResult<()> + Sync,
{
    let region = output.region();
    let jobs = partition(&region, output.data_mut(), workers)?;
    log::debug!(
        "dispatching {} slabs along axis {:?} to {} workers",
        jobs.len(),
        region.split_axis(),
        workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    pool.install(|| {
        jobs.into_par_iter().try_for_each(|(slab, block)| {
            log::trace!("slab {:?} + {:?}", slab.index(), slab.size());
            job(&slab, block)
        })
    })
}
