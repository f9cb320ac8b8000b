//! Scoped worker pool for embarrassingly parallel chunk work.
//!
//! Jobs are queued on a `crossbeam-channel`, drained by named worker threads,
//! and the results are put back into submission order before returning.
//! Returning from [`run_parallel`] is the barrier: every job has finished.

use crossbeam_channel::unbounded;

use crate::error::TerrainError;

/// Default worker count: one per logical CPU.
pub fn default_thread_count() -> usize {
    num_cpus::get().max(1)
}

/// Run `work` on every job across up to `threads` worker threads.
///
/// The returned vector is in the same order as `jobs`, independent of which
/// worker finished first.
///
/// # Errors
///
/// Returns [`TerrainError::WorkerPanicked`] if any job panicked, or
/// [`TerrainError::WorkerSpawn`] if a thread could not be started.
pub fn run_parallel<T, R, F>(threads: usize, jobs: Vec<T>, work: F) -> Result<Vec<R>, TerrainError>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
{
    let job_count = jobs.len();
    if job_count == 0 {
        return Ok(Vec::new());
    }
    let threads = threads.clamp(1, job_count);

    let (job_sender, job_receiver) = unbounded::<(usize, T)>();
    let (result_sender, result_receiver) = unbounded::<(usize, R)>();
    for job in jobs.into_iter().enumerate() {
        // The receiver is alive until the end of this function.
        let _ = job_sender.send(job);
    }
    drop(job_sender);

    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for _ in 0..threads {
            let receiver = job_receiver.clone();
            let sender = result_sender.clone();
            let work = &work;

            let handle = std::thread::Builder::new()
                .name("chunk-gen-worker".into())
                .spawn_scoped(scope, move || {
                    while let Ok((index, job)) = receiver.recv() {
                        let _ = sender.send((index, work(job)));
                    }
                })
                .map_err(TerrainError::WorkerSpawn)?;
            handles.push(handle);
        }

        let mut panicked = false;
        for handle in handles {
            panicked |= handle.join().is_err();
        }
        if panicked {
            return Err(TerrainError::WorkerPanicked);
        }
        Ok(())
    })?;

    let mut slots: Vec<Option<R>> = (0..job_count).map(|_| None).collect();
    for (index, result) in result_receiver.try_iter() {
        slots[index] = Some(result);
    }
    slots
        .into_iter()
        .collect::<Option<Vec<R>>>()
        .ok_or(TerrainError::WorkerPanicked)
}
