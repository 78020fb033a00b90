/// JobSystem trait - fan-out of indexed work over a worker pool

use std::ops::Range;

/// One contiguous group of job indices handed to a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobGroup {
    /// Position of the group, 0..group_count
    pub group_index: usize,
    /// Job indices covered by this group
    pub range: Range<usize>,
}

/// Number of groups needed to cover `job_count` jobs in groups of `group_size`
pub fn group_count(job_count: usize, group_size: usize) -> usize {
    job_count.div_ceil(group_size.max(1))
}

/// Worker pool interface.
///
/// `dispatch` is scoped: it returns only after every group has run, so the
/// caller's join is the return of the call itself. Groups may run in any
/// order and on any thread, including the calling one.
pub trait JobSystem: Send + Sync {
    /// Number of worker threads
    fn num_threads(&self) -> usize;

    /// Split `job_count` jobs into groups of `group_size` and run `job`
    /// once per group. Blocks until all groups are done.
    fn dispatch(&self, job_count: usize, group_size: usize, job: &(dyn Fn(JobGroup) + Sync));
}

/// The group covering `group_index`, clamped to `job_count`
pub(crate) fn job_group(group_index: usize, job_count: usize, group_size: usize) -> JobGroup {
    let group_size = group_size.max(1);
    let start = group_index * group_size;
    let end = (start + group_size).min(job_count);
    JobGroup { group_index, range: start..end }
}
