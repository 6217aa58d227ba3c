/// One unit of field work: resolve one response key at one level.
pub type FieldTask<'a> = Box<dyn FnOnce() + Send + 'a>;

/// A pluggable scheduler for sibling field work.
///
/// Contract: `run_many` must not return until every task has run. Beyond
/// that, scheduling is free — run them in order, fan them out to workers,
/// or interleave them with a batching layer. The executor hands mutation
/// root fields to the strategy one at a time, so a conforming strategy
/// never reorders mutation side effects.
pub trait FieldStrategy: Send + Sync {
    fn run_many<'a>(&self, tasks: Vec<FieldTask<'a>>);
}

/// Runs tasks in order on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialStrategy;

impl FieldStrategy for SerialStrategy {
    fn run_many<'a>(&self, tasks: Vec<FieldTask<'a>>) {
        for task in tasks {
            task();
        }
    }
}

/// Runs each task on an independent rayon worker; returns when all have
/// completed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelStrategy;

impl FieldStrategy for ParallelStrategy {
    fn run_many<'a>(&self, tasks: Vec<FieldTask<'a>>) {
        rayon::scope(|scope| {
            for task in tasks {
                scope.spawn(move |_| task());
            }
        });
    }
}
