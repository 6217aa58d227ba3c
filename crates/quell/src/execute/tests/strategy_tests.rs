use crate::execute::FieldStrategy;
use crate::execute::FieldTask;
use crate::execute::ParallelStrategy;
use crate::execute::SerialStrategy;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

fn counting_tasks<'a>(
    completed: &'a AtomicUsize,
    order: &'a Mutex<Vec<usize>>,
    count: usize,
) -> Vec<FieldTask<'a>> {
    (0..count)
        .map(|index| {
            let task: FieldTask<'a> = Box::new(move || {
                order.lock().unwrap().push(index);
                completed.fetch_add(1, Ordering::SeqCst);
            });
            task
        })
        .collect()
}

#[test]
fn serial_strategy_runs_every_task_in_order() {
    let completed = AtomicUsize::new(0);
    let order = Mutex::new(vec![]);
    SerialStrategy.run_many(counting_tasks(&completed, &order, 8));
    assert_eq!(completed.load(Ordering::SeqCst), 8);
    assert_eq!(*order.lock().unwrap(), (0..8).collect::<Vec<_>>());
}

#[test]
fn parallel_strategy_runs_every_task_before_returning() {
    let completed = AtomicUsize::new(0);
    let order = Mutex::new(vec![]);
    ParallelStrategy.run_many(counting_tasks(&completed, &order, 32));
    // Ordering is unspecified, but completion is guaranteed on return.
    assert_eq!(completed.load(Ordering::SeqCst), 32);
    let mut seen = order.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, (0..32).collect::<Vec<_>>());
}

#[test]
fn strategies_accept_an_empty_task_list() {
    SerialStrategy.run_many(vec![]);
    ParallelStrategy.run_many(vec![]);
}
