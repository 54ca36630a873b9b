use super::tree::TreeBuilder;
use crate::observer::TreeObserver;
use std::sync::Arc;

impl TreeBuilder {
    // Set methods for paramters

    /// Set whether sibling subtrees are grown in parallel.
    /// * `parallel` - Grow on a rayon thread pool when `true`.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }

    /// Set the number of threads on the builder.
    /// * `num_threads` - Threads used for parallel growth, `None` lets rayon decide.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set the observer receiving build events.
    /// * `observer` - Replaces the default `LogObserver`.
    pub fn set_observer(mut self, observer: Arc<dyn TreeObserver>) -> Self {
        self.observer = observer;
        self
    }
}
