//! Independent search chains over deep clones of a model.

use rayon::prelude::*;
use tracing::debug;

use super::CoreModel;

impl CoreModel {
    /// Forks `count` independent copies of the model.
    ///
    /// Each copy gets its own random source seeded from this model's, so a
    /// seeded model forks reproducibly. Drawing the seeds advances this
    /// model's random source. Forks share this model's event listeners, so
    /// their events interleave in the same sinks.
    pub fn fork_chains(&mut self, count: usize) -> Vec<CoreModel> {
        (0..count)
            .map(|chain| {
                let seed = self.actions.next_seed();
                debug!(event = "chain_forked", model = %self.name(), chain, seed);
                self.deep_clone_with_seed(seed)
            })
            .collect()
    }

    /// Runs `search` on `count` forked chains in parallel and returns each
    /// chain's result with the chain's final model, in chain order.
    pub fn run_chains<F, R>(&mut self, count: usize, search: F) -> Vec<(R, CoreModel)>
    where
        F: Fn(usize, &mut CoreModel) -> R + Sync + Send,
        R: Send,
    {
        self.fork_chains(count)
            .into_par_iter()
            .enumerate()
            .map(|(chain, mut model)| {
                let result = search(chain, &mut model);
                (result, model)
            })
            .collect()
    }
}
