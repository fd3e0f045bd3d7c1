use super::runtime::{run_effect, with_owning_runtime, with_runtime, EffectId, RuntimeId};

/// A side effect that re-runs whenever a signal it read changes.
///
/// Dropping the `Effect` unsubscribes it.
pub struct Effect {
    id: EffectId,
    runtime: RuntimeId,
}

impl Effect {
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let (runtime, id) = with_runtime(|rt| (rt.id(), rt.allocate_effect(Box::new(f))));
        run_effect(id);
        Self { id, runtime }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        // Dropped here, outside the runtime borrow, so captured signals can
        // release their slots
        let callback = with_owning_runtime(self.runtime, |rt| rt.dispose_effect(self.id));
        drop(callback);
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect").field("id", &self.id).finish()
    }
}

pub fn create_effect<F>(f: F) -> Effect
where
    F: FnMut() + 'static,
{
    Effect::new(f)
}
