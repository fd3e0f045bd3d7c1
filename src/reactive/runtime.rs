use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

static NEXT_RUNTIME_ID: AtomicU64 = AtomicU64::new(1);

pub type RuntimeId = u64;
pub type SignalId = usize;
pub type EffectId = usize;

type EffectCallback = Box<dyn FnMut()>;

/// Dependency graph between signals and effects.
///
/// There is one runtime per thread. Signal and effect ids are only meaningful
/// in the runtime that issued them, so every handle remembers its runtime's
/// [`RuntimeId`] and is ignored by the others.
///
/// The runtime is never borrowed while user code runs: effect callbacks are
/// taken out of their slot before they are invoked and put back afterwards,
/// so effects are free to read and write signals. Slots of released signals
/// and disposed effects are recycled.
pub struct Runtime {
    id: RuntimeId,
    current_effect: Option<EffectId>,
    pending_effects: Vec<EffectId>,
    effect_callbacks: Vec<Option<EffectCallback>>,
    effect_alive: Vec<bool>,
    effect_dependencies: Vec<HashSet<SignalId>>,
    signal_subscribers: Vec<HashSet<EffectId>>,
    free_signals: Vec<SignalId>,
    free_effects: Vec<EffectId>,
    batch_depth: usize,
    flushing: bool,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            id: NEXT_RUNTIME_ID.fetch_add(1, Ordering::Relaxed),
            current_effect: None,
            pending_effects: Vec::new(),
            effect_callbacks: Vec::new(),
            effect_alive: Vec::new(),
            effect_dependencies: Vec::new(),
            signal_subscribers: Vec::new(),
            free_signals: Vec::new(),
            free_effects: Vec::new(),
            batch_depth: 0,
            flushing: false,
        }
    }

    pub fn id(&self) -> RuntimeId {
        self.id
    }

    pub fn allocate_signal(&mut self) -> SignalId {
        if let Some(id) = self.free_signals.pop() {
            return id;
        }
        self.signal_subscribers.push(HashSet::new());
        self.signal_subscribers.len() - 1
    }

    /// Forget a dropped signal and make its slot available again
    pub fn release_signal(&mut self, signal_id: SignalId) {
        if signal_id >= self.signal_subscribers.len() {
            return;
        }
        let subscribers = std::mem::take(&mut self.signal_subscribers[signal_id]);
        for effect_id in subscribers {
            self.effect_dependencies[effect_id].remove(&signal_id);
        }
        self.free_signals.push(signal_id);
    }

    pub fn allocate_effect(&mut self, callback: EffectCallback) -> EffectId {
        if let Some(id) = self.free_effects.pop() {
            self.effect_callbacks[id] = Some(callback);
            self.effect_alive[id] = true;
            return id;
        }
        self.effect_callbacks.push(Some(callback));
        self.effect_alive.push(true);
        self.effect_dependencies.push(HashSet::new());
        self.effect_callbacks.len() - 1
    }

    pub fn track_read(&mut self, signal_id: SignalId) {
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        if let Some(effect_id) = self.current_effect {
            self.signal_subscribers[signal_id].insert(effect_id);
            self.effect_dependencies[effect_id].insert(signal_id);
        }
    }

    pub fn notify_write(&mut self, signal_id: SignalId) {
        if signal_id >= self.signal_subscribers.len() {
            return;
        }

        let mut subscribers: Vec<_> = self.signal_subscribers[signal_id].iter().copied().collect();
        subscribers.sort_unstable();
        for effect_id in subscribers {
            if !self.pending_effects.contains(&effect_id) {
                self.pending_effects.push(effect_id);
            }
        }
    }

    /// Unsubscribe an effect. The callback is handed back so the caller can
    /// drop it once the runtime is no longer borrowed.
    pub fn dispose_effect(&mut self, effect_id: EffectId) -> Option<EffectCallback> {
        if !self.effect_alive.get(effect_id).copied().unwrap_or(false) {
            return None;
        }
        self.clear_dependencies(effect_id);
        self.effect_alive[effect_id] = false;
        self.pending_effects.retain(|id| *id != effect_id);

        // A running effect has no callback in its slot; `end_effect` frees it
        let callback = self.effect_callbacks[effect_id].take();
        if callback.is_some() {
            self.free_effects.push(effect_id);
        }
        callback
    }

    /// Number of effects that are still alive
    pub fn live_effects(&self) -> usize {
        self.effect_alive.iter().filter(|alive| **alive).count()
    }

    /// Signal slots ever allocated, in use or free
    pub fn signal_slots(&self) -> usize {
        self.signal_subscribers.len()
    }

    /// Effect slots ever allocated, in use or free
    pub fn effect_slots(&self) -> usize {
        self.effect_callbacks.len()
    }

    fn clear_dependencies(&mut self, effect_id: EffectId) {
        let deps = std::mem::take(&mut self.effect_dependencies[effect_id]);
        for signal_id in deps {
            self.signal_subscribers[signal_id].remove(&effect_id);
        }
    }

    /// Detach the effect's callback and make it the tracking target
    fn begin_effect(&mut self, effect_id: EffectId) -> Option<(EffectCallback, Option<EffectId>)> {
        if !self.effect_alive.get(effect_id).copied().unwrap_or(false) {
            return None;
        }
        let callback = self.effect_callbacks[effect_id].take()?;

        // Dependencies are re-tracked on this run
        self.clear_dependencies(effect_id);

        let previous = self.current_effect.replace(effect_id);
        Some((callback, previous))
    }

    /// Put the callback back, or hand it out for dropping if the effect was
    /// disposed while it ran
    fn end_effect(
        &mut self,
        effect_id: EffectId,
        callback: EffectCallback,
        previous: Option<EffectId>,
    ) -> Option<EffectCallback> {
        self.current_effect = previous;
        if self.effect_alive[effect_id] {
            self.effect_callbacks[effect_id] = Some(callback);
            None
        } else {
            self.free_effects.push(effect_id);
            Some(callback)
        }
    }

    fn pop_pending(&mut self) -> Option<EffectId> {
        if self.pending_effects.is_empty() {
            None
        } else {
            Some(self.pending_effects.remove(0))
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

pub fn with_runtime<F, R>(f: F) -> R
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

/// Try to access the runtime. Returns `None` without calling `f` if the
/// runtime is unavailable, e.g. while the thread is shutting down.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    RUNTIME
        .try_with(|rt| rt.try_borrow_mut().ok().map(|mut runtime| f(&mut runtime)))
        .ok()
        .flatten()
}

/// Like [`try_with_runtime`], but only if this thread's runtime is `owner`
pub fn with_owning_runtime<F, R>(owner: RuntimeId, f: F) -> Option<R>
where
    F: FnOnce(&mut Runtime) -> R,
{
    try_with_runtime(|rt| (rt.id == owner).then(|| f(rt))).flatten()
}

/// Run an effect with dependency tracking
pub fn run_effect(effect_id: EffectId) {
    let Some((mut callback, previous)) = with_runtime(|rt| rt.begin_effect(effect_id)) else {
        return;
    };
    callback();
    let disposed = with_runtime(|rt| rt.end_effect(effect_id, callback, previous));
    drop(disposed);
}

/// Run pending effects until none are left. Nested calls (from inside an
/// effect) and calls inside a batch are no-ops; the outer flush picks the
/// work up.
pub fn flush_effects() {
    let proceed = try_with_runtime(|rt| {
        if rt.batch_depth == 0 && !rt.flushing {
            rt.flushing = true;
            true
        } else {
            false
        }
    })
    .unwrap_or(false);
    if !proceed {
        return;
    }

    while let Some(effect_id) = with_runtime(|rt| rt.pop_pending()) {
        run_effect(effect_id);
    }

    with_runtime(|rt| rt.flushing = false);
}

/// Group signal writes so dependent effects run once, after `f` returns
pub fn batch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();
    with_runtime(|rt| rt.batch_depth -= 1);
    flush_effects();
    result
}
