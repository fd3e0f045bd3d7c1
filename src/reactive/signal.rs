use std::sync::{Arc, RwLock};

use super::invalidation::request_frame;
use super::runtime::{flush_effects, with_owning_runtime, with_runtime, RuntimeId, SignalId};

struct SignalInner<T> {
    id: SignalId,
    /// Runtime of the thread that created the signal; `id` only means
    /// something there
    runtime: RuntimeId,
    value: RwLock<T>,
}

impl<T> SignalInner<T> {
    fn track(&self) {
        with_owning_runtime(self.runtime, |rt| rt.track_read(self.id));
    }
}

impl<T> Drop for SignalInner<T> {
    fn drop(&mut self) {
        with_owning_runtime(self.runtime, |rt| rt.release_signal(self.id));
    }
}

/// A reactive signal that can be read and written from any thread.
///
/// Signals are the core primitive of the reactive system. When a signal's
/// value changes, any effects that depend on it will be re-run on the thread
/// that created the signal.
///
/// # Thread Safety
/// Signal values can be read and written from any thread. However, effects
/// only run on the thread that created the signal. Writes from elsewhere
/// update the value and request a frame; the frame loop picks the change up.
pub struct Signal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        let (runtime, id) = with_runtime(|rt| (rt.id(), rt.allocate_signal()));
        Self {
            inner: Arc::new(SignalInner {
                id,
                runtime,
                value: RwLock::new(value),
            }),
        }
    }

    pub fn split(self) -> (ReadSignal<T>, WriteSignal<T>) {
        (
            ReadSignal {
                inner: self.inner.clone(),
            },
            WriteSignal { inner: self.inner },
        )
    }

    /// A read-only handle sharing this signal's value
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            inner: self.inner.clone(),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.track();
        self.with_untracked(f)
    }

    pub fn with_untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        match self.inner.value.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

impl<T: Clone> Signal<T> {
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq> Signal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        write_if_changed(&self.inner, |current| {
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        });
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Updates the signal's value using a closure, only triggering updates if the value changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        update_if_changed(&self.inner, f);
    }
}

/// Read-only handle to a signal.
pub struct ReadSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> ReadSignal<T> {
    pub fn get(&self) -> T {
        self.inner.track();
        self.get_untracked()
    }

    pub fn get_untracked(&self) -> T {
        match self.inner.value.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Write-only handle to a signal.
pub struct WriteSignal<T> {
    inner: Arc<SignalInner<T>>,
}

impl<T> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: PartialEq> WriteSignal<T> {
    /// Sets the signal's value, only triggering updates if the value actually changed.
    pub fn set(&self, value: T) {
        write_if_changed(&self.inner, |current| {
            if *current != value {
                *current = value;
                true
            } else {
                false
            }
        });
    }
}

impl<T: PartialEq + Clone> WriteSignal<T> {
    /// Updates the signal's value using a closure, only triggering updates if the value changed.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        update_if_changed(&self.inner, f);
    }
}

fn update_if_changed<T: PartialEq + Clone, F>(inner: &SignalInner<T>, f: F)
where
    F: FnOnce(&mut T),
{
    write_if_changed(inner, |current| {
        let old_value = current.clone();
        f(current);
        *current != old_value
    });
}

/// Apply `write` under the lock and notify subscribers if it reports a change
fn write_if_changed<T, F>(inner: &SignalInner<T>, write: F)
where
    F: FnOnce(&mut T) -> bool,
{
    let changed = {
        let Ok(mut guard) = inner.value.write() else {
            return; // Lock poisoned, skip update silently
        };
        write(&mut guard)
    };

    if changed {
        // Off the owning thread only the frame request goes out
        if with_owning_runtime(inner.runtime, |rt| rt.notify_write(inner.id)).is_some() {
            flush_effects();
        }
        request_frame();
    }
}

pub fn create_signal<T>(value: T) -> Signal<T> {
    Signal::new(value)
}
