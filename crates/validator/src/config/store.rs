//! Concurrent storage for the three configurations of a factory.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use super::configuration::Configuration;

/// One published configuration.
///
/// Reads load the current snapshot without locking and never observe a
/// partially-built value. Writes are serialized by `writer`.
pub(crate) struct ConfigCell {
    current: ArcSwap<Configuration>,
    writer: Mutex<()>,
}

impl ConfigCell {
    fn new(configuration: Configuration) -> Self {
        Self {
            current: ArcSwap::from_pointee(configuration),
            writer: Mutex::new(()),
        }
    }

    pub(crate) fn load(&self) -> Arc<Configuration> {
        self.current.load_full()
    }

    fn publish(&self, configuration: Configuration) {
        let _guard = self.writer.lock();
        self.current.store(Arc::new(configuration));
    }
}

/// The strict, assertion and collecting configurations of one factory.
///
/// The assertion and collecting configurations are always derived from the
/// strict one, which acts as the base.
pub(crate) struct ConfigStore {
    strict: ConfigCell,
    assertion: ConfigCell,
    collecting: ConfigCell,
}

impl ConfigStore {
    pub(crate) fn new(base: Configuration) -> Self {
        let base = base.with_throw_on_failure(true);
        Self {
            assertion: ConfigCell::new(base.derive_assertion()),
            collecting: ConfigCell::new(base.derive_collecting()),
            strict: ConfigCell::new(base),
        }
    }

    pub(crate) fn strict(&self) -> Arc<Configuration> {
        self.strict.load()
    }

    pub(crate) fn assertion(&self) -> Arc<Configuration> {
        self.assertion.load()
    }

    pub(crate) fn collecting(&self) -> Arc<Configuration> {
        self.collecting.load()
    }

    /// Replaces the base and re-derives the other two.
    ///
    /// `update` receives the current base and returns the new one, or `None`
    /// to leave everything untouched. The base writer lock is held until the
    /// derived configurations are published, so concurrent updates cannot
    /// interleave their derivations.
    pub(crate) fn update(&self, update: impl FnOnce(&Configuration) -> Option<Configuration>) -> bool {
        let _guard = self.strict.writer.lock();
        let current = self.strict.current.load_full();
        let Some(next) = update(&current) else {
            return false;
        };

        let next = Arc::new(next.with_throw_on_failure(true));
        self.strict.current.store(Arc::clone(&next));
        self.assertion.publish(next.derive_assertion());
        self.collecting.publish(next.derive_collecting());
        true
    }
}
