use std::rc::Rc;

use tracing::trace;

/// Cheap "same input?" comparison used by [`IdentityMemo`].
///
/// Shared handles compare by pointer, never by contents; scalars compare by
/// value.
pub trait IdentityKey {
    fn same_identity(&self, other: &Self) -> bool;
}

impl<T: ?Sized> IdentityKey for Rc<T> {
    fn same_identity(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl IdentityKey for f64 {
    fn same_identity(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T: IdentityKey> IdentityKey for Option<T> {
    fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_identity(b),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! impl_identity_key_for_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: IdentityKey),+> IdentityKey for ($($name,)+) {
            fn same_identity(&self, other: &Self) -> bool {
                $(self.$index.same_identity(&other.$index))&&+
            }
        }
    };
}

impl_identity_key_for_tuple!(A: 0, B: 1);
impl_identity_key_for_tuple!(A: 0, B: 1, C: 2);
impl_identity_key_for_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_identity_key_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_identity_key_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_identity_key_for_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);

/// Hit/miss counters of one memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// One-entry cache keyed by input identity.
///
/// Holds the most recent inputs and result; a call with different inputs
/// replaces the entry.
#[derive(Debug)]
pub struct IdentityMemo<K, V> {
    name: &'static str,
    last: Option<(K, Rc<V>)>,
    stats: MemoStats,
}

impl<K: IdentityKey, V> IdentityMemo<K, V> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            last: None,
            stats: MemoStats::default(),
        }
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> Rc<V> {
        match self.try_get_or_compute(key, |key| Ok::<V, std::convert::Infallible>(compute(key))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like [`IdentityMemo::get_or_compute`]; a failed computation leaves the
    /// previous entry in place.
    pub fn try_get_or_compute<E>(
        &mut self,
        key: K,
        compute: impl FnOnce(&K) -> Result<V, E>,
    ) -> Result<Rc<V>, E> {
        if let Some((last_key, value)) = &self.last {
            if last_key.same_identity(&key) {
                self.stats.hits = self.stats.hits.saturating_add(1);
                trace!(memo = self.name, "memo hit");
                return Ok(Rc::clone(value));
            }
        }

        self.stats.misses = self.stats.misses.saturating_add(1);
        trace!(memo = self.name, "memo miss");
        let value = Rc::new(compute(&key)?);
        self.last = Some((key, Rc::clone(&value)));
        Ok(value)
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
