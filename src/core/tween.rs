// Time-based eased transitions with keyed supersession.
//
// A [`Tweener`] owns at most one in-flight [`Tween`] per key. Starting a new
// tween on a busy key replaces the old one outright, so its completion never
// fires. [`Tweener::advance`] reports the keys that finished during the step;
// owners dispatch their continuations on those keys.

use glam::Vec3;
use smallvec::SmallVec;
use fnv::FnvHashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadraticOut,
}

impl Easing {
    /// Map linear progress in \[0, 1\] to eased progress.
    #[inline]
    pub fn apply(self, k: f32) -> f32 {
        let k = k.clamp(0.0, 1.0);
        match self {
            Easing::Linear => k,
            Easing::QuadraticOut => k * (2.0 - k),
        }
    }
}

pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

#[derive(Clone, Debug)]
pub struct Tween<V> {
    from: V,
    to: V,
    duration_ms: f64,
    elapsed_ms: f64,
    overshoot_ms: f64,
    easing: Easing,
}

impl<V: Lerp> Tween<V> {
    pub fn new(from: V, to: V, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            overshoot_ms: 0.0,
            easing,
        }
    }

    pub fn target(&self) -> V {
        self.to
    }

    /// Linear progress in \[0, 1\].
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).min(1.0) as f32
    }

    /// Time the last step ran past the end of the tween.
    pub fn overshoot_ms(&self) -> f64 {
        self.overshoot_ms
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn value(&self) -> V {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp_to(self.to, self.easing.apply(self.progress()))
    }

    /// Step by `dt_ms` (negative steps count as zero). Returns the new value.
    pub fn advance(&mut self, dt_ms: f64) -> V {
        let total = self.elapsed_ms + dt_ms.max(0.0);
        self.overshoot_ms = (total - self.duration_ms).max(0.0);
        self.elapsed_ms = total.min(self.duration_ms);
        self.value()
    }
}

pub type Completed<K> = SmallVec<[K; 4]>;

pub struct Tweener<K, V> {
    active: FnvHashMap<K, Tween<V>>,
    overshoot: FnvHashMap<K, f64>,
}

impl<K, V> Default for Tweener<K, V> {
    fn default() -> Self {
        Self {
            active: FnvHashMap::default(),
            overshoot: FnvHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash, V: Lerp> Tweener<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween on `key`. Returns true if an in-flight tween was superseded.
    pub fn start(&mut self, key: K, from: V, to: V, duration_ms: f64, easing: Easing) -> bool {
        self.active
            .insert(key, Tween::new(from, to, duration_ms, easing))
            .is_some()
    }

    pub fn is_active(&self, key: K) -> bool {
        self.active.contains_key(&key)
    }

    pub fn get(&self, key: K) -> Option<&Tween<V>> {
        self.active.get(&key)
    }

    /// Skip `ms` of the in-flight tween on `key` without reporting a value.
    /// Completion is still reported by the next [`Tweener::advance`].
    pub fn fast_forward(&mut self, key: K, ms: f64) {
        if let Some(tween) = self.active.get_mut(&key) {
            tween.advance(ms);
        }
    }

    /// How far past its end `key`'s tween ran, if it finished during the
    /// last [`Tweener::advance`]. Zero otherwise.
    pub fn overshoot_ms(&self, key: K) -> f64 {
        self.overshoot.get(&key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance every tween, handing each new value to `apply`, and return the
    /// keys whose tween finished during this step. Finished tweens are dropped.
    pub fn advance(&mut self, dt_ms: f64, mut apply: impl FnMut(K, V)) -> Completed<K> {
        self.overshoot.clear();
        let mut done = Completed::new();
        for (key, tween) in self.active.iter_mut() {
            apply(*key, tween.advance(dt_ms));
            if tween.is_finished() {
                done.push(*key);
                self.overshoot.insert(*key, tween.overshoot_ms());
            }
        }
        for key in &done {
            self.active.remove(key);
        }
        done
    }
}
