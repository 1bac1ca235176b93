//! Lazy caching for kernel tables.
//!
//! [`OnceCache`] caches a `Copy` value with the same semantics as
//! `std::sync::OnceLock` but works on `no_std` targets with atomics.
//!
//! # Caching Strategy
//!
//! - **std**: `OnceLock` for thread-safe lazy initialization
//! - **no_std with atomics**: atomic state machine over an `UnsafeCell`
//! - **no_std without atomics**: per-call computation (single-threaded targets)

#[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
use core::cell::UnsafeCell;
#[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
use core::mem::MaybeUninit;

/// A compute-once-publish-many cache for a `Copy` value.
///
/// Properties:
/// - Zero-cost after first initialization
/// - Thread-safe on targets with atomics: readers either run the initializer
///   themselves or observe the fully-written value, never a partial one
pub struct OnceCache<T: Copy> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  state: core::sync::atomic::AtomicU8,
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  value: UnsafeCell<MaybeUninit<T>>,

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
  _marker: core::marker::PhantomData<*const T>,
}

// SAFETY: On std, OnceLock handles synchronization. On no_std with atomics,
// the state machine below publishes the value with Release/Acquire ordering.
// No-atomic targets are single-threaded.
#[allow(unsafe_code)]
unsafe impl<T: Copy + Send + Sync> Send for OnceCache<T> {}
#[allow(unsafe_code)]
unsafe impl<T: Copy + Send + Sync> Sync for OnceCache<T> {}

impl<T: Copy> OnceCache<T> {
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const UNINIT: u8 = 0;
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const INITING: u8 = 1;
  #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
  const READY: u8 = 2;

  /// Create a new empty cache.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
      state: core::sync::atomic::AtomicU8::new(0),
      #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
      value: UnsafeCell::new(MaybeUninit::uninit()),

      #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Get the cached value, initializing with `f` if not yet set.
  ///
  /// On targets with atomics the initializer is called at most once; on
  /// targets without atomics it runs on every call.
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(f)
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "ptr"))]
    {
      use core::sync::atomic::Ordering;

      let state = self.state.load(Ordering::Acquire);
      if state == Self::READY {
        // SAFETY: value is initialized once state is READY.
        #[allow(unsafe_code)]
        return unsafe { (*self.value.get()).assume_init() };
      }

      if state == Self::UNINIT
        && self
          .state
          .compare_exchange(Self::UNINIT, Self::INITING, Ordering::AcqRel, Ordering::Acquire)
          .is_ok()
      {
        let value = f();
        // SAFETY: we hold exclusive access during the INITING state.
        #[allow(unsafe_code)]
        unsafe {
          (*self.value.get()).write(value);
        }
        self.state.store(Self::READY, Ordering::Release);
        return value;
      }

      // Another thread is initializing; wait for publication.
      while self.state.load(Ordering::Acquire) != Self::READY {
        core::hint::spin_loop();
      }
      // SAFETY: value is initialized once state is READY.
      #[allow(unsafe_code)]
      unsafe {
        (*self.value.get()).assume_init()
      }
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "ptr")))]
    {
      f()
    }
  }
}

impl<T: Copy> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn caches_first_value() {
    static CACHE: OnceCache<u64> = OnceCache::new();

    assert_eq!(CACHE.get_or_init(|| 42), 42);
    // Second initializer must be ignored.
    assert_eq!(CACHE.get_or_init(|| 99), 42);
  }
}
