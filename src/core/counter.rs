//! The capability surface every per-bucket counter backend provides.
//!
//! The tracker never looks inside a backend. It only needs to feed it key
//! hashes, ask it for estimates, wipe it on rotation and report its size:
//!
//! | Method        | Sketch backend                   | Filter backend            |
//! |---------------|----------------------------------|---------------------------|
//! | `increment`   | bump the key's counters          | set the key's bits        |
//! | `estimate`    | min counter (never undercounts)  | `1.0` maybe seen, `0.0` not |
//! | `reset`       | zero all counters                | clear all bits            |
//! | `byte_size`   | counter storage                  | bit storage               |
//!
//! Mutating methods take `&mut self`; callers serialize access through the
//! owning bucket's lock.

/// A probabilistic per-bucket access counter.
///
/// # Examples
///
/// ```
/// use accesstrack::core::AccessCounter;
/// use accesstrack::counters::CountMinSketch;
///
/// let mut sketch = CountMinSketch::<u32>::new(0.01, 0.99, 0, 0).unwrap();
/// sketch.increment(42);
/// sketch.increment(42);
/// assert!(sketch.estimate(42) >= 2.0);
///
/// sketch.reset();
/// assert_eq!(sketch.estimate(42), 0.0);
/// ```
pub trait AccessCounter: Send {
    /// Record one occurrence of `hash`.
    fn increment(&mut self, hash: u64);

    /// Estimated occurrences of `hash` since the last reset. Never negative.
    fn estimate(&self, hash: u64) -> f64;

    /// Forget everything recorded so far, keeping the allocation.
    fn reset(&mut self);

    /// Bytes of counter storage. Fixed for the lifetime of the backend.
    fn byte_size(&self) -> usize;
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Unsigned cell type used by the count-min sketch.
///
/// Narrower cells trade saturation headroom for memory: a `u8` sketch is four
/// times smaller than a `u32` one but stops counting at 255.
pub trait SketchCounter: sealed::Sealed + Copy + Ord + Send + Sync + std::fmt::Debug + 'static {
    /// The empty cell.
    const ZERO: Self;

    /// Saturation point.
    const MAX: Self;

    /// `self + 1`, clamped at [`Self::MAX`].
    fn saturating_inc(self) -> Self;

    /// Widen to `f64` for reporting.
    fn to_f64(self) -> f64;
}

macro_rules! impl_sketch_counter {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SketchCounter for $ty {
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn saturating_inc(self) -> Self {
                    self.saturating_add(1)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )+
    };
}

impl_sketch_counter!(u8, u16, u32);
