use ndarray::NdFloat;
use num_traits::float::FloatConst;
use std::fmt::Debug;

/// Floating point type accepted by the fit statistics
pub trait Float: NdFloat + FloatConst + Default + Debug + 'static {
    fn half() -> Self;
    fn two() -> Self;
}

impl Float for f32 {
    #[inline]
    fn half() -> Self {
        0.5
    }

    #[inline]
    fn two() -> Self {
        2.0
    }
}

impl Float for f64 {
    #[inline]
    fn half() -> Self {
        0.5
    }

    #[inline]
    fn two() -> Self {
        2.0
    }
}
