//! Scalar plumbing shared by the `facetport` workspace.
//!
//! Interchange streams may store their values as either single or double precision floats, while
//! host meshes always store single precision. [Real] lets the conversion passes be written once
//! and monomorphized for both storage types.

use num_traits::{AsPrimitive, Float};

pub mod macros;

/// Trait for floating-point types which may back an interchange value stream.
///
/// # Safety
///
/// * This is only intended to be implemented on `f32` and `f64`; the conversion passes assume that
///   [Real::widen] is lossless.
#[allow(unsafe_code)]
pub unsafe trait Real:
    Float + AsPrimitive<f32> + AsPrimitive<f64> + std::fmt::Debug + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;

    /// Convert to host storage precision, rounding to nearest if `Self` is wider.
    #[inline]
    fn narrow(self) -> f32 {
        self.as_()
    }

    /// Convert to double precision without loss.
    #[inline]
    fn widen(self) -> f64 {
        self.as_()
    }
}

crate::item_with! {R: f32, f64 => unsafe impl Real for R {
    #![allow(unsafe_code)]
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
}}
