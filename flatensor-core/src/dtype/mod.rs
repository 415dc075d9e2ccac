use std::fmt::Debug;

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

pub use random::RandDispatch;

mod random;

/// Marker trait for tensor datatypes.
pub trait DType: Debug + Copy + PartialEq + Send + Sync + RandDispatch + 'static {
    const ZERO: Self;
    const ONE: Self;
}

macro_rules! dtype {
    ($rt:ident, $zero:expr, $one:expr) => {
        impl DType for $rt {
            const ZERO: $rt = $zero;
            const ONE: $rt = $one;
        }
    };
}

dtype!(u8, 0u8, 1u8);
dtype!(u32, 0u32, 1u32);
dtype!(i32, 0i32, 1i32);
dtype!(i64, 0i64, 1i64);
dtype!(f32, 0f32, 1f32);
dtype!(f64, 0f64, 1f64);

#[cfg(feature = "half")]
impl DType for f16 {
    const ZERO: f16 = f16::from_f64_const(0.0);
    const ONE: f16 = f16::from_f64_const(1.0);
}

#[cfg(feature = "bfloat")]
impl DType for bf16 {
    const ZERO: bf16 = bf16::from_f64_const(0.0);
    const ONE: bf16 = bf16::from_f64_const(1.0);
}
