use rand::{
    distr::{Distribution, StandardUniform},
    Rng,
};
use rand_distr::Normal;

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

use crate::{Context, Error, Result};

/// Dispatch random fills based on the data type.
pub trait RandDispatch: Sized {
    /// Fill the slice with uniform random values in `[0, 1)`.
    fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) -> Result<()>;

    /// Fill the slice with normal (Gaussian) random values.
    fn fill_with_normal<R: Rng + ?Sized>(
        rng: &mut R,
        slice: &mut [Self],
        mean: Self,
        std: Self,
    ) -> Result<()>;
}

fn unsupported(op: &'static str, dtype: &'static str) -> Result<()> {
    Err(Error::UnsupportedDType { op, dtype })
}

// f32, f64: support both uniform and normal
macro_rules! rand_float {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) -> Result<()> {
                slice
                    .iter_mut()
                    .for_each(|x| *x = StandardUniform.sample(rng));
                Ok(())
            }

            fn fill_with_normal<R: Rng + ?Sized>(
                rng: &mut R,
                slice: &mut [Self],
                mean: Self,
                std: Self,
            ) -> Result<()> {
                let normal = Normal::new(mean, std)
                    .context("invalid parameters for a normal distribution")?;
                slice.iter_mut().for_each(|x| *x = normal.sample(rng));
                Ok(())
            }
        }
    };
}

rand_float!(f32);
rand_float!(f64);

// u32: uniform over the whole range only
impl RandDispatch for u32 {
    fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) -> Result<()> {
        slice.iter_mut().for_each(|x| *x = rng.random());
        Ok(())
    }

    fn fill_with_normal<R: Rng + ?Sized>(
        _rng: &mut R,
        _slice: &mut [Self],
        _mean: Self,
        _std: Self,
    ) -> Result<()> {
        unsupported("normal random fill", "u32")
    }
}

// All other integral or half types: unsupported
macro_rules! rand_unsupported {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn fill_with_uniform<R: Rng + ?Sized>(
                _rng: &mut R,
                _slice: &mut [Self],
            ) -> Result<()> {
                unsupported("uniform random fill", stringify!($t))
            }

            fn fill_with_normal<R: Rng + ?Sized>(
                _rng: &mut R,
                _slice: &mut [Self],
                _mean: Self,
                _std: Self,
            ) -> Result<()> {
                unsupported("normal random fill", stringify!($t))
            }
        }
    };
}

rand_unsupported!(u8);
rand_unsupported!(i32);
rand_unsupported!(i64);
#[cfg(feature = "half")]
rand_unsupported!(f16);
#[cfg(feature = "bfloat")]
rand_unsupported!(bf16);
