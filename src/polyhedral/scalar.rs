//! Arbitrary-precision integer scalars.
//!
//! Every coefficient and inhomogeneous term is a [`Scalar`]. Host numbers
//! enter through [`ToScalar`], which accepts any value that is exactly an
//! integer and rejects the rest with a [`ValueError`]:
//!
//! - native integers of every width (always succeeds)
//! - rationals whose denominator is one
//! - finite floats without a fractional part
//! - strings holding an integer, an integral rational (`"6/3"`) or an
//!   integral float (`"2.0"`)

use crate::utils::errors::{ValueError, ValueErrorKind};
use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use num_traits::{FromPrimitive, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Exact signed integer used for all coefficients and constants.
pub type Scalar = BigInt;

/// Exact conversion of a host number into a [`Scalar`].
pub trait ToScalar {
    /// Convert `self`, failing if it is not exactly an integer.
    fn to_scalar(&self) -> Result<Scalar, ValueError>;
}

macro_rules! impl_to_scalar_for_int {
    ($($t:ty)*) => {
        $(
            impl ToScalar for $t {
                #[inline]
                fn to_scalar(&self) -> Result<Scalar, ValueError> {
                    Ok(Scalar::from(*self))
                }
            }
        )*
    };
}

impl_to_scalar_for_int!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

impl ToScalar for BigInt {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        Ok(self.clone())
    }
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        if !self.is_finite() {
            return Err(ValueError::new(
                ValueErrorKind::NotFinite,
                format!("{} is not a finite number", self),
            ));
        }
        if self.fract() != 0.0 {
            return Err(ValueError::new(
                ValueErrorKind::NotIntegral,
                format!("{} has a fractional part", self),
            ));
        }
        Scalar::from_f64(*self).ok_or_else(|| {
            ValueError::new(ValueErrorKind::NotIntegral, format!("{} is not an integer", self))
        })
    }
}

impl ToScalar for f32 {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        f64::from(*self).to_scalar()
    }
}

fn not_integral_ratio(ratio: &impl fmt::Display) -> ValueError {
    ValueError::new(
        ValueErrorKind::NotIntegral,
        format!("{} has a non-unit denominator", ratio),
    )
}

impl ToScalar for Ratio<i64> {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        if self.is_integer() {
            Ok(Scalar::from(self.to_integer()))
        } else {
            Err(not_integral_ratio(self))
        }
    }
}

impl ToScalar for Ratio<i32> {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        if self.is_integer() {
            Ok(Scalar::from(self.to_integer()))
        } else {
            Err(not_integral_ratio(self))
        }
    }
}

impl ToScalar for BigRational {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        if self.is_integer() {
            Ok(self.to_integer())
        } else {
            Err(not_integral_ratio(self))
        }
    }
}

impl ToScalar for str {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        let text = self.trim();
        if let Ok(value) = Scalar::from_str(text) {
            return Ok(value);
        }
        if text.contains('/') {
            if let Ok(ratio) = BigRational::from_str(text) {
                return ratio.to_scalar();
            }
        } else if let Ok(value) = text.parse::<f64>() {
            return value.to_scalar();
        }
        Err(ValueError::new(
            ValueErrorKind::InvalidLiteral,
            format!("invalid literal for an integer: {:?}", self),
        ))
    }
}

impl ToScalar for String {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        self.as_str().to_scalar()
    }
}

impl<T: ToScalar + ?Sized> ToScalar for &T {
    fn to_scalar(&self) -> Result<Scalar, ValueError> {
        (**self).to_scalar()
    }
}

/// Serialization view of a scalar: an `i64` when it fits, otherwise a
/// decimal string.
pub(crate) struct ScalarRef<'a>(pub &'a Scalar);

impl Serialize for ScalarRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.to_i64() {
            Some(small) => serializer.serialize_i64(small),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

/// 2^53: from here on, consecutive integers are not all representable as `f64`.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Deserialized scalar; accepts integers, integral floats and strings.
pub(crate) struct ScalarRepr(pub Scalar);

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = ScalarRepr;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal integer string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarRepr, E> {
        Ok(ScalarRepr(Scalar::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarRepr, E> {
        Ok(ScalarRepr(Scalar::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<ScalarRepr, E> {
        Ok(ScalarRepr(Scalar::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<ScalarRepr, E> {
        Ok(ScalarRepr(Scalar::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarRepr, E> {
        // Integers this large may already have been rounded by the reader.
        if v.abs() >= MAX_EXACT_F64 {
            return Err(E::custom(ValueError::new(
                ValueErrorKind::Inexact,
                format!("{} is too large to be an exact integer", v),
            )));
        }
        v.to_scalar().map(ScalarRepr).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarRepr, E> {
        v.to_scalar().map(ScalarRepr).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ScalarRepr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}
