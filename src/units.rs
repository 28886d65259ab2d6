//! This module defines the unit types used throughout the model and the products between them.
//!
//! All quantities are stored as `f64`. Multiplying or dividing by a plain `f64` keeps the unit, so
//! dimensionless factors (runoff coefficients, multipliers etc.) can be applied directly.
use serde::{Deserialize, Serialize};

macro_rules! unit_struct {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            PartialOrd,
            Default,
            Serialize,
            Deserialize,
            derive_more::Add,
            derive_more::Sub,
            derive_more::Display,
        )]
        pub struct $name(pub f64);

        impl $name {
            /// Create a new instance of the unit type from an `f64` value
            pub const fn new(val: f64) -> Self {
                Self(val)
            }

            /// The value of the quantity as an `f64`
            pub fn value(self) -> f64 {
                self.0
            }

            /// Round to the nearest whole unit
            pub fn round(self) -> Self {
                Self(self.0.round())
            }

            /// The smaller of `self` and `other`
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// The larger of `self` and `other`
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            /// Whether the value is neither infinite nor NaN
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl std::ops::Mul<$name> for f64 {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name(self * rhs.0)
            }
        }

        impl std::ops::Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl std::ops::Div for $name {
            type Output = f64;
            fn div(self, rhs: $name) -> f64 {
                self.0 / rhs.0
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: $name) {
                self.0 += rhs.0;
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> $name {
                $name(iter.map(|x| x.0).sum())
            }
        }

        impl float_cmp::ApproxEq for $name {
            type Margin = float_cmp::F64Margin;

            fn approx_eq<M: Into<Self::Margin>>(self, other: Self, margin: M) -> bool {
                float_cmp::ApproxEq::approx_eq(self.0, other.0, margin)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::new(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::new(self.0 * lhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Litres, "A volume of water in litres.");
unit_struct!(CubicMetres, "A volume in cubic metres.");
unit_struct!(Millimetres, "A depth of rainfall in millimetres.");
unit_struct!(Metres, "A length in metres.");
unit_struct!(SquareMetres, "An area in square metres.");
unit_struct!(Money, "An amount of money in rupees.");
unit_struct!(Years, "A duration in years.");

// Derived quantities
unit_struct!(MoneyPerLitre, "A price per litre of water.");
unit_struct!(MoneyPerSquareMetre, "A cost per square metre of area.");
unit_struct!(MillimetresPerHour, "An infiltration rate.");
unit_struct!(LitresPerHour, "A flow rate.");

// Multiplication rules

// 1 mm of rain falling on 1 m² is exactly 1 litre
impl_mul!(SquareMetres, Millimetres, Litres);
impl_mul!(Litres, MoneyPerLitre, Money);
impl_mul!(SquareMetres, MoneyPerSquareMetre, Money);
impl_mul!(Metres, SquareMetres, CubicMetres);

impl Litres {
    /// Convert to cubic metres
    pub fn to_cubic_metres(self) -> CubicMetres {
        CubicMetres(self.0 / 1000.0)
    }
}

impl Metres {
    /// The area of a square with sides of this length
    pub fn squared(self) -> SquareMetres {
        SquareMetres(self.0 * self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_rain_on_area_is_litres() {
        let volume = SquareMetres(150.0) * Millimetres(10.0);
        assert_eq!(volume, Litres(1500.0));
    }

    #[test]
    fn test_volume_conversions() {
        assert_eq!(Litres(2500.0).to_cubic_metres(), CubicMetres(2.5));
    }

    #[test]
    fn test_sum_and_ratio() {
        let total: Money = [Money(1.0), Money(2.5), Money(3.5)].into_iter().sum();
        assert_eq!(total, Money(7.0));
        assert_approx_eq!(f64, Litres(50.0) / Litres(200.0), 0.25);
    }
}
