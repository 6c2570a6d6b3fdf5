//! Fault code width abstraction.
//!
//! Fault codes are application-defined unsigned integers. The width is a
//! deployment choice (8, 16 or 32 bits); the registry is generic over
//! [`FaultCode`] so the choice is made by the type parameter rather than
//! by conditional compilation inside the registry.

use core::fmt::{Debug, LowerHex};
use core::hash::Hash;

/// Unsigned integer usable as a fault code.
///
/// `Default` must yield `0`, which doubles as the "no fault" sentinel code
/// reported alongside `SeverityLevel::None`.
pub trait FaultCode:
    Copy + Eq + Hash + Default + Debug + LowerHex + TryFrom<u32> + Send + 'static
{
    /// Width of the code in bits.
    const BITS: u32;

    /// Widen to `u32` (lossless for every supported width).
    fn to_u32(self) -> u32;

    /// Narrow from `u32`. Returns `None` if the value does not fit.
    #[inline]
    fn from_u32(value: u32) -> Option<Self> {
        Self::try_from(value).ok()
    }
}

macro_rules! impl_fault_code {
    ($($ty:ty),*) => {
        $(
            impl FaultCode for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn to_u32(self) -> u32 {
                    u32::from(self)
                }
            }
        )*
    };
}

impl_fault_code!(u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(<u8 as FaultCode>::BITS, 8);
        assert_eq!(<u16 as FaultCode>::BITS, 16);
        assert_eq!(<u32 as FaultCode>::BITS, 32);
    }

    #[test]
    fn narrowing_rejects_out_of_range() {
        assert_eq!(<u8 as FaultCode>::from_u32(0xFF), Some(0xFFu8));
        assert_eq!(<u8 as FaultCode>::from_u32(0x100), None);
        assert_eq!(<u16 as FaultCode>::from_u32(0x1_0000), None);
        assert_eq!(<u32 as FaultCode>::from_u32(u32::MAX), Some(u32::MAX));
    }

    #[test]
    fn default_is_zero_sentinel() {
        assert_eq!(<u8 as Default>::default().to_u32(), 0);
        assert_eq!(<u32 as Default>::default().to_u32(), 0);
    }
}
