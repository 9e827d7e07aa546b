//! Built-in ordering strategies
//!
//! | Strategy     | Root holds      | `comes_before(a, b)` |
//! |--------------|-----------------|----------------------|
//! | [`MinOrder`] | smallest value  | `a < b`              |
//! | [`MaxOrder`] | largest value   | `a > b`              |

use crate::traits::Order;

/// Ascending order: the smallest value is at the root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinOrder;

impl Order for MinOrder {
    const NAME: &'static str = "min";

    #[inline]
    fn comes_before<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
        a < b
    }
}

/// Descending order: the largest value is at the root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaxOrder;

impl Order for MaxOrder {
    const NAME: &'static str = "max";

    #[inline]
    fn comes_before<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
        a > b
    }
}
