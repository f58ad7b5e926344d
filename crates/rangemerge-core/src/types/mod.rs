mod range;
mod range_type;

pub use range::{Range, RangeBound, RangeElement, RangeError};
pub(crate) use range::{cmp_lower, cmp_upper};
pub use range_type::RangeType;
