//! Ordering checks for numbers and dates

/// `value >= min`
///
/// Works for anything partially ordered, so a `NaN` on either side fails.
pub fn at_least<T: PartialOrd>(value: T, min: T) -> bool {
    value >= min
}

/// `value <= max`
pub fn at_most<T: PartialOrd>(value: T, max: T) -> bool {
    value <= max
}
