/// Limit `amt` to the range `[low, high]`.
///
/// Unlike [`Ord::clamp`] this does not panic when `low > high`, the bounds
/// are then simply checked in order. A misconfigured range must never bring
/// down the control loop.
#[inline]
pub fn constrain<T: PartialOrd>(amt: T, low: T, high: T) -> T {
    if amt < low {
        low
    } else if amt > high {
        high
    } else {
        amt
    }
}
