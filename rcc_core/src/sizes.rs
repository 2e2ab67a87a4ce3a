//! Standard Reinforcement Sizes
//!
//! Reinforcement is specified from a small set of stocked sizes. Values read
//! from the design table are snapped to these sets before they are reported:
//!
//! - bar diameters round **up** (never under-reinforce)
//! - stirrup spacings round **down** (never space stirrups wider)
//!
//! All sets are stored ascending.

/// Main (tension/compression) bar diameters in mm
pub const MAIN_BAR_DIAS_MM: [u32; 4] = [12, 16, 20, 25];

/// Stirrup bar diameters in mm
pub const STIRRUP_DIAS_MM: [u32; 2] = [8, 10];

/// Stirrup centre-to-centre spacings in mm
pub const STIRRUP_SPACINGS_MM: [u32; 3] = [100, 150, 200];

/// Largest main bar diameter, used as the reference ceiling for steel area
pub const MAX_MAIN_BAR_DIA_MM: u32 = 25;

/// Smallest allowed size that is `>= value`.
///
/// Falls back to the largest allowed size when `value` exceeds them all.
/// `allowed` must be ascending; an empty set returns `value` unchanged.
///
/// # Example
/// ```
/// use rcc_core::sizes::{round_up, MAIN_BAR_DIAS_MM};
///
/// assert_eq!(round_up(14, &MAIN_BAR_DIAS_MM), 16);
/// assert_eq!(round_up(16, &MAIN_BAR_DIAS_MM), 16);
/// assert_eq!(round_up(32, &MAIN_BAR_DIAS_MM), 25);
/// ```
pub fn round_up(value: u32, allowed: &[u32]) -> u32 {
    allowed
        .iter()
        .copied()
        .find(|&size| value <= size)
        .or_else(|| allowed.last().copied())
        .unwrap_or(value)
}

/// Largest allowed size that is `<= value`.
///
/// Falls back to the smallest allowed size when `value` is below them all.
/// `allowed` must be ascending; an empty set returns `value` unchanged.
///
/// # Example
/// ```
/// use rcc_core::sizes::{round_down, STIRRUP_SPACINGS_MM};
///
/// assert_eq!(round_down(175, &STIRRUP_SPACINGS_MM), 150);
/// assert_eq!(round_down(250, &STIRRUP_SPACINGS_MM), 200);
/// assert_eq!(round_down(75, &STIRRUP_SPACINGS_MM), 100);
/// ```
pub fn round_down(value: u32, allowed: &[u32]) -> u32 {
    allowed
        .iter()
        .rev()
        .copied()
        .find(|&size| value >= size)
        .or_else(|| allowed.first().copied())
        .unwrap_or(value)
}

/// Whether `value` is one of the `allowed` sizes
pub fn is_standard(value: u32, allowed: &[u32]) -> bool {
    allowed.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_exact_sizes_unchanged() {
        for dia in MAIN_BAR_DIAS_MM {
            assert_eq!(round_up(dia, &MAIN_BAR_DIAS_MM), dia);
        }
    }

    #[test]
    fn test_round_up_between_sizes() {
        assert_eq!(round_up(0, &MAIN_BAR_DIAS_MM), 12);
        assert_eq!(round_up(13, &MAIN_BAR_DIAS_MM), 16);
        assert_eq!(round_up(21, &MAIN_BAR_DIAS_MM), 25);
        assert_eq!(round_up(9, &STIRRUP_DIAS_MM), 10);
    }

    #[test]
    fn test_round_up_above_range_returns_largest() {
        assert_eq!(round_up(40, &MAIN_BAR_DIAS_MM), 25);
        assert_eq!(round_up(12, &STIRRUP_DIAS_MM), 10);
    }

    #[test]
    fn test_round_up_properties() {
        for v in 0..=40 {
            let r = round_up(v, &MAIN_BAR_DIAS_MM);
            assert!(MAIN_BAR_DIAS_MM.contains(&r));
            if v <= MAX_MAIN_BAR_DIA_MM {
                assert!(r >= v, "round_up({v}) = {r}");
            }
        }
    }

    #[test]
    fn test_round_down_between_sizes() {
        assert_eq!(round_down(199, &STIRRUP_SPACINGS_MM), 150);
        assert_eq!(round_down(149, &STIRRUP_SPACINGS_MM), 100);
        assert_eq!(round_down(200, &STIRRUP_SPACINGS_MM), 200);
    }

    #[test]
    fn test_round_down_below_range_returns_smallest() {
        assert_eq!(round_down(50, &STIRRUP_SPACINGS_MM), 100);
        assert_eq!(round_down(0, &STIRRUP_SPACINGS_MM), 100);
    }

    #[test]
    fn test_round_down_properties() {
        for v in 0..=300 {
            let r = round_down(v, &STIRRUP_SPACINGS_MM);
            assert!(STIRRUP_SPACINGS_MM.contains(&r));
            if v >= 100 {
                assert!(r <= v, "round_down({v}) = {r}");
            }
        }
    }

    #[test]
    fn test_empty_set_is_identity() {
        assert_eq!(round_up(17, &[]), 17);
        assert_eq!(round_down(17, &[]), 17);
    }

    #[test]
    fn test_is_standard() {
        assert!(is_standard(20, &MAIN_BAR_DIAS_MM));
        assert!(!is_standard(18, &MAIN_BAR_DIAS_MM));
    }
}
