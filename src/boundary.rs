// expo-index/src/boundary.rs

/// Lower edge of bucket `index` at `scale`: `2^(index / 2^scale)`.
///
/// Strictly increasing in `index`. Underflows to `0.0` for the buckets holding
/// the smallest subnormals (there is no finite lower edge to report there) and
/// overflows to infinity past `f64::MAX`. Neither is an error. Any `scale` is
/// accepted.
pub fn lower_boundary(index: i64, scale: i32) -> f64 {
    libm::exp2(libm::ldexp(index as f64, scale.saturating_neg()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::map_exact;

    #[test]
    fn scale_zero_edges() {
        assert_eq!(lower_boundary(0, 0), 1.0);
        assert_eq!(lower_boundary(-1, 0), 0.5);
        assert_eq!(lower_boundary(10, 0), 1024.0);
        assert_eq!(lower_boundary(-1074, 0), f64::from_bits(1));
    }

    #[test]
    fn strictly_increasing() {
        for scale in [0, 1, 4, 10, 20] {
            // Windows stay inside the normal range: at low scales the
            // +-500 index margin reaches past 2^+-1022.
            let reach = if scale >= 10 { 1000i64 } else { 700 };
            for octave in [-reach, -1, 0, 1, reach] {
                let anchor = octave << scale;
                let start = if scale == 0 { anchor - 20 } else { anchor - 500 };
                let end = if scale == 0 { anchor + 20 } else { anchor + 500 };
                let mut previous = lower_boundary(start, scale);
                for index in start + 1..end {
                    let boundary = lower_boundary(index, scale);
                    assert!(boundary > previous, "index {index} at scale {scale}");
                    previous = boundary;
                }
            }
        }
    }

    #[test]
    fn smallest_bucket_underflows() {
        let index = map_exact(f64::from_bits(1));
        assert_eq!(lower_boundary(index, 0), 0.0);
        assert_eq!(lower_boundary(index + 1, 0), f64::from_bits(1));
        assert_eq!(lower_boundary(i64::from(i32::MIN), 3), 0.0);
    }

    #[test]
    fn overflow_past_largest_bucket() {
        assert_eq!(lower_boundary(1023, 0), 2f64.powi(1023));
        assert_eq!(lower_boundary(1024, 0), f64::INFINITY);
    }

    #[test]
    fn non_decreasing_through_underflow() {
        for scale in [0, 1, 4] {
            // From 2^-1250, well below the smallest subnormal, up to 2^-1000.
            let mut previous = lower_boundary(-1250i64 << scale, scale);
            assert_eq!(previous, 0.0);
            for index in (-1250i64 << scale) + 1..(-1000i64 << scale) {
                let boundary = lower_boundary(index, scale);
                assert!(boundary >= previous, "index {index} at scale {scale}");
                previous = boundary;
            }
            assert!(previous > 0.0);
        }
    }

    #[test]
    fn extreme_scales_do_not_panic() {
        assert_eq!(lower_boundary(0, i32::MIN), 1.0);
        assert_eq!(lower_boundary(1, i32::MIN), f64::INFINITY);
        assert_eq!(lower_boundary(-1, i32::MIN), 0.0);
        assert_eq!(lower_boundary(1, i32::MAX), 1.0);
    }
}
