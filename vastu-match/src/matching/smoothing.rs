//! Separable Gaussian smoothing of log-likelihood fields.
//!
//! Kernel radius is `round(4σ)` and borders use half-sample-symmetric
//! reflection (`d c b a | a b c d | d c b a`), so a constant field stays
//! constant after smoothing.

/// Normalized 1-D Gaussian kernel truncated at 4σ.
///
/// Returns `[1.0]` for non-positive σ.
pub fn gaussian_kernel_1d(sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let radius = (4.0 * sigma + 0.5) as isize;
    let sigma2 = sigma * sigma;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|i| {
            let x = i as f64;
            (-(x * x) / (2.0 * sigma2)).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    if sum != 0.0 {
        for v in &mut kernel {
            *v /= sum;
        }
    }
    kernel
}

/// Map any index into `0..len` by half-sample-symmetric reflection.
#[inline]
fn reflect_index(i: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let m = i.rem_euclid(period);
    if m < len { m as usize } else { (period - 1 - m) as usize }
}

/// Smooth a row-major `width × height` field in place.
pub fn gaussian_smooth(data: &mut [f64], width: usize, height: usize, sigma: f64) {
    if sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(data.len(), width * height);

    let kernel = gaussian_kernel_1d(sigma);
    let radius = (kernel.len() / 2) as isize;
    let mut tmp = vec![0.0; data.len()];

    // Horizontal pass into tmp
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = reflect_index(x as isize + k as isize - radius, width);
                acc += w * row[sx];
            }
            tmp[y * width + x] = acc;
        }
    }

    // Vertical pass back into data
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let sy = reflect_index(y as isize + k as isize - radius, height);
                acc += w * tmp[sy * width + x];
            }
            data[y * width + x] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_normalized_and_symmetric() {
        let kernel = gaussian_kernel_1d(2.0);
        assert_eq!(kernel.len(), 17);
        assert_relative_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        for i in 0..kernel.len() / 2 {
            assert_relative_eq!(kernel[i], kernel[kernel.len() - 1 - i]);
        }
        assert!(kernel[8] > kernel[7]);
    }

    #[test]
    fn test_kernel_zero_sigma_is_identity() {
        assert_eq!(gaussian_kernel_1d(0.0), vec![1.0]);
    }

    #[test]
    fn test_reflect_index() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(2, 4), 2);
        // Kernel wider than the field
        assert_eq!(reflect_index(-5, 1), 0);
    }

    #[test]
    fn test_constant_field_unchanged() {
        let value = 0.01f64.ln();
        let mut data = vec![value; 6 * 5];
        gaussian_smooth(&mut data, 6, 5, 2.0);
        for v in data {
            assert_relative_eq!(v, value, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_impulse_spreads_and_preserves_mass() {
        let mut data = vec![0.0; 21 * 21];
        data[10 * 21 + 10] = 1.0;
        gaussian_smooth(&mut data, 21, 21, 1.0);

        assert_relative_eq!(data.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        let center = data[10 * 21 + 10];
        assert!(center < 1.0);
        assert!(data[10 * 21 + 11] < center);
        assert_relative_eq!(data[10 * 21 + 11], data[11 * 21 + 10], epsilon = 1e-15);
    }

    #[test]
    fn test_zero_sigma_leaves_field() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0];
        gaussian_smooth(&mut data, 2, 2, 0.0);
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
