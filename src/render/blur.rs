use crate::foundation::error::{MockupError, MockupResult};

const Q16_ONE: u32 = 1 << 16;

/// Normalized 1D Gaussian in Q16 fixed point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel matching a canvas `shadowBlur` of `blur_px`: sigma is half the blur, the taps
    /// cover three sigmas on each side.
    pub(crate) fn for_shadow_blur(blur_px: f32) -> MockupResult<Self> {
        if !blur_px.is_finite() || blur_px < 0.0 {
            return Err(MockupError::validation(
                "shadow blur must be finite and >= 0",
            ));
        }
        let sigma = f64::from(blur_px) / 2.0;
        let radius = (sigma * 3.0).ceil() as usize;
        Self::new(radius, sigma)
    }

    pub(crate) fn new(radius: usize, sigma: f64) -> MockupResult<Self> {
        if radius == 0 {
            return Ok(Self {
                weights: vec![Q16_ONE],
            });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(MockupError::validation("blur sigma must be > 0"));
        }

        let r = radius as f64;
        let taps = (0..=2 * radius)
            .map(|i| {
                let x = i as f64 - r;
                (-x * x / (2.0 * sigma * sigma)).exp()
            })
            .collect::<Vec<_>>();
        let total: f64 = taps.iter().sum();

        let mut weights = taps
            .iter()
            .map(|t| ((t / total) * f64::from(Q16_ONE)).round() as u32)
            .collect::<Vec<_>>();
        // Rounding drift goes to the center tap so the kernel sums to exactly one.
        let sum: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let center = &mut weights[radius];
        *center = (i64::from(*center) + i64::from(Q16_ONE) - sum).clamp(0, i64::from(Q16_ONE))
            as u32;
        Ok(Self { weights })
    }

    pub(crate) fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub(crate) fn weights(&self) -> &[u32] {
        &self.weights
    }
}

/// Soft shadow of a premultiplied `width` x `height` layer.
///
/// Pixels beyond the layer edges count as transparent, so shadows fade out at the border.
pub(crate) fn shadow_blur(
    src: &[u8],
    width: u32,
    height: u32,
    blur_px: f32,
) -> MockupResult<Vec<u8>> {
    let kernel = GaussianKernel::for_shadow_blur(blur_px)?;
    blur_premul(src, width, height, &kernel)
}

/// Separable blur of premultiplied RGBA8 with `kernel` on both axes.
pub(crate) fn blur_premul(
    src: &[u8],
    width: u32,
    height: u32,
    kernel: &GaussianKernel,
) -> MockupResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    let len = w
        .checked_mul(h)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MockupError::validation("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(MockupError::validation(format!(
            "blur expects {len} bytes for {width}x{height}, got {}",
            src.len()
        )));
    }
    if kernel.radius() == 0 {
        return Ok(src.to_vec());
    }

    let mut rows = vec![0u8; len];
    let mut out = vec![0u8; len];
    // Rows: `h` lines of `w` pixels, neighbours 1 pixel apart.
    convolve(src, &mut rows, kernel, Lines { count: h, len: w, step: 1, stride: w });
    // Columns: `w` lines of `h` pixels, neighbours one row apart.
    convolve(&rows, &mut out, kernel, Lines { count: w, len: h, step: w, stride: 1 });
    Ok(out)
}

/// Pixel-index layout of a set of 1D lines inside a 2D image.
#[derive(Clone, Copy)]
struct Lines {
    count: usize,
    len: usize,
    /// Distance between neighbouring pixels of one line.
    step: usize,
    /// Distance between the first pixels of consecutive lines.
    stride: usize,
}

fn convolve(src: &[u8], dst: &mut [u8], kernel: &GaussianKernel, lines: Lines) {
    let radius = kernel.radius();
    for line in 0..lines.count {
        let base = line * lines.stride;
        for i in 0..lines.len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.weights().iter().enumerate() {
                let Some(j) = (i + k).checked_sub(radius).filter(|&j| j < lines.len) else {
                    continue;
                };
                let at = (base + j * lines.step) * 4;
                for (a, &c) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *a += u64::from(weight) * u64::from(c);
                }
            }
            let at = (base + i * lines.step) * 4;
            for (d, a) in dst[at..at + 4].iter_mut().zip(acc) {
                *d = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
