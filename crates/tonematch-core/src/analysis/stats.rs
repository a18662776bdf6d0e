//! Channel statistics, optionally restricted by a boolean mask.
//!
//! Every function returns `None` when the selection is empty instead of
//! dividing by zero; callers decide the fallback. Accumulation is in `f64`.

/// A per-pixel selection over one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Vec<bool>,
    count: usize,
}

impl Mask {
    /// Select every pixel whose `channel` sample satisfies `predicate`.
    pub fn from_fn(channel: &[f32], predicate: impl Fn(f32) -> bool) -> Self {
        let bits: Vec<bool> = channel.iter().map(|&v| predicate(v)).collect();
        let count = bits.iter().filter(|&&b| b).count();
        Self { bits, count }
    }

    /// Number of selected pixels.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of pixels the mask spans.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    fn select<'a>(&'a self, channel: &'a [f32]) -> impl Iterator<Item = f32> + 'a {
        debug_assert_eq!(channel.len(), self.bits.len(), "mask/channel size mismatch");
        channel
            .iter()
            .zip(&self.bits)
            .filter_map(|(&v, &keep)| keep.then_some(v))
    }
}

fn selected<'a>(channel: &'a [f32], mask: Option<&'a Mask>) -> Box<dyn Iterator<Item = f32> + 'a> {
    match mask {
        Some(mask) => Box::new(mask.select(channel)),
        None => Box::new(channel.iter().copied()),
    }
}

/// Arithmetic mean of the selected samples.
///
/// With a mask this is the weighted mean `Σ(channel·mask) / Σ(mask)`.
pub fn mean(channel: &[f32], mask: Option<&Mask>) -> Option<f64> {
    let (sum, n) = selected(channel, mask).fold((0.0_f64, 0_usize), |(sum, n), v| {
        (sum + v as f64, n + 1)
    });
    (n > 0).then(|| sum / n as f64)
}

/// Population standard deviation of the selected samples.
pub fn stddev(channel: &[f32], mask: Option<&Mask>) -> Option<f64> {
    let mean = mean(channel, mask)?;
    let (sum_sq, n) = selected(channel, mask).fold((0.0_f64, 0_usize), |(acc, n), v| {
        let d = v as f64 - mean;
        (acc + d * d, n + 1)
    });
    Some((sum_sq / n as f64).sqrt())
}

/// `p`-th percentile (`0..=100`) of the selected samples with linear
/// interpolation between order statistics.
///
/// Sorts a copy of the selection; use [`SortedSamples`] when querying the
/// same channel repeatedly.
pub fn percentile(channel: &[f32], p: f64, mask: Option<&Mask>) -> Option<f64> {
    SortedSamples::new(channel, mask).percentile(p)
}

/// Sorted copy of a channel selection for repeated percentile queries.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSamples {
    values: Vec<f32>,
}

impl SortedSamples {
    pub fn new(channel: &[f32], mask: Option<&Mask>) -> Self {
        let mut values: Vec<f32> = selected(channel, mask).collect();
        values.sort_unstable_by(f32::total_cmp);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `p`-th percentile, clamped to `[0, 100]`.
    ///
    /// ```text
    /// rank = p / 100 × (n − 1)
    /// out  = s[⌊rank⌋] + (s[⌈rank⌉] − s[⌊rank⌋]) × (rank − ⌊rank⌋)
    /// ```
    pub fn percentile(&self, p: f64) -> Option<f64> {
        let n = self.values.len();
        if n == 0 {
            return None;
        }
        let rank = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let lo_v = self.values[lo] as f64;
        let hi_v = self.values[hi] as f64;
        Some(lo_v + (hi_v - lo_v) * (rank - lo as f64))
    }
}

/// Pearson correlation of two equally sized channels.
///
/// `epsilon` is added to the denominator, so a channel with no variance
/// correlates at 0 rather than NaN.
pub fn correlation(x: &[f32], y: &[f32], epsilon: f64) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let (Some(mx), Some(my)) = (mean(x, None), mean(y, None)) else {
        return 0.0;
    };

    let mut cov = 0.0_f64;
    let mut var_x = 0.0_f64;
    let mut var_y = 0.0_f64;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a as f64 - mx;
        let dy = b as f64 - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    cov / ((var_x * var_y).sqrt() + epsilon)
}
