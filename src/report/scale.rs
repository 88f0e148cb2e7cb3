use std::cell::Cell;

/// Categorical axis: each key gets a contiguous band of the pixel range.
///
/// Placement follows the usual band-scale definition with equal inner and
/// outer padding and centred alignment.
#[derive(Clone, Debug)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let (r0, r1) = range;
        let n = domain.len() as f64;
        let step = (r1 - r0) / (n - padding + 2.0 * padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;
        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Left edge of the band for `key`; `None` if the key is not in the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth / 2.0)
    }
}

/// Base-10 logarithmic axis over a fixed domain.
///
/// Values outside the domain, and non-positive values, are clamped to the
/// nearest domain edge. Clamps are counted so callers can report them.
#[derive(Debug)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamped: Cell<usize>,
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        debug_assert!(domain.0 > 0.0 && domain.1 > domain.0);
        Self {
            domain,
            range,
            clamped: Cell::new(0),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let clamped = if !(v > d0) {
            d0
        } else if v > d1 {
            d1
        } else {
            v
        };
        if clamped != v {
            self.clamped.set(self.clamped.get() + 1);
        }
        let t = (clamped.log10() - d0.log10()) / (d1.log10() - d0.log10());
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    pub fn clamped(&self) -> usize {
        self.clamped.get()
    }

    /// 1, 2 and 5 multiples of each power of ten inside the domain.
    pub fn ticks(&self) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let mut out = Vec::new();
        let mut exp = d0.log10().floor() as i32;
        let last = d1.log10().ceil() as i32;
        while exp <= last {
            let base = 10f64.powi(exp);
            for m in [1.0, 2.0, 5.0] {
                let v = base * m;
                if v >= d0 * (1.0 - 1e-9) && v <= d1 * (1.0 + 1e-9) {
                    out.push(v);
                }
            }
            exp += 1;
        }
        out
    }
}
