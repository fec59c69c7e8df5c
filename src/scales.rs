use d3rs::scale::{LinearScale as D3Linear, Scale as D3Scale};

/// Linear mapping between a data domain and a pixel range, backed by d3rs.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl LinearScale {
    /// A degenerate domain is widened by half a unit on each side.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        Self {
            domain: (d_min, d_max),
            range,
        }
    }

    fn d3(&self) -> D3Linear {
        D3Linear::new()
            .domain(self.domain.0, self.domain.1)
            .range(self.range.0, self.range.1)
    }

    pub fn map(&self, value: f64) -> f64 {
        let res = self.d3().scale(value);
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        if (self.range.1 - self.range.0).abs() < f64::EPSILON {
            return self.domain.0;
        }
        self.d3().invert(pixel).unwrap_or(self.domain.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Round tick values covering the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        self.d3().ticks(count.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_map_to_flipped_pixels() {
        let scale = LinearScale::new((0.0, 40.0), (200.0, 0.0));
        assert_eq!(scale.map(0.0), 200.0);
        assert_eq!(scale.map(40.0), 0.0);
        assert_eq!(scale.map(10.0), 150.0);
        assert_eq!(scale.invert(100.0), 20.0);
    }

    #[test]
    fn test_degenerate_domain_is_widened() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 10.0));
        assert_eq!(scale.domain(), (2.5, 3.5));
        assert_eq!(scale.map(3.0), 5.0);
    }

    #[test]
    fn test_ticks_stay_in_domain() {
        let ticks = LinearScale::new((0.0, 40.0), (100.0, 0.0)).ticks(5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| (0.0..=40.0).contains(t)));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_range_inverts_to_domain_start() {
        let scale = LinearScale::new((5.0, 9.0), (0.0, 0.0));
        assert_eq!(scale.invert(12.0), 5.0);
    }
}
