//! Regression test parameters and operations

use runlength_core::NdImage;
use runlength_texture::{FeatureScalar, FeatureVector, RunLengthFeature};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and report failures only (default)
    #[default]
    Compare,
    /// Compare and print every checked value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "glrlm_example")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value (typically derived by hand)
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if self.display() {
            eprintln!(
                "  [{}] expected = {}, actual = {}",
                self.index, expected, actual
            );
        }

        // NaN never matches
        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare every feature of a vector against expected values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected values in feature order
    /// * `actual` - Computed feature vector
    /// * `delta` - Maximum allowed difference per feature
    ///
    /// # Returns
    ///
    /// `true` if all ten features match within delta.
    pub fn compare_features<R: FeatureScalar>(
        &mut self,
        expected: &[f64; 10],
        actual: &FeatureVector<R>,
        delta: f64,
    ) -> bool {
        self.index += 1;
        let mut mismatches = Vec::new();
        for feature in RunLengthFeature::ALL {
            let want = expected[feature.index()];
            let got = actual.get(feature).to_f64();
            if self.display() {
                eprintln!("  [{}] {} = {} (expected {})", self.index, feature, got, want);
            }
            let diff = (want - got).abs();
            if diff > delta || diff.is_nan() {
                mismatches.push(format!("{}: expected {}, actual {}", feature, want, got));
            }
        }

        if mismatches.is_empty() {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: feature comparison for index {} (delta = {})\n  {}",
                self.test_name,
                self.index,
                delta,
                mismatches.join("\n  ")
            );
            self.fail(msg)
        }
    }

    /// Compare two feature images for exact equality
    ///
    /// Size, spacing and every feature value must match bit for bit.
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_images<R: FeatureScalar>(
        &mut self,
        img1: &NdImage<FeatureVector<R>>,
        img2: &NdImage<FeatureVector<R>>,
    ) -> bool {
        self.index += 1;

        if !img1.same_geometry(img2) {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - geometry mismatch\n\
                 {:?} {:?} vs {:?} {:?}",
                self.test_name,
                self.index,
                img1.size(),
                img1.spacing(),
                img2.size(),
                img2.spacing()
            );
            return self.fail(msg);
        }

        let region = img1.region();
        for (position, (a, b)) in region.iter().zip(img1.data().iter().zip(img2.data())) {
            let same = a
                .as_slice()
                .iter()
                .zip(b.as_slice())
                .all(|(x, y)| x.to_f64().to_bits() == y.to_f64().to_bits());
            if !same {
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - voxel mismatch at {:?}",
                    self.test_name, self.index, position
                );
                return self.fail(msg);
            }
        }
        if self.display() {
            eprintln!("  [{}] {} voxels identical", self.index, img1.len());
        }

        true
    }

    /// Record a boolean check
    ///
    /// # Arguments
    ///
    /// * `condition` - Outcome of the check
    /// * `what` - Short description, reported on failure
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg)
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(1.0, f64::NAN, 1.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_features() {
        let mut rp = RegParams::new("test");
        let v = FeatureVector::<f32>::from_f64([1.0; 10]);
        assert!(rp.compare_features(&[1.0; 10], &v, 1e-6));
        let mut expected = [1.0; 10];
        expected[4] = 2.0;
        assert!(!rp.compare_features(&expected, &v, 1e-6));
        assert!(rp.failures()[0].contains("LowGreyLevelRunEmphasis"));
    }

    #[test]
    fn test_compare_images() {
        let mut rp = RegParams::new("test");
        let a = NdImage::new(&[2, 3], FeatureVector::<f64>::zero()).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_images(&a, &b));

        b.set(&[1, 2], FeatureVector::from_f64([0.5; 10])).unwrap();
        assert!(!rp.compare_images(&a, &b));

        let c = a.clone().with_spacing(&[1.0, 2.0]).unwrap();
        assert!(!rp.compare_images(&a, &c));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_check() {
        let mut rp = RegParams::new("test");
        assert!(rp.check(true, "ok"));
        assert!(!rp.check(false, "broken"));
        assert!(!rp.cleanup());
    }
}
