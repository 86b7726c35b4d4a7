pub const FADE_INPUT: [f64; 4] = [0.0, 0.2, 0.8, 1.0];
pub const FADE_OUTPUT: [f64; 4] = [0.3, 1.0, 1.0, 0.3];
pub const PARALLAX_OFFSET_DEFAULT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("expected {inputs} outputs, got {outputs}")]
    LengthMismatch { inputs: usize, outputs: usize },
    #[error("at least two control points are required, got {0}")]
    TooFewPoints(usize),
    #[error("control point {index} is not finite")]
    NotFinite { index: usize },
    #[error("input {index} does not increase ({prev} -> {next})")]
    NotIncreasing { index: usize, prev: f64, next: f64 },
}

/// Piecewise-linear `input -> output` mapping that holds the end values flat
/// outside the input range.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformMap {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl TransformMap {
    pub fn new(inputs: &[f64], outputs: &[f64]) -> Result<Self, TransformError> {
        if inputs.len() != outputs.len() {
            return Err(TransformError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        if inputs.len() < 2 {
            return Err(TransformError::TooFewPoints(inputs.len()));
        }
        for (index, (input, output)) in inputs.iter().zip(outputs).enumerate() {
            if !input.is_finite() || !output.is_finite() {
                return Err(TransformError::NotFinite { index });
            }
        }
        for (index, pair) in inputs.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TransformError::NotIncreasing {
                    index: index + 1,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
        })
    }

    /// Edge-in/edge-out opacity used on gradient headings.
    pub fn fade() -> Self {
        Self {
            inputs: FADE_INPUT.to_vec(),
            outputs: FADE_OUTPUT.to_vec(),
        }
    }

    pub fn translate(amplitude: f64) -> Result<Self, TransformError> {
        Self::new(&[0.0, 1.0], &[0.0, -amplitude])
    }

    /// Maps raw `scroll_y` so the element drifts from `+offset` to `-offset`
    /// while it travels from the viewport bottom to `offset` past its top.
    pub fn parallax(
        element_top: f64,
        viewport_height: f64,
        offset: f64,
    ) -> Result<Self, TransformError> {
        let start = element_top - viewport_height;
        let end = element_top + offset;
        Self::new(&[start, end], &[offset, -offset])
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.inputs[0], self.inputs[self.inputs.len() - 1])
    }

    pub fn map(&self, x: f64) -> f64 {
        let last = self.inputs.len() - 1;
        if x.is_nan() || x <= self.inputs[0] {
            return self.outputs[0];
        }
        if x >= self.inputs[last] {
            return self.outputs[last];
        }
        let upper = self.inputs.partition_point(|&input| input <= x);
        let lower = upper - 1;
        let (x0, x1) = (self.inputs[lower], self.inputs[upper]);
        let (y0, y1) = (self.outputs[lower], self.outputs[upper]);
        let t = (x - x0) / (x1 - x0);
        y0 + (y1 - y0) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_control_points() {
        assert_eq!(
            TransformMap::new(&[0.0, 1.0], &[1.0]),
            Err(TransformError::LengthMismatch {
                inputs: 2,
                outputs: 1
            })
        );
        assert_eq!(
            TransformMap::new(&[0.5], &[1.0]),
            Err(TransformError::TooFewPoints(1))
        );
        assert!(matches!(
            TransformMap::new(&[0.0, 0.0], &[1.0, 2.0]),
            Err(TransformError::NotIncreasing { index: 1, .. })
        ));
        assert_eq!(
            TransformMap::new(&[0.0, f64::INFINITY], &[1.0, 2.0]),
            Err(TransformError::NotFinite { index: 1 })
        );
    }

    #[test]
    fn fade_ramps_between_points() {
        let fade = TransformMap::fade();
        assert!((fade.map(0.1) - 0.65).abs() < 1e-9);
        assert!((fade.map(0.9) - 0.65).abs() < 1e-9);
        assert_eq!(fade.map(0.5), 1.0);
        assert_eq!(fade.map(f64::NAN), 0.3);
    }
}
