use facetport_common::Real;

/// A flat stream of floating-point values, stored at whatever precision the source document used.
#[derive(Debug, Clone, PartialEq)]
pub enum FloatValues {
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl Default for FloatValues {
    fn default() -> Self {
        Self::Float(Vec::new())
    }
}

impl From<Vec<f32>> for FloatValues {
    fn from(values: Vec<f32>) -> Self {
        Self::Float(values)
    }
}

impl From<Vec<f64>> for FloatValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Double(values)
    }
}

impl FloatValues {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `visit` over the underlying slice, whichever precision it has.
    ///
    /// This is the intended way to read whole streams: `visit` is monomorphized for each storage
    /// type, so the inner loop never matches on the precision.
    #[inline]
    pub fn visit<V: ValuesVisitor>(&self, visit: V) -> V::Output {
        match self {
            Self::Float(v) => visit.visit(v.as_slice()),
            Self::Double(v) => visit.visit(v.as_slice()),
        }
    }
}

/// A computation over a [FloatValues] slice that is generic over its storage precision.
pub trait ValuesVisitor {
    type Output;
    fn visit<R: Real>(self, values: &[R]) -> Self::Output;
}
