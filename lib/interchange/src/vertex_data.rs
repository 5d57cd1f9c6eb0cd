use crate::{FloatValues, SourceError};

/// Description of one declared source within a [VertexData] stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    /// Identifier of the source within the interchange document; informational only.
    pub name: String,
    /// Number of components per attribute vertex, in `1..=4`.
    pub stride: usize,
    /// Number of *values* (not attribute vertices) belonging to this source.
    pub length: usize,
}

impl InputInfo {
    pub fn new(name: impl Into<String>, stride: usize, length: usize) -> Self {
        Self {
            name: name.into(),
            stride,
            length,
        }
    }

    /// The number of attribute vertices stored by this source.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.length / self.stride
    }
}

/// A multi-source attribute stream, such as every UV set of a mesh.
///
/// The values of all sources are concatenated into a single [FloatValues] in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexData {
    values: FloatValues,
    inputs: Vec<InputInfo>,
}

impl VertexData {
    /// Construct a stream, checking that the declared sources partition `values`.
    ///
    /// # Errors
    ///
    /// * any source has a stride outside `1..=4`
    /// * any source's length is not a multiple of its stride
    /// * the sum of source lengths differs from `values.len()`
    pub fn new(values: impl Into<FloatValues>, inputs: Vec<InputInfo>) -> Result<Self, SourceError> {
        let res = Self {
            values: values.into(),
            inputs,
        };
        res.check()?;
        Ok(res)
    }

    /// Convenience constructor for a stream with exactly one source.
    pub fn single(
        name: impl Into<String>,
        stride: usize,
        values: impl Into<FloatValues>,
    ) -> Result<Self, SourceError> {
        let values = values.into();
        let input = InputInfo::new(name, stride, values.len());
        Self::new(values, vec![input])
    }

    pub(crate) fn check(&self) -> Result<(), SourceError> {
        let mut total = 0;
        for (index, input) in self.inputs.iter().enumerate() {
            if !(1..=4).contains(&input.stride) {
                return Err(SourceError::InvalidStride {
                    input: index,
                    stride: input.stride,
                });
            }
            if input.length % input.stride != 0 {
                return Err(SourceError::RaggedSource {
                    input: index,
                    length: input.length,
                    stride: input.stride,
                });
            }
            total += input.length;
        }
        if total != self.values.len() {
            return Err(SourceError::SourceLengthMismatch {
                declared: total,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn values(&self) -> &FloatValues {
        &self.values
    }

    #[inline]
    pub fn inputs(&self) -> &[InputInfo] {
        &self.inputs
    }

    #[inline]
    pub fn input(&self, source: usize) -> Option<&InputInfo> {
        self.inputs.get(source)
    }

    /// Index of the first value of `source` within [Self::values].
    pub fn value_offset(&self, source: usize) -> usize {
        self.inputs[..source.min(self.inputs.len())]
            .iter()
            .map(|i| i.length)
            .sum()
    }

    /// Iterate over the *initial index* of each source: the index of its first attribute vertex if
    /// every source's vertices were laid end to end.
    pub fn initial_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.inputs.iter().scan(0, |next, input| {
            let initial = *next;
            *next += input.vertex_count();
            Some(initial)
        })
    }

    /// The total number of attribute vertices across all sources.
    pub fn vertex_count(&self) -> usize {
        self.inputs.iter().map(InputInfo::vertex_count).sum()
    }
}
