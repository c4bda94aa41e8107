use crate::core::value::Value;

/// Positional view over one upstream record.
///
/// The load path only needs the field count and the value at each index, so
/// both the row and tuple shapes produced by the pipeline implement this.
pub trait Record {
    fn arity(&self) -> usize;

    fn field(&self, index: usize) -> Option<&Value>;
}

impl Record for [Value] {
    fn arity(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }
}

impl Record for Vec<Value> {
    fn arity(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }
}

impl<const N: usize> Record for [Value; N] {
    fn arity(&self) -> usize {
        N
    }

    fn field(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }
}
