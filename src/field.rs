use crate::error::CodecError;

/// Two-phase cell for one record field.
///
/// A freshly declared record starts with every field [`Unbound`]; decoding
/// transitions each field to [`Bound`] or fails the whole record. Encoding
/// reads bound values without mutating them (an unbound query field falls
/// back to its default, an unbound dynamic path field is an error).
///
/// Accessing the value of an unbound field through [`get`] is a contract
/// violation and returns [`CodecError::InvalidState`] instead of
/// fabricating a value.
///
/// [`Unbound`]: Field::Unbound
/// [`Bound`]: Field::Bound
/// [`get`]: Field::get
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// No concrete value yet; the state of every field before decoding.
    #[default]
    Unbound,
    /// A concrete value is present.
    Bound(T),
}

impl<T> Field<T> {
    /// Whether a concrete value is present.
    pub fn is_bound(&self) -> bool {
        matches!(self, Field::Bound(_))
    }

    /// The bound value, or `None` while unbound.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Bound(value) => Some(value),
            Field::Unbound => None,
        }
    }

    /// The bound value, failing fast while unbound.
    ///
    /// Records produced by a successful decode are always fully bound, so
    /// this only errors when a field is read outside the engine's expected
    /// phase (for example on a hand-constructed record that was never
    /// populated).
    pub fn get(&self) -> Result<&T, CodecError> {
        match self {
            Field::Bound(value) => Ok(value),
            Field::Unbound => Err(CodecError::InvalidState(
                "field value accessed while unbound".to_string(),
            )),
        }
    }

    /// Bind a concrete value, replacing any previous one.
    pub fn set(&mut self, value: T) {
        *self = Field::Bound(value);
    }

    /// Consume the cell, yielding the bound value if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Bound(value) => Some(value),
            Field::Unbound => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Bound(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbound() {
        let field: Field<i32> = Field::default();
        assert!(!field.is_bound());
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_get_while_unbound_is_invalid_state() {
        let field: Field<String> = Field::Unbound;
        match field.get() {
            Err(CodecError::InvalidState(_)) => {}
            other => panic!("expected InvalidState, got {:?}", other),
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut field = Field::Unbound;
        field.set(42);
        assert!(field.is_bound());
        assert_eq!(field.get().expect("bound"), &42);
        assert_eq!(field.into_value(), Some(42));
    }

    #[test]
    fn test_from_binds() {
        let field: Field<&str> = "abc".into();
        assert_eq!(field, Field::Bound("abc"));
    }
}
