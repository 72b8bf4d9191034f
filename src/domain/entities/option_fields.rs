use serde::{Deserialize, Deserializer};

/// Represents optional field semantics in PATCH requests.
///
/// - `Unchanged` → field absent from the body (use with `#[serde(default)]`)
/// - `SetToNull` → explicitly `null`
/// - `SetToValue` → set to provided value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present; absence is handled by `Default`.
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(v) => OptionField::SetToValue(v),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    /// Convert to nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(T))` → set to value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    /// Borrowed nested option, same shape as [`OptionField::into_option`].
    pub fn as_ref_option(&self) -> Option<Option<&T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(value) => Some(Some(value)),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl OptionField<String> {
    /// `(touched, value)` pair for `CASE WHEN $touched THEN $value ELSE col END` updates.
    pub fn sql_pair(&self) -> (bool, Option<&str>) {
        match self.as_ref_option() {
            None => (false, None),
            Some(v) => (true, v.map(|s| s.as_str())),
        }
    }
}

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}

pub type PatchString = OptionField<String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_pair_reflects_patch_state() {
        assert_eq!(PatchString::Unchanged.sql_pair(), (false, None));
        assert_eq!(PatchString::SetToNull.sql_pair(), (true, None));
        assert_eq!(
            PatchString::SetToValue("x".into()).sql_pair(),
            (true, Some("x"))
        );
    }

    #[test]
    fn nested_option_round_trips() {
        let field: OptionField<i32> = Some(None).into();
        assert_eq!(field.into_option(), Some(None));
    }
}
