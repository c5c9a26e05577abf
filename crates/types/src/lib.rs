/// Errors that can occur when creating validated code types.
#[derive(Debug, thiserror::Error)]
pub enum CodeError {
    /// The input code was empty or contained only whitespace
    #[error("Code cannot be empty")]
    Empty,
}

/// A vocabulary code that guarantees non-empty content.
///
/// Clinical dispositions and other coded values are identified by codes drawn
/// from an external concept dictionary. This type wraps a `String` and ensures
/// it contains at least one non-whitespace character. The input is
/// automatically trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConceptCode(String);

impl ConceptCode {
    /// Creates a new `ConceptCode` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(ConceptCode)` if the trimmed input is non-empty,
    /// or `Err(CodeError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, CodeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CodeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConceptCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ConceptCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ConceptCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ConceptCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ConceptCode::new(&s).map_err(serde::de::Error::custom)
    }
}
