use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub column_name: String,
    #[serde(default)]
    pub description: String,
}

impl Column {
    pub fn new(column_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            description: description.into(),
        }
    }

    /// Description, if one was provided.
    pub fn detail(&self) -> Option<&str> {
        (!self.description.is_empty()).then_some(self.description.as_str())
    }
}
