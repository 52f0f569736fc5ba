//! Models configuration: private provider credentials and model specs

/// One named provider/model profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Identifier (key in the models document)
    pub id: String,

    /// HTTP(S) endpoint of the provider
    pub base_url: String,

    /// Secret credential, empty while the user has not supplied one yet
    pub api_key: String,

    /// Tag selecting the model-calling strategy (e.g. "whisper", "chat")
    pub implementation: String,

    /// Provider-specific model name
    pub model: String,
}

impl ModelConfig {
    /// Whether credentials still have to be filled in
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Mapping from unique identifier to model profile, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelsConfig {
    pub models: Vec<ModelConfig>,
}

impl ModelsConfig {
    pub fn new(models: Vec<ModelConfig>) -> Self {
        Self { models }
    }

    /// Look up a model profile by id
    pub fn get(&self, id: &str) -> Option<&ModelConfig> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Model ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
