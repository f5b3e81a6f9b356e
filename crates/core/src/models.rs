/// One selectable inference model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub id: &'static str,
    pub label: &'static str,
}

/// The closed set of models the companion can run against. The first
/// entry is the default.
pub const AVAILABLE_MODELS: &[ModelSpec] = &[
    ModelSpec {
        id: "deepseek-r1:1.5b",
        label: "Lighter listener, answers quickly",
    },
    ModelSpec {
        id: "deepseek-r1:3b",
        label: "Slower listener, more considered replies",
    },
];

pub fn default_model() -> &'static ModelSpec {
    &AVAILABLE_MODELS[0]
}

/// Look up a model by identifier.
pub fn find(id: &str) -> Option<&'static ModelSpec> {
    AVAILABLE_MODELS.iter().find(|m| m.id == id)
}
