// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_public_path() -> String {
    "../".to_string()
}
