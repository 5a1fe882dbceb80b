/// Render state of a view. `Error` replaces the whole view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl ViewState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ViewState::Loaded)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}
