/// Lifecycle of the visible selection for one model
///
/// A view starts `Pending` when navigation state carries no key. Adopting
/// a key moves it to `Resolved`, and it never returns to `Pending`; later
/// keys simply replace the resolved one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityState {
    Pending,
    Resolved(String),
}

impl VisibilityState {
    pub fn from_key(key: Option<String>) -> Self {
        match key {
            Some(key) => VisibilityState::Resolved(key),
            None => VisibilityState::Pending,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            VisibilityState::Pending => None,
            VisibilityState::Resolved(key) => Some(key),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, VisibilityState::Pending)
    }
}
