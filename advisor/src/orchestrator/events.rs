use super::view::AdvisorView;

/// Events broadcast from the advisor actor to all subscribers.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum AdvisorEvent {
    /// Full view after any change, including engine progress.
    StateChanged(AdvisorView),
    /// The engine went away; the view is now degraded.
    EngineLost(String),
    /// Error notification.
    Error(String),
}
