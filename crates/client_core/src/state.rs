/// Lifecycle of one remote lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// No fetch has been issued yet.
    Idle,
    /// A request is in flight; `data`/`error_message` reflect the previous
    /// completed attempt, if any.
    Loading,
    Success,
    Failure,
}

/// The status/data/error triple every orchestrator owns. Exactly one of
/// `data` (on `Success`) or `error_message` (on `Failure`) is meaningful
/// at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub status: RequestStatus,
    pub data: Option<T>,
    pub error_message: Option<String>,
}

impl<T> RequestState<T> {
    pub fn idle() -> Self {
        Self {
            status: RequestStatus::Idle,
            data: None,
            error_message: None,
        }
    }

    /// Entering `Loading` always clears the previous error; prior data is
    /// kept so consumers may keep rendering the last-known value.
    pub fn begin_loading(&mut self) {
        self.status = RequestStatus::Loading;
        self.error_message = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.status = RequestStatus::Success;
        self.data = Some(data);
        self.error_message = None;
    }

    /// Policy choice: failure clears `data` so a stale value is never shown
    /// next to an error banner.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = RequestStatus::Failure;
        self.data = None;
        self.error_message = Some(message.into());
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// True once the state machine has reached `Success` or `Failure`.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, RequestStatus::Success | RequestStatus::Failure)
    }
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
