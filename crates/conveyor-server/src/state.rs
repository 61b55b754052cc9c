use application::ActuationDispatcher;

pub struct AppState {
    pub dispatcher: ActuationDispatcher,
    /// GPIO backend name reported by `/health`
    pub backend: String,
}

impl AppState {
    pub fn new(dispatcher: ActuationDispatcher) -> Self {
        let backend = dispatcher.driver().backend().to_string();
        Self {
            dispatcher,
            backend,
        }
    }
}
