use controller::Session;

/// Zero or one logged-in user, lives as long as the app
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_session(&mut self, session: Session) {
        log::debug!("Session started for {}", session.email);
        self.current = Some(session);
    }

    pub fn clear_session(&mut self) -> Option<Session> {
        let previous = self.current.take();
        if let Some(session) = &previous {
            log::debug!("Session cleared for {}", session.email);
        }

        previous
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }
}
