//! Plain UI state owned by the controller and drawn by the renderer.

use std::time::{Duration, Instant};

/// Top-level screens of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Analyze,
    History,
    Login,
    Register,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Self::Analyze => "Analyze",
            Self::History => "History",
            Self::Login => "Sign in",
            Self::Register => "Register",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Debug)]
pub struct UiState {
    pub screen: Screen,
    pub login: LoginForm,
    pub register: RegisterForm,
    /// Text in the history search box; mirrored into the filter on change.
    pub history_search: String,
    pub notifications: Notifications,
}

impl UiState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            screen: Screen::default(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            history_search: String::new(),
            notifications: Notifications::new(notification_ttl),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub submitting: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub submitting: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationTone {
    Info,
    Success,
    Error,
}

/// Transient, dismissible message.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub tone: NotificationTone,
    pub created_at: Instant,
}

/// Stack of notifications, newest last.
#[derive(Debug)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

/// Older notifications are dropped beyond this many.
pub const MAX_NOTIFICATIONS: usize = 4;

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn push(
        &mut self,
        tone: NotificationTone,
        title: impl Into<String>,
        message: impl Into<String>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            title: title.into(),
            message: message.into(),
            tone,
            created_at: now,
        });
        if self.items.len() > MAX_NOTIFICATIONS {
            let excess = self.items.len() - MAX_NOTIFICATIONS;
            self.items.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Drop notifications older than the TTL.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|item| now.saturating_duration_since(item.created_at) < ttl);
    }

    /// Most recent notification, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_expire_after_ttl() {
        let start = Instant::now();
        let mut stack = Notifications::new(Duration::from_secs(5));
        stack.push(NotificationTone::Info, "a", "", start);
        stack.push(NotificationTone::Error, "b", "", start + Duration::from_secs(3));
        stack.expire(start + Duration::from_secs(5));
        assert_eq!(stack.items().len(), 1);
        assert_eq!(stack.items()[0].title, "b");
    }

    #[test]
    fn dismiss_removes_by_id() {
        let now = Instant::now();
        let mut stack = Notifications::new(Duration::from_secs(5));
        let id = stack.push(NotificationTone::Success, "done", "", now);
        assert!(stack.dismiss(id));
        assert!(!stack.dismiss(id));
        assert!(stack.items().is_empty());
    }

    #[test]
    fn stack_keeps_newest() {
        let now = Instant::now();
        let mut stack = Notifications::new(Duration::from_secs(5));
        for i in 0..(MAX_NOTIFICATIONS + 2) {
            stack.push(NotificationTone::Info, format!("n{i}"), "", now);
        }
        assert_eq!(stack.items().len(), MAX_NOTIFICATIONS);
        assert_eq!(stack.items()[0].title, "n2");
    }
}
