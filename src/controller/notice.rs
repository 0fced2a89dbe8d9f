/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A dismissable message shown after an operation, the terminal stand-in for a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(title: &'static str, message: impl Into<String>) -> Self {
        Self { title, message: message.into(), level: NoticeLevel::Success }
    }

    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self { title, message: message.into(), level: NoticeLevel::Error }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
