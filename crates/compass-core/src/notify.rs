//! User-visible notices.
//!
//! Background failures (the debounced write, goal-order saves) have no
//! caller to propagate to; they surface through a [`Notifier`] instead.
//! Validation rejections never reach the notifier; those are log warnings
//! only.

/// Sink for user-visible notices.
pub trait Notifier: Send + Sync {
    /// Surfaces a message to the user.
    fn notify(&self, message: &str);
}

/// Default notifier: routes notices to the log.
#[derive(Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::warn!("{message}");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use super::Notifier;

    /// Captures notices for assertions.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub messages: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.messages
                .lock()
                .expect("notifier lock poisoned")
                .push(message.to_string());
        }
    }
}
