//! Host callbacks
//!
//! The host is told what happened; it is never handed the sequencer. Any
//! follow-up (removing the eliminated name, hiding the widget) is applied by
//! the host after the sequencer call that triggered the callback returns.

use serde::{Deserialize, Serialize};

/// Application hosting the wheel
pub trait WheelHost {
    /// A participant was chosen and the reveal finished
    fn on_eliminated(&mut self, name: &str);

    /// The widget asks to be hidden
    fn on_close(&mut self);

    /// Status message for assistive technology
    fn announce(&mut self, _message: &str) {}
}

impl<H: WheelHost + ?Sized> WheelHost for &mut H {
    fn on_eliminated(&mut self, name: &str) {
        (**self).on_eliminated(name)
    }

    fn on_close(&mut self) {
        (**self).on_close()
    }

    fn announce(&mut self, message: &str) {
        (**self).announce(message)
    }
}

impl<H: WheelHost + ?Sized> WheelHost for Box<H> {
    fn on_eliminated(&mut self, name: &str) {
        (**self).on_eliminated(name)
    }

    fn on_close(&mut self) {
        (**self).on_close()
    }

    fn announce(&mut self, message: &str) {
        (**self).announce(message)
    }
}

/// One callback invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    Eliminated { name: String },
    Closed,
    Announced { message: String },
}

/// Host that records every callback in order (tests, batch runs)
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names passed to `on_eliminated`, in order
    pub fn eliminated(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Eliminated { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Closed))
            .count()
    }

    pub fn announcements(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Announced { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Callbacks other than announcements
    pub fn lifecycle_calls(&self) -> Vec<&HostCall> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, HostCall::Announced { .. }))
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl WheelHost for RecordingHost {
    fn on_eliminated(&mut self, name: &str) {
        self.calls.push(HostCall::Eliminated {
            name: name.to_string(),
        });
    }

    fn on_close(&mut self) {
        self.calls.push(HostCall::Closed);
    }

    fn announce(&mut self, message: &str) {
        self.calls.push(HostCall::Announced {
            message: message.to_string(),
        });
    }
}
