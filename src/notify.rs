use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Host permission to raise notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// Not decided yet; may be requested.
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Asks the host (or the user) for notification permission.
pub trait PermissionPrompt {
    fn request(&mut self) -> NotificationPermission;
}

pub trait NotificationSink {
    fn permission(&self) -> NotificationPermission;

    fn set_permission(&mut self, permission: NotificationPermission);

    /// Deliver unconditionally; `dispatch` does the permission check.
    fn show(&mut self, notification: &Notification) -> Result<()>;

    /// Returns whether the notification was delivered.
    fn dispatch(&mut self, notification: &Notification) -> bool {
        if self.permission() != NotificationPermission::Granted {
            tracing::debug!(
                title = %notification.title,
                permission = ?self.permission(),
                "Notification suppressed"
            );
            return false;
        }
        match self.show(notification) {
            Ok(()) => {
                tracing::info!(
                    title = %notification.title,
                    body = %notification.body,
                    "Notification dispatched"
                );
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Notification dispatch failed");
                false
            }
        }
    }
}

/// Request permission only while it is undecided. A denied permission is
/// never re-requested.
pub fn ensure_permission<S, P>(sink: &mut S, prompt: &mut P) -> NotificationPermission
where
    S: NotificationSink + ?Sized,
    P: PermissionPrompt + ?Sized,
{
    if sink.permission() == NotificationPermission::Default {
        let decided = prompt.request();
        tracing::info!(permission = ?decided, "Notification permission requested");
        sink.set_permission(decided);
    }
    sink.permission()
}

/// Rings the terminal bell; the dashboard shows the text as a toast.
pub struct TerminalNotifier<W: Write> {
    out: W,
    permission: NotificationPermission,
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W, permission: NotificationPermission) -> Self {
        Self { out, permission }
    }
}

impl<W: Write> NotificationSink for TerminalNotifier<W> {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn set_permission(&mut self, permission: NotificationPermission) {
        self.permission = permission;
    }

    fn show(&mut self, _notification: &Notification) -> Result<()> {
        self.out
            .write_all(b"\x07")
            .and_then(|_| self.out.flush())
            .context("failed to ring terminal bell")
    }
}

/// Yes/no question on a line-based reader, run once before the TUI starts.
pub struct LinePrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> PermissionPrompt for LinePrompt<R, W> {
    fn request(&mut self) -> NotificationPermission {
        if write!(self.output, "Allow price alert notifications? [y/N] ")
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return NotificationPermission::Default;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => NotificationPermission::Default,
            Ok(_) => match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => NotificationPermission::Granted,
                _ => NotificationPermission::Denied,
            },
        }
    }
}
