use std::io::Cursor;

use anyhow::Result;

use stock_pulse::notify::{
    ensure_permission, LinePrompt, Notification, NotificationPermission, NotificationSink,
    PermissionPrompt, TerminalNotifier,
};

struct CountingPrompt {
    answer: NotificationPermission,
    asked: usize,
}

impl PermissionPrompt for CountingPrompt {
    fn request(&mut self) -> NotificationPermission {
        self.asked += 1;
        self.answer
    }
}

#[derive(Default)]
struct RecordingSink {
    permission: NotificationPermission,
    shown: Vec<Notification>,
}

impl NotificationSink for RecordingSink {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn set_permission(&mut self, permission: NotificationPermission) {
        self.permission = permission;
    }

    fn show(&mut self, notification: &Notification) -> Result<()> {
        self.shown.push(notification.clone());
        Ok(())
    }
}

fn sample() -> Notification {
    Notification {
        title: "Target Reached! 🚀".to_string(),
        body: "DIS has hit your target of $90. Current: $95".to_string(),
    }
}

#[test]
fn undecided_permission_is_requested_once() {
    let mut sink = RecordingSink::default();
    let mut prompt = CountingPrompt {
        answer: NotificationPermission::Granted,
        asked: 0,
    };
    assert_eq!(
        ensure_permission(&mut sink, &mut prompt),
        NotificationPermission::Granted
    );
    assert_eq!(
        ensure_permission(&mut sink, &mut prompt),
        NotificationPermission::Granted
    );
    assert_eq!(prompt.asked, 1);
}

#[test]
fn denied_permission_is_never_re_requested() {
    let mut sink = RecordingSink {
        permission: NotificationPermission::Denied,
        ..Default::default()
    };
    let mut prompt = CountingPrompt {
        answer: NotificationPermission::Granted,
        asked: 0,
    };
    assert_eq!(
        ensure_permission(&mut sink, &mut prompt),
        NotificationPermission::Denied
    );
    assert_eq!(prompt.asked, 0);
}

#[test]
fn dispatch_requires_grant() {
    let mut sink = RecordingSink::default();
    assert!(!sink.dispatch(&sample()));
    sink.set_permission(NotificationPermission::Denied);
    assert!(!sink.dispatch(&sample()));
    assert!(sink.shown.is_empty());

    sink.set_permission(NotificationPermission::Granted);
    assert!(sink.dispatch(&sample()));
    assert_eq!(sink.shown, vec![sample()]);
}

#[test]
fn terminal_notifier_rings_bell() {
    let mut out = Vec::new();
    {
        let mut notifier = TerminalNotifier::new(&mut out, NotificationPermission::Granted);
        assert!(notifier.dispatch(&sample()));
    }
    assert_eq!(out, b"\x07");
}

#[test]
fn line_prompt_maps_answers() {
    let cases = [
        ("y\n", NotificationPermission::Granted),
        ("YES\n", NotificationPermission::Granted),
        ("n\n", NotificationPermission::Denied),
        ("\n", NotificationPermission::Denied),
        ("", NotificationPermission::Default),
    ];
    for (input, expected) in cases {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new(input.as_bytes()), &mut output);
        assert_eq!(prompt.request(), expected, "input {:?}", input);
        drop(prompt);
        assert!(String::from_utf8(output).unwrap().contains("notifications"));
    }
}
