use crate::model::quote::Quote;
use crate::notify::Notification;

pub const ALERT_TITLE: &str = "Target Reached! 🚀";

#[derive(Debug, Clone, PartialEq)]
pub struct AlertDecision {
    pub should_notify: bool,
    /// Target to keep after this evaluation. `None` once the alert fired.
    pub cleared_target: Option<String>,
}

/// Parse user-entered target text. Blank, non-numeric or non-finite input is
/// "no valid target".
pub fn parse_target(target: &str) -> Option<f64> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decide whether `quote` fires the alert for `target`.
///
/// Pure: the caller dispatches the notification and stores the returned
/// target.
pub fn evaluate(quote: &Quote, target: Option<&str>) -> AlertDecision {
    let keep = AlertDecision {
        should_notify: false,
        cleared_target: target.map(str::to_string),
    };
    let Some(raw) = target else {
        return keep;
    };
    match parse_target(raw) {
        Some(threshold) if quote.price >= threshold => AlertDecision {
            should_notify: true,
            cleared_target: None,
        },
        Some(_) => keep,
        None => {
            if !raw.trim().is_empty() {
                tracing::debug!(target_text = raw, "Ignoring malformed alert target");
            }
            keep
        }
    }
}

pub fn alert_notification(symbol: &str, target: &str, price: f64) -> Notification {
    Notification {
        title: ALERT_TITLE.to_string(),
        body: format!(
            "{} has hit your target of ${}. Current: ${}",
            symbol,
            target.trim(),
            price
        ),
    }
}
