//! What the RSVP section shows
//!
//! The presentation layer (browser page or terminal) only consumes these
//! values; it never decides which state the flow is in.

use std::fmt;
use wedding_common::rsvp::RsvpResponse;

/// Rendered state of the RSVP section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Accept/decline controls
    Interactive {
        accept_selected: bool,
        /// False while a request is outstanding
        controls_enabled: bool,
    },
    /// Final confirmation; no controls remain
    Terminal(TerminalView),
}

impl View {
    pub fn has_controls(&self) -> bool {
        matches!(self, View::Interactive { .. })
    }
}

/// Non-interactive confirmation shown once the guest has answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalView {
    /// Just accepted on this page
    ThankYou { guest_count: u32 },
    /// Just declined on this page
    Regret,
    /// Accepted on an earlier visit
    AlreadyAccepted { guest_count: u32 },
    /// Declined on an earlier visit
    AlreadyDeclined,
}

impl TerminalView {
    /// View after a successful submission
    pub fn for_submitted(response: &RsvpResponse) -> Self {
        match response {
            RsvpResponse::Accepted { guest_count } => TerminalView::ThankYou {
                guest_count: *guest_count,
            },
            RsvpResponse::Declined => TerminalView::Regret,
        }
    }

    /// View for a response found by the status check
    pub fn for_existing(response: &RsvpResponse) -> Self {
        match response {
            RsvpResponse::Accepted { guest_count } => TerminalView::AlreadyAccepted {
                guest_count: *guest_count,
            },
            RsvpResponse::Declined => TerminalView::AlreadyDeclined,
        }
    }

    pub fn guest_count(&self) -> Option<u32> {
        match self {
            TerminalView::ThankYou { guest_count }
            | TerminalView::AlreadyAccepted { guest_count } => Some(*guest_count),
            TerminalView::Regret | TerminalView::AlreadyDeclined => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TerminalView::ThankYou { .. } | TerminalView::AlreadyAccepted { .. } => "Thank You!",
            TerminalView::Regret => "We'll Miss You",
            TerminalView::AlreadyDeclined => "RSVP Received",
        }
    }

    pub fn body(&self) -> Vec<String> {
        const CELEBRATE: &str = "We can't wait to celebrate this special day with you.";
        let regret = || {
            vec![
                "Thank you for letting us know.".to_string(),
                "We're sorry you won't be able to join us,".to_string(),
                "but we appreciate you taking the time to respond.".to_string(),
            ]
        };

        match self {
            TerminalView::ThankYou { guest_count } => vec![
                "We're thrilled you'll be joining us!".to_string(),
                format!(
                    "Your confirmation for {} guest(s) has been received.",
                    guest_count
                ),
                CELEBRATE.to_string(),
            ],
            TerminalView::AlreadyAccepted { guest_count } => vec![
                "Your RSVP has been received.".to_string(),
                format!(
                    "We're thrilled you'll be joining us with {} guest(s)!",
                    guest_count
                ),
                CELEBRATE.to_string(),
            ],
            TerminalView::Regret | TerminalView::AlreadyDeclined => regret(),
        }
    }
}

impl fmt::Display for TerminalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        for line in self.body() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Terminal(terminal) => write!(f, "{}", terminal),
            View::Interactive {
                accept_selected,
                controls_enabled,
            } => {
                let choice = if *accept_selected { "Accept selected" } else { "No option selected" };
                let state = if *controls_enabled { "" } else { " (waiting for server)" };
                writeln!(f, "RSVP: [Accept] [Decline] - {}{}", choice, state)
            }
        }
    }
}

/// Modal message shown over the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    /// Guest input problem; nothing was sent
    pub fn reminder(message: impl Into<String>) -> Self {
        Self {
            title: "Reminder".to_string(),
            message: message.into(),
        }
    }

    /// Submission failed; the guest may try again
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.title, self.message)
    }
}
