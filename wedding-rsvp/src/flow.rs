//! RSVP state machine
//!
//! ```text
//! Checking --StatusResolved(None)--> Unanswered --AcceptSelected--> AcceptPending
//!    |                                   |                              |
//!    | StatusResolved(Some)              | DeclineSelected              | SubmitPressed
//!    v                                   v                              v
//! Answered(Already*)               Submitting(Declined)       Submitting(Accepted(n))
//!                                        |                              |
//!                          ok: Answered  |  failed: back to the pre-submit state
//! ```
//!
//! Transitions are pure: [`RsvpFlow::handle`] consumes one [`UiEvent`] and
//! returns the [`Command`]s to carry out. Network commands are executed by
//! [`crate::controller::RsvpController`], which feeds the outcome back in as
//! another event.

use tracing::debug;
use wedding_common::rsvp::{GuestId, RsvpResponse};

use crate::error::RsvpError;
use crate::guest::GuestIdentity;
use crate::view::{Notice, TerminalView, View};

pub const SELECT_OPTION_REMINDER: &str = "Please select your presence option first.";
pub const GUEST_COUNT_REMINDER: &str = "Please enter the number of guests attending.";
pub const MISSING_GUEST_REMINDER: &str =
    "This invitation link is missing a guest code. Please use the link from your invitation.";

/// Everything that can happen to the RSVP section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    PageLoaded,
    AcceptSelected,
    /// Decline submits immediately
    DeclineSelected,
    /// `guest_count` is the raw guest-count field; blank means 1
    SubmitPressed { guest_count: String },
    StatusResolved(Option<RsvpResponse>),
    SubmitSucceeded(RsvpResponse),
    /// Carries the message to show the guest
    SubmitFailed(String),
}

/// A response ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub guest_id: GuestId,
    pub guest_name: String,
    pub response: RsvpResponse,
}

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CheckStatus(GuestId),
    Submit(Submission),
    Render(View),
    Notify(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for the page load or the status check
    Checking,
    Unanswered,
    AcceptPending,
    /// A submission is in flight; `accept_selected` restores the pre-submit
    /// state if it fails
    Submitting {
        response: RsvpResponse,
        accept_selected: bool,
    },
    Answered(TerminalView),
}

/// RSVP flow for one guest and one page view
#[derive(Debug)]
pub struct RsvpFlow {
    guest: GuestIdentity,
    state: FlowState,
}

impl RsvpFlow {
    pub fn new(guest: GuestIdentity) -> Self {
        Self {
            guest,
            state: FlowState::Checking,
        }
    }

    pub fn guest(&self) -> &GuestIdentity {
        &self.guest
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.state, FlowState::Answered(_))
    }

    /// Current rendering of the state
    pub fn view(&self) -> View {
        match &self.state {
            FlowState::Checking => interactive(false, false),
            FlowState::Unanswered => interactive(false, true),
            FlowState::AcceptPending => interactive(true, true),
            FlowState::Submitting {
                accept_selected, ..
            } => interactive(*accept_selected, false),
            FlowState::Answered(terminal) => View::Terminal(*terminal),
        }
    }

    /// Apply one event
    pub fn handle(&mut self, event: UiEvent) -> Vec<Command> {
        let before = self.view();
        let state = std::mem::replace(&mut self.state, FlowState::Checking);

        let (next, commands) = match (state, event) {
            (FlowState::Checking, UiEvent::PageLoaded) => match &self.guest.guest_id {
                Some(guest_id) => (
                    FlowState::Checking,
                    vec![
                        Command::Render(interactive(false, false)),
                        Command::CheckStatus(guest_id.clone()),
                    ],
                ),
                None => {
                    debug!("No guest id in invitation link, skipping status check");
                    (FlowState::Unanswered, vec![])
                }
            },

            (FlowState::Checking, UiEvent::StatusResolved(Some(existing))) => {
                (FlowState::Answered(TerminalView::for_existing(&existing)), vec![])
            }
            (FlowState::Checking, UiEvent::StatusResolved(None)) => (FlowState::Unanswered, vec![]),

            (FlowState::Unanswered | FlowState::AcceptPending, UiEvent::AcceptSelected) => {
                (FlowState::AcceptPending, vec![])
            }

            (state @ (FlowState::Unanswered | FlowState::AcceptPending), UiEvent::DeclineSelected) => {
                let accept_selected = state == FlowState::AcceptPending;
                self.begin_submit(state, RsvpResponse::Declined, accept_selected)
            }

            (FlowState::Unanswered, UiEvent::SubmitPressed { .. }) => (
                FlowState::Unanswered,
                vec![remind(RsvpError::UserInputMissing(
                    SELECT_OPTION_REMINDER.to_string(),
                ))],
            ),

            (FlowState::AcceptPending, UiEvent::SubmitPressed { guest_count }) => {
                match parse_guest_count(&guest_count) {
                    Ok(count) => self.begin_submit(
                        FlowState::AcceptPending,
                        RsvpResponse::Accepted { guest_count: count },
                        true,
                    ),
                    Err(e) => (FlowState::AcceptPending, vec![remind(e)]),
                }
            }

            (FlowState::Submitting { response, .. }, UiEvent::SubmitSucceeded(_)) => {
                (FlowState::Answered(TerminalView::for_submitted(&response)), vec![])
            }

            (
                FlowState::Submitting {
                    accept_selected, ..
                },
                UiEvent::SubmitFailed(message),
            ) => {
                let resumed = if accept_selected {
                    FlowState::AcceptPending
                } else {
                    FlowState::Unanswered
                };
                (resumed, vec![Command::Notify(Notice::error(message))])
            }

            (state, event) => {
                debug!(?state, ?event, "Ignoring event in current RSVP state");
                self.state = state;
                return vec![];
            }
        };

        // Render commands are emitted only for visible changes
        self.state = next;
        let mut out = commands;
        let after = self.view();
        if after != before {
            out.insert(0, Command::Render(after));
        }
        out
    }

    fn begin_submit(
        &self,
        current: FlowState,
        response: RsvpResponse,
        accept_selected: bool,
    ) -> (FlowState, Vec<Command>) {
        let Some(guest_id) = self.guest.guest_id.clone() else {
            return (
                current,
                vec![remind(RsvpError::UserInputMissing(
                    MISSING_GUEST_REMINDER.to_string(),
                ))],
            );
        };

        let submission = Submission {
            guest_id,
            guest_name: self.guest.display_name.clone(),
            response,
        };

        (
            FlowState::Submitting {
                response,
                accept_selected,
            },
            vec![Command::Submit(submission)],
        )
    }
}

fn interactive(accept_selected: bool, controls_enabled: bool) -> View {
    View::Interactive {
        accept_selected,
        controls_enabled,
    }
}

fn remind(err: RsvpError) -> Command {
    Command::Notify(Notice::reminder(err.user_message()))
}

/// Blank means one guest; anything else must be a positive integer
fn parse_guest_count(raw: &str) -> Result<u32, RsvpError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(1);
    }
    trimmed
        .parse::<u32>()
        .ok()
        .filter(|count| *count > 0)
        .ok_or_else(|| RsvpError::UserInputMissing(GUEST_COUNT_REMINDER.to_string()))
}
