//! Runs the RSVP state machine against a service
//!
//! The controller is the only owner of the flow. Each dispatched event runs to
//! completion, including any request it triggers, before the next event is
//! accepted, so at most one request is ever in flight.

use std::collections::VecDeque;
use tracing::{error, info};

use crate::client::RsvpService;
use crate::flow::{Command, RsvpFlow, UiEvent};
use crate::guest::GuestIdentity;
use crate::view::{Notice, View};

/// Output for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Render(View),
    Notify(Notice),
}

pub struct RsvpController<S> {
    flow: RsvpFlow,
    service: S,
}

impl<S: RsvpService> RsvpController<S> {
    /// The guest identity is fixed for the lifetime of the controller
    pub fn new(guest: GuestIdentity, service: S) -> Self {
        Self {
            flow: RsvpFlow::new(guest),
            service,
        }
    }

    pub fn flow(&self) -> &RsvpFlow {
        &self.flow
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Apply `event`, execute resulting requests, and collect UI updates in order
    pub async fn dispatch(&mut self, event: UiEvent) -> Vec<UiUpdate> {
        let mut updates = Vec::new();
        let mut pending: VecDeque<Command> = self.flow.handle(event).into();

        while let Some(command) = pending.pop_front() {
            match command {
                Command::Render(view) => updates.push(UiUpdate::Render(view)),
                Command::Notify(notice) => updates.push(UiUpdate::Notify(notice)),
                Command::CheckStatus(guest_id) => {
                    let found = self.service.check(&guest_id).await;
                    pending.extend(self.flow.handle(UiEvent::StatusResolved(found)));
                }
                Command::Submit(submission) => {
                    let outcome = self
                        .service
                        .submit(
                            &submission.guest_id,
                            &submission.guest_name,
                            &submission.response,
                        )
                        .await;

                    let event = match outcome {
                        Ok(ack) => {
                            info!(
                                guest_id = %submission.guest_id,
                                response = %submission.response.kind(),
                                uid = ?ack.uid,
                                "RSVP submitted: {}",
                                ack.message
                            );
                            UiEvent::SubmitSucceeded(submission.response)
                        }
                        Err(e) => {
                            error!(guest_id = %submission.guest_id, error = %e, "Error submitting RSVP");
                            UiEvent::SubmitFailed(e.user_message())
                        }
                    };
                    pending.extend(self.flow.handle(event));
                }
            }
        }

        updates
    }
}
