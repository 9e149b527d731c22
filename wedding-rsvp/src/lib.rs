//! wedding-rsvp library - guest side of the invitation RSVP flow
//!
//! The flow runs in four steps:
//! 1. [`guest`] resolves the guest identity from the invitation link
//! 2. [`client`] checks for a prior response (fail-open)
//! 3. [`flow`] waits for the guest to accept or decline
//! 4. [`client`] submits the answer and [`view`] renders the terminal view
//!
//! [`controller::RsvpController`] ties the pure state machine to a
//! [`client::RsvpService`] so the whole flow can be exercised without a page.

pub mod client;
pub mod controller;
pub mod error;
pub mod flow;
pub mod guest;
pub mod view;

pub use client::{RsvpClient, RsvpService};
pub use controller::{RsvpController, UiUpdate};
pub use error::RsvpError;
pub use flow::{Command, FlowState, RsvpFlow, Submission, UiEvent};
pub use guest::GuestIdentity;
pub use view::{Notice, TerminalView, View};
