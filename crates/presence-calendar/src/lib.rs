//! Google Calendar integration for Presence.
//!
//! Answers one question for the website: is there a confirmed meeting
//! happening right now, and is it a video meeting?

pub mod client;
pub mod error;
pub mod status;
pub mod types;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use status::current_meeting_state;
pub use types::CalendarState;
