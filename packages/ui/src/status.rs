//! # UI status and the success window
//!
//! [`UiStatus`] is the `{loading, error, success}` triple every async handler
//! writes to. A success flag is visible for [`SUCCESS_WINDOW`] and then clears
//! itself.
//!
//! Each success gets a [`SuccessTicket`]. The view spawns
//! [`success_window`] with that ticket and, when it resolves, hands it back to
//! [`UiStatus::expire`]. A newer success or a dismissal bumps the generation,
//! so an expiry that was not cancelled in time is a no-op. The view also
//! cancels the pending task itself when a new success arrives or when it is
//! torn down.

use std::time::Duration;

/// How long the success flag stays up.
pub const SUCCESS_WINDOW: Duration = Duration::from_millis(3000);

/// Identifies one success event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuccessTicket(u64);

/// Loading / error / success state shown by a view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
    generation: u64,
}

impl UiStatus {
    /// An operation started.
    pub fn start(&mut self) {
        self.loading = true;
    }

    /// An operation finished without anything to celebrate.
    pub fn settle(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// An operation failed.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// An operation succeeded; raise the success flag.
    pub fn succeed(&mut self) -> SuccessTicket {
        self.settle();
        self.success = true;
        self.generation += 1;
        SuccessTicket(self.generation)
    }

    /// Clear the success flag if `ticket` is still the latest success.
    pub fn expire(&mut self, ticket: SuccessTicket) -> bool {
        if self.success && ticket.0 == self.generation {
            self.success = false;
            true
        } else {
            false
        }
    }

    /// Drop the success flag now and invalidate outstanding tickets.
    pub fn dismiss_success(&mut self) {
        self.success = false;
        self.generation += 1;
    }
}

/// Resolves with `ticket` once [`SUCCESS_WINDOW`] has elapsed.
pub async fn success_window(ticket: SuccessTicket) -> SuccessTicket {
    tokio::time::sleep(SUCCESS_WINDOW).await;
    ticket
}
