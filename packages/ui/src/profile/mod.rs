//! # Profile view model
//!
//! [`ProfileModel`] is the whole profile page minus the rendering: it decides
//! when to fetch, turns the fetched record into a field list and an edit
//! buffer, and turns the buffer back into an update.
//!
//! ## Phases
//!
//! ```text
//! Unauthenticated ──begin_load──▶ Loading ──finish_load──▶ Ready
//!                                                   ▲        │
//!                                     finish_submit │        │ begin_submit
//!                                                   └─ Submitting
//! ```
//!
//! Failures never leave the model in `Loading` or `Submitting`: the error goes
//! into [`UiStatus`], `loading` drops back to `false` and the phase returns to
//! `Ready`.
//!
//! ## Split operations
//!
//! Every network step is a synchronous `begin_*` (mutate, return what to send)
//! and `finish_*` (apply the answer). The Dioxus view drives these around its
//! own `spawn`ed requests so no signal borrow is held across an `await`;
//! [`ProfileModel::load`] and [`ProfileModel::submit`] chain them against any
//! [`UserRecordApi`] for callers that own the model outright.

pub mod fields;

use api::{
    parse_date, ApiError, Credentials, EditBuffer, FieldSchema, Session, UserRecord, UserRecordApi,
};
use serde_json::Value;

use crate::status::{SuccessTicket, UiStatus};
use fields::FieldControl;

/// Where the page is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Unauthenticated,
    Loading,
    Ready,
    Submitting,
}

/// What the caller must do after [`ProfileModel::begin_load`].
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStep {
    /// No session: leave for the login page, do not fetch.
    RedirectToLogin,
    /// Nothing to fetch (same identity already loaded, or unusable credentials).
    Unchanged,
    /// Fetch the record with these credentials, then call `finish_load`.
    Fetch(Credentials),
}

/// An update to send, produced by [`ProfileModel::begin_submit`].
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitRequest {
    pub credentials: Credentials,
    pub payload: Value,
}

/// State behind the profile page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileModel {
    phase: Phase,
    pub status: UiStatus,
    record: Option<UserRecord>,
    schema: FieldSchema,
    declared_schema: Option<FieldSchema>,
    buffer: EditBuffer,
    loaded_for: Option<String>,
    session_name: Option<String>,
}

impl ProfileModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render this schema instead of deriving one from the record's keys.
    pub fn with_schema(mut self, schema: FieldSchema) -> Self {
        self.declared_schema = Some(schema);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn record(&self) -> Option<&UserRecord> {
        self.record.as_ref()
    }

    /// Form controls for the current schema and buffer.
    pub fn controls(&self) -> Vec<FieldControl> {
        fields::controls(&self.schema, &self.buffer, self.record.as_ref())
    }

    /// Submit is allowed with a session and nothing in flight.
    pub fn can_submit(&self, session_present: bool) -> bool {
        session_present && !self.status.loading
    }

    /// Start loading for `session`, once per identity.
    pub fn begin_load(&mut self, session: Option<&Session>) -> LoadStep {
        let Some(session) = session else {
            self.phase = Phase::Unauthenticated;
            self.loaded_for = None;
            return LoadStep::RedirectToLogin;
        };

        if self.loaded_for.as_deref() == Some(session.uid.as_str()) {
            return LoadStep::Unchanged;
        }
        // Nothing from the previous identity may leak into this one.
        self.record = None;
        self.schema = FieldSchema::default();
        self.buffer = EditBuffer {
            display_name: session.display_name.clone(),
            ..EditBuffer::default()
        };
        self.status.clear_error();
        self.loaded_for = Some(session.uid.clone());
        self.session_name = session.display_name.clone();

        match session.credentials() {
            Ok(credentials) => {
                self.phase = Phase::Loading;
                self.status.start();
                LoadStep::Fetch(credentials)
            }
            Err(e) => {
                self.phase = Phase::Ready;
                self.status.fail(e.to_string());
                LoadStep::Unchanged
            }
        }
    }

    /// Apply the fetch result for `user_id`.
    ///
    /// A result for an identity other than the one last passed to
    /// `begin_load` is dropped and `false` is returned.
    pub fn finish_load(&mut self, user_id: &str, result: Result<UserRecord, ApiError>) -> bool {
        if self.loaded_for.as_deref() != Some(user_id) {
            tracing::debug!("Dropping stale user data for {}", user_id);
            return false;
        }
        match result {
            Ok(record) => {
                self.schema = self
                    .declared_schema
                    .clone()
                    .unwrap_or_else(|| FieldSchema::infer(&record));
                self.buffer = EditBuffer::from_record(&record, self.session_name.as_deref());
                self.record = Some(record);
                self.status.settle();
            }
            Err(e) => self.status.fail(e.to_string()),
        }
        self.phase = Phase::Ready;
        true
    }

    pub fn set_display_name(&mut self, value: String) {
        self.buffer.display_name = Some(value);
    }

    /// Value from a date input: empty clears, an invalid date is ignored.
    pub fn set_birthdate_input(&mut self, value: &str) {
        if value.trim().is_empty() {
            self.buffer.birthdate = None;
        } else if let Some(date) = parse_date(value) {
            self.buffer.birthdate = Some(date);
        }
    }

    pub fn set_gender(&mut self, value: String) {
        self.buffer.gender = value;
    }

    /// Route a value typed into `control` to the matching buffer field.
    /// Read-only controls ignore input.
    pub fn apply_input(&mut self, control: &FieldControl, value: &str) {
        match control {
            FieldControl::Text { editable: true, .. } => self.set_display_name(value.to_string()),
            FieldControl::Text { .. } => {}
            FieldControl::Date { .. } => self.set_birthdate_input(value),
            FieldControl::Select { .. } => self.set_gender(value.to_string()),
        }
    }

    /// Start submitting the edit buffer.
    pub fn begin_submit(&mut self, session: Option<&Session>) -> Option<SubmitRequest> {
        let session = session.filter(|_| !self.status.loading)?;

        let credentials = match session.credentials() {
            Ok(c) => c,
            Err(e) => {
                self.status.fail(e.to_string());
                return None;
            }
        };

        self.phase = Phase::Submitting;
        self.status.start();
        Some(SubmitRequest {
            credentials,
            payload: self.buffer.to_payload(),
        })
    }

    /// Apply the update result; a success yields the ticket for its expiry.
    pub fn finish_submit(&mut self, result: Result<Value, ApiError>) -> Option<SuccessTicket> {
        self.phase = Phase::Ready;
        match result {
            Ok(_) => Some(self.status.succeed()),
            Err(e) => {
                self.status.fail(e.to_string());
                None
            }
        }
    }

    pub fn expire_success(&mut self, ticket: SuccessTicket) -> bool {
        self.status.expire(ticket)
    }

    /// `begin_load`, the fetch, and `finish_load` in one go.
    pub async fn load<A: UserRecordApi>(&mut self, session: Option<&Session>, api: &A) -> LoadStep {
        let step = self.begin_load(session);
        if let LoadStep::Fetch(credentials) = &step {
            let result = api.fetch_user_data(credentials).await;
            if let Err(e) = &result {
                tracing::error!("Fetching user data failed: {}", e);
            }
            self.finish_load(credentials.user_id(), result);
        }
        step
    }

    /// `begin_submit`, the update, and `finish_submit` in one go.
    pub async fn submit<A: UserRecordApi>(
        &mut self,
        session: Option<&Session>,
        api: &A,
    ) -> Option<SuccessTicket> {
        let request = self.begin_submit(session)?;
        let result = api
            .update_user_data(&request.credentials, request.payload)
            .await;
        if let Err(e) = &result {
            tracing::error!("Updating user data failed: {}", e);
        }
        self.finish_submit(result)
    }
}
