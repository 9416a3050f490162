//! Recording fakes for the backend and the identity provider.

use std::cell::RefCell;

use api::{ApiError, AuthError, Credentials, Identity, IdentityProvider, UserRecord, UserRecordApi};
use serde_json::Value;

/// Backend double that records every call.
pub struct FakeRecords {
    pub fetch_reply: Result<Value, ApiError>,
    pub update_reply: Result<Value, ApiError>,
    pub fetches: RefCell<Vec<Credentials>>,
    pub updates: RefCell<Vec<(Credentials, Value)>>,
}

impl FakeRecords {
    pub fn returning(record: Value) -> Self {
        Self {
            fetch_reply: Ok(record),
            update_reply: Ok(serde_json::json!({ "ok": true })),
            fetches: RefCell::new(Vec::new()),
            updates: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        let err = ApiError::Unauthorized {
            status,
            body: String::new(),
        };
        Self {
            fetch_reply: Err(err.clone()),
            update_reply: Err(err),
            ..Self::returning(Value::Null)
        }
    }
}

impl UserRecordApi for FakeRecords {
    async fn fetch_user_data(&self, credentials: &Credentials) -> Result<UserRecord, ApiError> {
        self.fetches.borrow_mut().push(credentials.clone());
        let value = self.fetch_reply.clone()?;
        UserRecord::try_from(value).map_err(|v| ApiError::Decode(v.to_string()))
    }

    async fn update_user_data(
        &self,
        credentials: &Credentials,
        data: Value,
    ) -> Result<Value, ApiError> {
        self.updates.borrow_mut().push((credentials.clone(), data));
        self.update_reply.clone()
    }
}

/// Identity provider double.
pub struct FakeProvider {
    pub sign_in_reply: Result<Identity, AuthError>,
    pub sign_out_reply: Result<(), AuthError>,
    pub revoked: RefCell<Vec<String>>,
}

impl FakeProvider {
    pub fn signing_in_as(uid: &str, name: Option<&str>) -> Self {
        Self {
            sign_in_reply: Ok(Identity {
                uid: uid.to_string(),
                display_name: name.map(str::to_string),
                email: Some(format!("{}@example.com", uid)),
                token: format!("token-{}", uid),
            }),
            sign_out_reply: Ok(()),
            revoked: RefCell::new(Vec::new()),
        }
    }
}

impl IdentityProvider for FakeProvider {
    async fn sign_in(&self) -> Result<Identity, AuthError> {
        self.sign_in_reply.clone()
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthError> {
        self.revoked.borrow_mut().push(token.to_string());
        self.sign_out_reply.clone()
    }
}
