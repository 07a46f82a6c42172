//! The backend client: auth, rows and storage over HTTP.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use simroam_auth::{
    AuthError, AuthGateway, DirectoryGateway, GatewayError, Profile, ProfileUpdate, Role,
    Session, SessionEvent, SignUpOutcome, SignUpRequest, StorageRef,
};
use simroam_billing::{Purchase, PurchaseRequest};
use simroam_catalog::{Country, DeviceCompatibility, EsimProduct};
use simroam_core::UserId;

use crate::config::ClientConfig;
use crate::wire::{WireErrorBody, WireSession, WireSignUp};

const KYC_BUCKET: &str = "kyc-documents";

/// One `user_roles` row, as the admin listing consumes it.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRoleRow {
    pub user_id: UserId,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RoleRow {
    role: String,
}

/// HTTP client for the hosted backend.
///
/// Owns the in-memory session token cell and the session-change channel the
/// resolver subscribes to. Session state is only persisted for the process
/// lifetime, matching what the hosted service's own client library would
/// keep in storage.
pub struct PlatformClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl PlatformClient {
    pub fn new(config: ClientConfig) -> Arc<Self> {
        let (events, _) = broadcast::channel(32);
        Arc::new(Self {
            http: reqwest::Client::new(),
            config,
            session: RwLock::new(None),
            events,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn bearer(&self) -> String {
        self.session
            .read()
            .expect("session cell poisoned")
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn store_session(&self, session: Option<Session>) {
        *self.session.write().expect("session cell poisoned") = session;
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine (e.g. before the resolver starts).
        let _ = self.events.send(event);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Error mapping
    // ─────────────────────────────────────────────────────────────────────

    async fn auth_failure(resp: reqwest::Response) -> AuthError {
        let status = resp.status().as_u16();
        let raw = resp.text().await.unwrap_or_default();
        let body: WireErrorBody = serde_json::from_str(&raw).unwrap_or_default();
        body.into_auth_error(status, &raw)
    }

    async fn rest_failure(resp: reqwest::Response) -> GatewayError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        GatewayError::Status { status, body }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Row helpers (PostgREST conventions)
    // ─────────────────────────────────────────────────────────────────────

    async fn get_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, GatewayError> {
        let resp = self
            .http
            .get(self.url(path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::rest_failure(resp).await);
        }
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::decode(e.to_string()))
    }

    async fn write_rows<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<Vec<T>, GatewayError> {
        let resp = self
            .http
            .request(method, self.url(path))
            .header("apikey", &self.config.anon_key)
            // Return the written row so reads stay backend-authoritative.
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer())
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::rest_failure(resp).await);
        }
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| GatewayError::decode(e.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog / billing listings
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_countries(&self) -> Result<Vec<Country>, GatewayError> {
        self.get_rows("/rest/v1/countries?select=*&order=name.asc")
            .await
    }

    pub async fn list_products(&self) -> Result<Vec<EsimProduct>, GatewayError> {
        self.get_rows("/rest/v1/esim_products?select=*").await
    }

    pub async fn list_device_compatibility(
        &self,
    ) -> Result<Vec<DeviceCompatibility>, GatewayError> {
        self.get_rows("/rest/v1/device_compatibility?select=*")
            .await
    }

    pub async fn purchases_for(&self, user_id: UserId) -> Result<Vec<Purchase>, GatewayError> {
        self.get_rows(&format!(
            "/rest/v1/purchases?user_id=eq.{user_id}&select=*&order=created_at.desc"
        ))
        .await
    }

    pub async fn insert_purchase(
        &self,
        request: &PurchaseRequest,
    ) -> Result<Purchase, GatewayError> {
        let rows: Vec<Purchase> = self
            .write_rows(reqwest::Method::POST, "/rest/v1/purchases", request)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::decode("insert returned no representation"))
    }

    // Admin listings; the backend enforces row-level access, the app layer
    // additionally gates these behind the admin role.

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        self.get_rows("/rest/v1/profiles?select=*&order=created_at.desc")
            .await
    }

    pub async fn list_role_assignments(&self) -> Result<Vec<UserRoleRow>, GatewayError> {
        self.get_rows("/rest/v1/user_roles?select=user_id,role").await
    }

    pub async fn list_all_purchases(&self) -> Result<Vec<Purchase>, GatewayError> {
        self.get_rows("/rest/v1/purchases?select=*&order=created_at.desc")
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token refresh
    // ─────────────────────────────────────────────────────────────────────

    /// Keep the session token fresh in the background.
    ///
    /// Refreshes shortly before expiry and emits `TokenRefreshed` for the
    /// same identity; a rejected refresh means the session was revoked, which
    /// surfaces as a `SignedOut` notification.
    pub fn spawn_token_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let client = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let due = {
                    let session = client.session.read().expect("session cell poisoned");
                    session.as_ref().and_then(|s| {
                        Some((s.refresh_token.clone()?, s.expires_at?))
                    })
                };

                let Some((refresh_token, expires_at)) = due else {
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    continue;
                };

                let lead = expires_at - chrono::Duration::seconds(60);
                let wait = (lead - Utc::now())
                    .to_std()
                    .unwrap_or(std::time::Duration::ZERO);
                tokio::time::sleep(wait).await;

                // The session may have changed while we slept.
                let still_current = client
                    .session
                    .read()
                    .expect("session cell poisoned")
                    .as_ref()
                    .and_then(|s| s.refresh_token.as_deref().map(|t| t == refresh_token))
                    .unwrap_or(false);
                if !still_current {
                    continue;
                }

                match client.refresh(&refresh_token).await {
                    Ok(session) => {
                        client.store_session(Some(session.clone()));
                        client.emit(SessionEvent::token_refreshed(session));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "token refresh rejected; session revoked");
                        client.store_session(None);
                        client.emit(SessionEvent::signed_out());
                    }
                }
            }
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/v1/token?grant_type=refresh_token"))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AuthError::message_only(format!("network error: {e}")))?;

        if !resp.status().is_success() {
            return Err(Self::auth_failure(resp).await);
        }
        let wire: WireSession = resp
            .json()
            .await
            .map_err(|e| AuthError::message_only(format!("malformed token response: {e}")))?;
        Ok(wire.into_session(Utc::now()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AuthGateway
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AuthGateway for PlatformClient {
    async fn current_session(&self) -> Result<Option<Session>, GatewayError> {
        Ok(self.session.read().expect("session cell poisoned").clone())
    }

    fn subscribe_session_changes(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let body = serde_json::json!({
            "email": request.email,
            "password": request.password,
            "data": {
                "full_name": request.full_name,
                "phone_number": request.phone_number,
            }
        });

        let resp = self
            .http
            .post(self.url("/auth/v1/signup"))
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::message_only(format!("network error: {e}")))?;

        if !resp.status().is_success() {
            return Err(Self::auth_failure(resp).await);
        }

        let wire: WireSignUp = resp
            .json()
            .await
            .map_err(|e| AuthError::message_only(format!("malformed signup response: {e}")))?;

        match wire {
            WireSignUp::WithSession(wire) => {
                let session = wire.into_session(Utc::now());
                self.store_session(Some(session.clone()));
                self.emit(SessionEvent::signed_in(session.clone()));
                Ok(SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            WireSignUp::UserOnly(user) => Ok(SignUpOutcome {
                user: user.into(),
                session: None,
            }),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/v1/token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::message_only(format!("network error: {e}")))?;

        if !resp.status().is_success() {
            return Err(Self::auth_failure(resp).await);
        }

        let wire: WireSession = resp
            .json()
            .await
            .map_err(|e| AuthError::message_only(format!("malformed token response: {e}")))?;
        let session = wire.into_session(Utc::now());
        self.store_session(Some(session.clone()));
        self.emit(SessionEvent::signed_in(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| AuthError::message_only(format!("network error: {e}")))?;

        if !resp.status().is_success() {
            return Err(Self::auth_failure(resp).await);
        }

        self.store_session(None);
        self.emit(SessionEvent::signed_out());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DirectoryGateway
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl DirectoryGateway for PlatformClient {
    async fn profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError> {
        // An empty result set is a legitimate "no profile yet", not an error.
        let rows: Vec<Profile> = self
            .get_rows(&format!("/rest/v1/profiles?user_id=eq.{user_id}&select=*"))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        updates: ProfileUpdate,
    ) -> Result<Profile, GatewayError> {
        let rows: Vec<Profile> = self
            .write_rows(
                reqwest::Method::PATCH,
                &format!("/rest/v1/profiles?user_id=eq.{user_id}"),
                &updates,
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::Status {
                status: 404,
                body: "no profile row for the current identity".to_string(),
            })
    }

    async fn role_assignments(&self, user_id: UserId) -> Result<Vec<Role>, GatewayError> {
        let rows: Vec<RoleRow> = self
            .get_rows(&format!(
                "/rest/v1/user_roles?user_id=eq.{user_id}&select=role"
            ))
            .await?;
        Ok(rows.into_iter().map(|r| Role::new(r.role)).collect())
    }

    async fn upload_document(
        &self,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<StorageRef, GatewayError> {
        let resp = self
            .http
            .post(self.url(&format!("/storage/v1/object/{KYC_BUCKET}/{path}")))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
            .body(bytes)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::rest_failure(resp).await);
        }
        Ok(StorageRef {
            bucket: KYC_BUCKET.to_string(),
            path: path.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postgrest_profile_rows_decode() {
        let user_id = uuid::Uuid::now_v7();
        let body = serde_json::json!([{
            "id": uuid::Uuid::now_v7(),
            "user_id": user_id,
            "full_name": "Amina Odhiambo",
            "kyc_status": "pending",
            "service_number": "254700123456",
            "wallet_balance": 1500,
            "nationality": "Kenyan",
            "id_number": null,
            "phone_number": "+254700123456",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": null
        }]);

        let rows: Vec<Profile> = serde_json::from_value(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name.as_deref(), Some("Amina Odhiambo"));
        assert_eq!(rows[0].kyc(), simroam_core::KycStatus::Pending);
        assert_eq!(rows[0].wallet_balance, Some(1500));
    }

    #[test]
    fn role_rows_decode_into_labels() {
        let body = serde_json::json!([{ "role": "admin" }, { "role": "user" }]);
        let rows: Vec<RoleRow> = serde_json::from_value(body).unwrap();
        let roles: Vec<Role> = rows.into_iter().map(|r| Role::new(r.role)).collect();
        assert!(roles.iter().any(|r| r.as_str() == "admin"));
    }

    #[test]
    fn anon_key_is_the_bearer_before_sign_in() {
        let client = PlatformClient::new(ClientConfig::new("http://x", "anon-key"));
        assert_eq!(client.bearer(), "anon-key");
    }
}
