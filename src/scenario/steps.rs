//! Journey steps
//!
//! Each step issues exactly one request and asserts on the response. Any
//! mismatch comes back as an error naming the step; callers treat every
//! error as the end of the run.

use serde::Serialize;

use crate::client::{ApiResponse, AuthClient};
use crate::common::{Error, Result};

/// Opaque bearer credential issued by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One-time credential authorizing a password change
///
/// Not `Clone`: `update_password` consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Every step the runner can record, in journey order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Register,
    LoginWrongPassword,
    ProfileUnauthenticated,
    Login,
    ProfileAuthenticated,
    Logout,
    ResetPasswordToken,
    UpdatePassword,
    LoginNewPassword,
    // Boundary checks
    ProfileAfterLogout,
    LoginOldPassword,
    DuplicateRegistration,
}

impl Step {
    /// Name used as the prefix of assertion messages
    pub fn label(self) -> &'static str {
        match self {
            Step::Register => "Register",
            Step::LoginWrongPassword => "Login with wrong password",
            Step::ProfileUnauthenticated => "Profile (unlogged)",
            Step::Login => "Login",
            Step::ProfileAuthenticated => "Profile (logged)",
            Step::Logout => "Logout",
            Step::ResetPasswordToken => "Reset password token",
            Step::UpdatePassword => "Update password",
            Step::LoginNewPassword => "Login with new password",
            Step::ProfileAfterLogout => "Profile (after logout)",
            Step::LoginOldPassword => "Login with old password",
            Step::DuplicateRegistration => "Duplicate register",
        }
    }

    /// Line printed when the step passes
    pub fn confirmation(self) -> &'static str {
        match self {
            Step::Register => "User registered successfully.",
            Step::LoginWrongPassword => "Login with wrong password failed as expected.",
            Step::ProfileUnauthenticated => "Profile (unlogged) failed as expected.",
            Step::Login => "Logged in successfully.",
            Step::ProfileAuthenticated => "Profile (logged) retrieved successfully.",
            Step::Logout => "Logged out successfully.",
            Step::ResetPasswordToken => "Reset password token retrieved successfully.",
            Step::UpdatePassword => "Password updated successfully.",
            Step::LoginNewPassword => "Logged in with new password successfully.",
            Step::ProfileAfterLogout => "Profile with logged-out session failed as expected.",
            Step::LoginOldPassword => "Login with old password failed as expected.",
            Step::DuplicateRegistration => "Duplicate registration rejected as expected.",
        }
    }
}

/// `POST /register`, expecting 201
pub async fn register(client: &AuthClient, email: &str, password: &str) -> Result<()> {
    let response = client.register(email, password).await?;
    expect_status(Step::Register, &response, 201)
}

/// `POST /login` with credentials the service must reject, expecting 401
pub async fn login_expecting_failure(
    client: &AuthClient,
    email: &str,
    password: &str,
) -> Result<()> {
    let response = client.login(email, password).await?;
    expect_status(Step::LoginWrongPassword, &response, 401)
}

/// `POST /login`, expecting 200 and a non-empty `session_id`
///
/// `step` names the login in failure messages, since the journey logs in
/// both before and after the password reset.
pub async fn login(
    client: &AuthClient,
    step: Step,
    email: &str,
    password: &str,
) -> Result<SessionId> {
    let response = client.login(email, password).await?;
    expect_status(step, &response, 200)?;
    required_field(step, &response, "session_id").map(SessionId)
}

/// `GET /profile` with no credentials, expecting 401
pub async fn profile_unauthenticated(client: &AuthClient) -> Result<()> {
    let response = client.profile(None).await?;
    expect_status(Step::ProfileUnauthenticated, &response, 401)
}

/// `GET /profile` with the session as bearer, expecting 200
pub async fn profile_authenticated(client: &AuthClient, session_id: &SessionId) -> Result<()> {
    let response = client.profile(Some(session_id.as_str())).await?;
    expect_status(Step::ProfileAuthenticated, &response, 200)
}

/// `GET /logout` with the session as bearer, expecting 200
pub async fn logout(client: &AuthClient, session_id: &SessionId) -> Result<()> {
    let response = client.logout(session_id.as_str()).await?;
    expect_status(Step::Logout, &response, 200)
}

/// `POST /reset_password`, expecting 200 and a non-empty `reset_token`
pub async fn request_password_reset(client: &AuthClient, email: &str) -> Result<ResetToken> {
    let response = client.reset_password(email).await?;
    expect_status(Step::ResetPasswordToken, &response, 200)?;
    required_field(Step::ResetPasswordToken, &response, "reset_token").map(ResetToken)
}

/// `PUT /update_password`, expecting 200
pub async fn update_password(
    client: &AuthClient,
    email: &str,
    reset_token: ResetToken,
    new_password: &str,
) -> Result<()> {
    let response = client
        .update_password(email, reset_token.as_str(), new_password)
        .await?;
    expect_status(Step::UpdatePassword, &response, 200)
}

pub(crate) fn expect_status(step: Step, response: &ApiResponse, expected: u16) -> Result<()> {
    if response.status != expected {
        return Err(Error::unexpected_status(
            step.label(),
            expected,
            response.status,
        ));
    }
    Ok(())
}

fn required_field(step: Step, response: &ApiResponse, field: &str) -> Result<String> {
    response
        .field(field)
        .map(str::to_string)
        .ok_or_else(|| Error::missing_field(step.label(), field))
}
