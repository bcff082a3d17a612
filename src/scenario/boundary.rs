//! Boundary checks
//!
//! Assertions the journey implies but does not make: a logged-out session
//! stays dead, the replaced password stops working, and an email can only be
//! registered once. They run after the journey, never interleaved with it.

use crate::client::AuthClient;
use crate::common::{Error, Result};

use super::steps::{expect_status, SessionId, Step};

/// `GET /profile` with a session that was logged out, expecting 401
pub async fn profile_after_logout(client: &AuthClient, stale: &SessionId) -> Result<()> {
    let response = client.profile(Some(stale.as_str())).await?;
    expect_status(Step::ProfileAfterLogout, &response, 401)
}

/// `POST /login` with the password replaced by the reset, expecting 401
pub async fn login_old_password(
    client: &AuthClient,
    email: &str,
    old_password: &str,
) -> Result<()> {
    let response = client.login(email, old_password).await?;
    expect_status(Step::LoginOldPassword, &response, 401)
}

/// `POST /register` for an email that already exists
///
/// Services disagree on 400 vs 409, so anything but 201 passes.
pub async fn duplicate_registration(
    client: &AuthClient,
    email: &str,
    password: &str,
) -> Result<()> {
    let response = client.register(email, password).await?;
    if response.status == 201 {
        return Err(Error::unexpected_success(
            Step::DuplicateRegistration.label(),
            response.status,
        ));
    }
    Ok(())
}
