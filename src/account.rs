//! Account information.

use serde::Deserialize;

use crate::client::UpCloudClient;
use crate::error::UpCloudError;

/// Account summary: the authenticated username and remaining credits.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Account {
    /// Remaining credits in cents.
    pub credits: f64,
    /// Account username.
    pub username: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    account: Account,
}

impl UpCloudClient {
    /// Fetches the account summary for the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`UpCloudError::Transport`], [`UpCloudError::Api`], or
    /// [`UpCloudError::Parse`] depending on how the call failed.
    pub async fn get_account(&self) -> Result<Account, UpCloudError> {
        let response: AccountResponse = self.read("account").await?;
        Ok(response.account)
    }
}
