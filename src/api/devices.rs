//! Devices service for push notification registration.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::Device;
use crate::options::{compile_query, RequestOption};
use crate::Result;

use super::require;

/// Service for device operations.
///
/// # Example
///
/// ```no_run
/// use stream_chat::models::{Device, PushProvider};
///
/// # async fn example(client: stream_chat::ChatClient) -> stream_chat::Result<()> {
/// let device = Device::new("apns-token", "jane", PushProvider::Apn);
/// client.devices().add(&device).await?;
///
/// for device in client.devices().list("jane").await? {
///     println!("{} via {}", device.id, device.push_provider);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DevicesService {
    inner: Arc<ClientInner>,
}

impl DevicesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the devices registered for a user.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Device>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            devices: Vec<Device>,
        }

        require(user_id, "user ID")?;

        let query = compile_query([RequestOption::user_id(user_id)]);
        let response: Response = self.inner.get("devices", &query).await?;
        Ok(response.devices)
    }

    /// Register a device for a user.
    pub async fn add(&self, device: &Device) -> Result<()> {
        require(&device.id, "device ID")?;
        require(&device.user_id, "user ID")?;

        self.inner.post_empty("devices", device).await
    }

    /// Remove a user's device.
    pub async fn delete(&self, user_id: &str, device_id: &str) -> Result<()> {
        require(user_id, "user ID")?;
        require(device_id, "device ID")?;

        let query = compile_query([
            RequestOption::id(device_id),
            RequestOption::user_id(user_id),
        ]);
        self.inner.delete_empty("devices", &query).await
    }
}
