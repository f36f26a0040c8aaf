use anyhow::Result;
use uuid::Uuid;

use crate::models::incident::{Incident, Location};
use crate::models::presence::MemberPresence;

/// Typed HTTP client for the coordination service. One instance is shared
/// by all polling views; each view still issues its own independent fetches.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn active_incidents(&self) -> Result<Vec<Incident>> {
        let incidents = self
            .http
            .get(format!("{}/incidents/active", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(incidents)
    }

    pub async fn family_presence(
        &self,
        family_id: Uuid,
        viewer_id: &str,
    ) -> Result<Vec<MemberPresence>> {
        let members = self
            .http
            .get(format!("{}/families/{}/presence", self.base_url, family_id))
            .query(&[("viewerId", viewer_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(members)
    }

    pub async fn report_location(&self, person_id: &str, location: Location) -> Result<()> {
        self.http
            .post(format!("{}/presence/location", self.base_url))
            .json(&serde_json::json!({
                "personId": person_id,
                "lat": location.lat,
                "lng": location.lng,
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Confirm-then-update: the caller's view of the incident list only
    /// changes once a later poll observes the resolution on the server, so a
    /// failed resolve can never strand the client ahead of server truth.
    pub async fn resolve_incident(&self, id: Uuid) -> Result<Incident> {
        let incident = self
            .http
            .post(format!("{}/incidents/{}/resolve", self.base_url, id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(incident)
    }
}
