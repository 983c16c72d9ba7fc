//! Typed endpoint calls.

use serde_json::json;

use super::EdgeClient;
use crate::error::ApiResult;
use crate::models::{
    validate_rating, Account, Banner, Concert, EmailCampaign, Message, NewBanner, NewCampaign, NewConcert,
    NewMessage, NewPitchRequest, NewTicket, NewTrackSubmission, NewVideo, PitchRequest,
    PitchingPlatform, SupportTicket, TrackSubmission, Video,
};

impl EdgeClient {
    /// Signed-in profile, tier and coin balance.
    pub async fn fetch_account(&self) -> ApiResult<Account> {
        self.get("/profile").await
    }

    // =========================================================================
    // Concerts
    // =========================================================================

    pub async fn list_concerts(&self) -> ApiResult<Vec<Concert>> {
        self.get("/concerts").await
    }

    pub async fn create_concert(&self, concert: &NewConcert) -> ApiResult<Concert> {
        self.post("/concerts", concert).await
    }

    pub async fn update_concert(&self, id: &str, concert: &NewConcert) -> ApiResult<Concert> {
        self.put(&format!("/concerts/{}", id), concert).await
    }

    pub async fn delete_concert(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/concerts/{}", id)).await
    }

    // =========================================================================
    // Videos and track tests
    // =========================================================================

    pub async fn list_videos(&self) -> ApiResult<Vec<Video>> {
        self.get("/videos").await
    }

    pub async fn create_video(&self, video: &NewVideo) -> ApiResult<Video> {
        self.post("/videos", video).await
    }

    pub async fn create_track_test(&self, track: &NewTrackSubmission) -> ApiResult<TrackSubmission> {
        self.post("/track-tests", track).await
    }

    // =========================================================================
    // Banners
    // =========================================================================

    pub async fn list_banners(&self) -> ApiResult<Vec<Banner>> {
        self.get("/banners").await
    }

    pub async fn create_banner(&self, banner: &NewBanner) -> ApiResult<Banner> {
        self.post("/banners", banner).await
    }

    pub async fn approve_banner(&self, id: &str) -> ApiResult<()> {
        self.post_ack(&format!("/banners/{}/approve", id), &json!({})).await
    }

    pub async fn reject_banner(&self, id: &str, note: &str) -> ApiResult<()> {
        self.post_ack(&format!("/banners/{}/reject", id), &json!({ "note": note })).await
    }

    // =========================================================================
    // Support
    // =========================================================================

    pub async fn list_tickets(&self) -> ApiResult<Vec<SupportTicket>> {
        self.get("/tickets").await
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> ApiResult<SupportTicket> {
        self.post("/tickets", ticket).await
    }

    pub async fn send_message(&self, ticket_id: &str, message: &NewMessage) -> ApiResult<Message> {
        self.post(&format!("/tickets/{}/messages", ticket_id), message).await
    }

    /// Ratings outside 1..=5 are refused without a request.
    pub async fn rate_ticket(&self, ticket_id: &str, rating: u8) -> ApiResult<()> {
        let rating = validate_rating(rating)?;
        self.post_ack(&format!("/tickets/{}/rating", ticket_id), &json!({ "rating": rating })).await
    }

    // =========================================================================
    // Campaigns and pitching
    // =========================================================================

    pub async fn list_campaigns(&self) -> ApiResult<Vec<EmailCampaign>> {
        self.get("/campaigns").await
    }

    pub async fn create_campaign(&self, campaign: &NewCampaign) -> ApiResult<EmailCampaign> {
        self.post("/campaigns", campaign).await
    }

    pub async fn list_platforms(&self) -> ApiResult<Vec<PitchingPlatform>> {
        self.get("/pitching/platforms").await
    }

    pub async fn create_pitch(&self, request: &NewPitchRequest) -> ApiResult<PitchRequest> {
        self.post("/pitching/requests", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::error::{ApiError, ModelError};

    #[tokio::test]
    async fn test_rate_ticket_refuses_out_of_range_locally() {
        // Unroutable host: reaching the network would surface a transport error instead.
        let config = ApiConfig::new("abcd1234", "anon").unwrap().with_base_url("http://127.0.0.1:9");
        let client = EdgeClient::new(config);

        let err = client.rate_ticket("t-1", 6).await.unwrap_err();
        assert!(matches!(err, ApiError::Model(ModelError::InvalidRating(6))));
    }
}
