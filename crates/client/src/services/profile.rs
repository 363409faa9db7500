//! The signed-in admin's own profile.
//!
//! Profile endpoints answer with a bare profile, not an envelope. Every
//! successful call mirrors name, email and image into the session scope
//! that holds the token.

use reqwest::multipart::Form;
use voyage_core::models::{AdminProfile, ProfileUpdate};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::files::LocalFile;

#[derive(Debug, Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<AdminProfile, ApiError> {
        let profile: AdminProfile = self.api.get_json("/admin/profile").await?;
        self.api.session().store_profile(&profile)?;
        Ok(profile)
    }

    pub async fn update(&self, update: &ProfileUpdate) -> Result<AdminProfile, ApiError> {
        let profile: AdminProfile = self.api.put_json("/admin/profile", update).await?;
        self.api.session().store_profile(&profile)?;
        Ok(profile)
    }

    /// Replace the profile image (multipart field `file`).
    pub async fn upload_image(&self, file: &LocalFile) -> Result<AdminProfile, ApiError> {
        let form = Form::new().part("file", file.to_part()?);
        let profile: AdminProfile = self
            .api
            .post_multipart_json("/admin/profile/image", form)
            .await?;
        self.api.session().store_profile(&profile)?;
        Ok(profile)
    }
}
