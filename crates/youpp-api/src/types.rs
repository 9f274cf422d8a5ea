// Wire types for the youpp backend.
//
// Sections travel as raw JSON values here; `youpp-core` validates them
// into its typed section model. Field names follow the backend's
// camelCase convention.

use serde::{Deserialize, Serialize};

/// `POST /api/auth/login` request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /api/auth/login` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// `{ sections: [...] }`, with both levels optional on the way in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentResponse {
    #[serde(default)]
    pub sections: Option<Vec<serde_json::Value>>,
}

/// A site as returned by `GET /api/sites` and `POST /api/sites`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// `"draft"`, `"published"`, or absent. Unknown values are kept verbatim.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub content: Option<ContentResponse>,
}

/// `POST /api/sites` request body.
#[derive(Debug, Serialize)]
pub struct CreateSiteRequest<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

/// `PUT /api/sites/{id}/content` request body.
#[derive(Debug, Serialize)]
pub struct SaveContentRequest<'a, S: Serialize> {
    pub content: SaveContentBody<'a, S>,
}

#[derive(Debug, Serialize)]
pub struct SaveContentBody<'a, S: Serialize> {
    pub sections: &'a [S],
}

/// `GET /s/{slug}` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicSiteResponse {
    pub slug: String,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub content: Option<ContentResponse>,
}
