use serde::Deserialize;
use serde::Serialize;

/// A reply attached to a [`Post`](super::Post), as returned by `GET /posts/{id}/comments`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub body: String,
}
