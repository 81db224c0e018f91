use serde::Deserialize;
use serde::Serialize;

/// An article as returned by `GET /posts`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub title: String,
    pub body: String,
}
