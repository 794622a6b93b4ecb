//! Response bodies of the debug HTTP API.

use serde::Serialize;

use crate::domain::RoomSnapshot;

/// One entry of `GET /api/rooms`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
}

/// Body of `GET /api/rooms/{room_id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<String>,
}

impl From<RoomSnapshot> for RoomSummaryDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.id.into_string(),
            member_count: snapshot.members.len(),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.id.into_string(),
            members: snapshot
                .members
                .iter()
                .map(|member| member.to_string())
                .collect(),
        }
    }
}
