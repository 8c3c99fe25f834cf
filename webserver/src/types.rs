//! Request and response payloads for the REST and WebSocket surface

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use engine::{Projection, VoteOp};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub id: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSundayRequest {
    pub user: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddFlexibleRequest {
    pub user: String,
    pub name: String,
    pub meal: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub user: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteResponse {
    pub op: VoteOp,
}

/// Identifies the acting viewer on reads and deletes
#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    pub user: String,
    pub date: Option<NaiveDate>,
}

/// Messages a live-view client may send over the socket
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SetViewDate { date: NaiveDate },
}

/// Messages pushed to a live-view client
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Projection { projection: Projection },
}
