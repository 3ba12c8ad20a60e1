//! IP 화이트리스트 관리 DTO

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IpManageRequest {
    pub manage_key: String,
    /// add | remove | list | count
    pub action: String,
    pub ip: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum IpManageResponse {
    Changed { ip: String, changed: bool },
    List { ips: Vec<String> },
    Count { count: u64 },
}
