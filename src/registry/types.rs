use serde::Deserialize;

/// `GET /search/companies` response (only the fields we read)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub company_number: String,
}

/// `GET /company/{number}` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyProfile {
    #[serde(default)]
    pub company_status: Option<String>,
}
