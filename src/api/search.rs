//! Web and content search endpoints (`search/v1`)

use chrono::{DateTime, Utc};

use super::client::LexvaultClient;
use crate::error::Result;
use crate::model::ApiEnum;

crate::wire_enum! {
    pub enum SearchType {
        Auto => "auto",
        Neural => "neural",
        Keyword => "keyword",
    }
}

crate::api_model! {
    pub struct SearchResult => SearchResultBuilder {
        required title: String = "title";
        required url: String = "url";
        optional score: f64 = "score";
        nullable published_date: DateTime<Utc> = "publishedDate";
        nullable author: String = "author";
        optional text: String = "text";
        optional highlights: Vec<String> = "highlights";
    }
}

crate::api_model! {
    pub struct SearchResponse => SearchResponseBuilder {
        required results: Vec<SearchResult> = "results";
        optional request_id: String = "requestId";
        optional resolved_search_type: ApiEnum<SearchType> = "resolvedSearchType";
    }
}

crate::api_model! {
    pub struct ContentResult => ContentResultBuilder {
        required url: String = "url";
        optional title: String = "title";
        /// Extracted text; `null` when extraction failed
        nullable text: String = "text";
        optional summary: String = "summary";
    }
}

crate::api_model! {
    pub struct ContentsResponse => ContentsResponseBuilder {
        required results: Vec<ContentResult> = "results";
        optional request_id: String = "requestId";
    }
}

crate::api_params! {
    /// Search the web for pages matching a query
    pub struct SearchParams => SearchParamsBuilder {
        method: POST,
        service: Search,
        path: ["search"],
        path_params: (),
        response: SearchResponse,
        fields {
            body required query: String = "query";
            body optional search_type: ApiEnum<SearchType> = "type";
            body optional num_results: u32 = "numResults";
            body optional include_domains: Vec<String> = "includeDomains";
            body optional exclude_domains: Vec<String> = "excludeDomains";
            body optional start_published_date: DateTime<Utc> = "startPublishedDate";
            body optional end_published_date: DateTime<Utc> = "endPublishedDate";
            body optional include_text: bool = "includeText";
        }
    }
}

crate::api_params! {
    /// Fetch extracted contents for known URLs
    pub struct ContentsParams => ContentsParamsBuilder {
        method: POST,
        service: Search,
        path: ["contents"],
        path_params: (),
        response: ContentsResponse,
        fields {
            body required urls: Vec<String> = "urls";
            body optional summary: bool = "summary";
            body optional max_characters: u32 = "maxCharacters";
        }
    }
}

pub struct SearchService<'a> {
    client: &'a LexvaultClient,
}

impl<'a> SearchService<'a> {
    pub(crate) fn new(client: &'a LexvaultClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.client.execute(params).await
    }

    pub async fn contents(&self, params: &ContentsParams) -> Result<ContentsResponse> {
        self.client.execute(params).await
    }
}
