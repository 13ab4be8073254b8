//! Legal research endpoints (`legal/v1`)

use chrono::NaiveDate;

use super::client::LexvaultClient;
use crate::error::Result;
use crate::model::ApiEnum;

crate::wire_enum! {
    /// Kind of authority a candidate comes from
    pub enum AuthorityType {
        Case => "case",
        Statute => "statute",
        Regulation => "regulation",
        Secondary => "secondary",
    }
}

crate::wire_enum! {
    /// Outcome of checking a single citation
    pub enum CitationStatus {
        Verified => "verified",
        NotFound => "not_found",
        Ambiguous => "ambiguous",
    }
}

crate::api_model! {
    /// A source that may answer a research query
    pub struct Candidate => CandidateBuilder {
        /// Title of the authority
        required title: String = "title";
        /// Canonical URL
        required url: String = "url";
        /// Matching excerpt; `null` when the source has no text layer
        nullable snippet: String = "snippet";
        /// Court, legislature or publisher
        optional source: String = "source";
        optional authority_type: ApiEnum<AuthorityType> = "authorityType";
        optional jurisdiction: String = "jurisdiction";
        /// Decision or enactment date
        optional decided_on: NaiveDate = "decidedOn";
        optional relevance: f64 = "relevance";
    }
}

crate::api_model! {
    pub struct LegalFindResponse => LegalFindResponseBuilder {
        required candidates: Vec<Candidate> = "candidates";
        optional found: u32 = "found";
        optional request_id: String = "requestId";
    }
}

crate::api_model! {
    /// One citation extracted from the submitted text
    pub struct Citation => CitationBuilder {
        /// Citation as written, e.g. `347 U.S. 483`
        required citation: String = "citation";
        required status: ApiEnum<CitationStatus> = "status";
        nullable case_name: String = "caseName";
        optional url: String = "url";
        optional candidates: Vec<Candidate> = "candidates";
    }
}

crate::api_model! {
    pub struct LegalVerifyResponse => LegalVerifyResponseBuilder {
        required citations: Vec<Citation> = "citations";
        optional verified: u32 = "verified";
        optional not_found: u32 = "notFound";
    }
}

crate::api_params! {
    /// Find authorities relevant to a natural-language query
    pub struct LegalFindParams => LegalFindParamsBuilder {
        method: POST,
        service: Legal,
        path: ["find"],
        path_params: (),
        response: LegalFindResponse,
        fields {
            body required query: String = "query";
            /// Jurisdiction code such as `us-ca` or `us-fed`
            body optional jurisdiction: String = "jurisdiction";
            body optional authority_types: Vec<ApiEnum<AuthorityType>> = "authorityTypes";
            body optional num_results: u32 = "numResults";
        }
    }
}

crate::api_params! {
    /// Extract and check every citation in a passage
    pub struct LegalVerifyParams => LegalVerifyParamsBuilder {
        method: POST,
        service: Legal,
        path: ["verify"],
        path_params: (),
        response: LegalVerifyResponse,
        fields {
            body required text: String = "text";
            body optional include_candidates: bool = "includeCandidates";
        }
    }
}

pub struct LegalService<'a> {
    client: &'a LexvaultClient,
}

impl<'a> LegalService<'a> {
    pub(crate) fn new(client: &'a LexvaultClient) -> Self {
        Self { client }
    }

    pub async fn find(&self, params: &LegalFindParams) -> Result<LegalFindResponse> {
        self.client.execute(params).await
    }

    pub async fn verify(&self, params: &LegalVerifyParams) -> Result<LegalVerifyResponse> {
        self.client.execute(params).await
    }
}
