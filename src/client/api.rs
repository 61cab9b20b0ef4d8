use crate::application::dto::{
    ContentDto, ContentPageDto, CounterDto, IssueDetailDto, IssueDto, LoginResponseDto,
    SearchResultsDto,
};
use crate::client::{
    error::{ClientError, ClientResult},
    resource::Resource,
};
use crate::domain::content::{ContentKind, Counter};
use reqwest::{Method, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// List filters understood by `/api/articles` and `/api/poems`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub issue_id: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl ContentQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("featured", featured.to_string()));
        }
        if let Some(issue_id) = self.issue_id {
            pairs.push(("issueId", issue_id.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| ClientError::Url(format!("{base_url}: {err}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::Url(format!("{path}: {err}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string(),
                });
            }
            Err(err) => return Err(ClientError::Decode(err.to_string())),
        };

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .error
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            });
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Decode("response has no data".into()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let url = self.url(path, query)?;
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn list_content(
        &self,
        kind: ContentKind,
        query: &ContentQuery,
    ) -> ClientResult<ContentPageDto> {
        self.get(&format!("/api/{}", kind.plural()), &query.pairs())
            .await
    }

    /// Fetches by numeric id or slug.
    pub async fn get_content(&self, kind: ContentKind, key: &str) -> ClientResult<ContentDto> {
        let url = self.url(&format!("/api/{}/", kind.plural()), &[])?;
        let mut url = url;
        url.path_segments_mut()
            .map_err(|()| ClientError::Url("base url cannot have a path".into()))?
            .pop_if_empty()
            .push(key);
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn list_issues(&self) -> ClientResult<Vec<IssueDto>> {
        self.get("/api/issues", &[]).await
    }

    pub async fn get_issue(&self, id: i64) -> ClientResult<IssueDetailDto> {
        self.get(&format!("/api/issues/{id}"), &[]).await
    }

    pub async fn search(&self, term: &str, limit: Option<u32>) -> ClientResult<SearchResultsDto> {
        let mut query = vec![("q", term.to_string())];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.get("/api/search", &query).await
    }

    pub async fn record(
        &self,
        kind: ContentKind,
        id: i64,
        counter: Counter,
    ) -> ClientResult<CounterDto> {
        let action = match counter {
            Counter::Views => "view",
            Counter::Likes => "like",
            Counter::Shares => "share",
        };
        let url = self.url(&format!("/api/{}/{id}/{action}", kind.plural()), &[])?;
        self.send(self.request(Method::POST, url)).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponseDto> {
        let url = self.url("/api/auth/login", &[])?;
        let builder = self
            .request(Method::POST, url)
            .json(&json!({ "email": email, "password": password }));
        self.send(builder).await
    }

    /// A list that reloads whenever its filters change.
    pub fn content_resource(
        &self,
        kind: ContentKind,
        query: ContentQuery,
    ) -> Resource<ContentQuery, ContentPageDto> {
        let client = self.clone();
        Resource::new(query, move |query: ContentQuery| {
            let client = client.clone();
            async move { client.list_content(kind, &query).await }
        })
    }

    pub fn issue_resource(&self, id: i64) -> Resource<i64, IssueDetailDto> {
        let client = self.clone();
        Resource::new(id, move |id: i64| {
            let client = client.clone();
            async move { client.get_issue(id).await }
        })
    }

    pub fn search_resource(&self, term: String) -> Resource<String, SearchResultsDto> {
        let client = self.clone();
        Resource::new(term, move |term: String| {
            let client = client.clone();
            async move { client.search(&term, None).await }
        })
    }
}
