use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Implementations may wrap another client to
/// add headers or query parameters before delegating.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
