use reqwest::blocking::{Request, Response};

/// Executes a fully built request. Implementations may decorate the request
/// (see [`UrlParam`](super::auth::UrlParam)) before handing it on.
pub trait HttpClient: Send + Sync {
    fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
