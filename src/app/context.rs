use crate::domain::model::AppConfig;
use crate::ports::{http::UserApi, repo::Repo};

/// Bundles the runtime dependencies the pipeline needs (configuration,
/// persistence, and the user-source client).
pub struct AppContext<R, H>
where
    R: Repo,
    H: UserApi,
{
    pub cfg: AppConfig,
    pub repo: R,
    pub http: H,
}
