use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    credential::entities::UserToken,
    search::{entities::SearchResults, value_objects::FilterSpec},
};

pub trait SearchService: Send + Sync {
    /// Translate the filter and run a single upstream search.
    fn search_files(
        &self,
        user_token: Option<UserToken>,
        filter: FilterSpec,
    ) -> impl Future<Output = Result<SearchResults, CoreError>> + Send;
}
