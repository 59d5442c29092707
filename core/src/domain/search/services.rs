use tracing::{info, instrument};

use crate::domain::{
    common::{clock::Clock, entities::app_errors::CoreError, services::Service},
    content::ports::ContentApiPort,
    credential::{
        entities::UserToken,
        ports::{AssertionSigner, CredentialService, OAuthPort},
        value_objects::CredentialRequirement,
    },
    search::{
        entities::SearchResults,
        ports::SearchService,
        translator::translate,
        value_objects::{FilterSpec, TranslationContext},
    },
};

impl<C, O, S> SearchService for Service<C, O, S>
where
    C: ContentApiPort,
    O: OAuthPort,
    S: AssertionSigner,
{
    #[instrument(skip(self, user_token, filter))]
    async fn search_files(
        &self,
        user_token: Option<UserToken>,
        filter: FilterSpec,
    ) -> Result<SearchResults, CoreError> {
        let token = self
            .resolve_credential(user_token, CredentialRequirement::UserOrServiceAccount)
            .await?;

        let ctx = TranslationContext {
            now: self.clock.now(),
            enterprise_id: self
                .config
                .service_account
                .enterprise_id()
                .map(str::to_string),
        };
        let query = translate(&filter, &ctx);

        let results = self.content_api.search(&token, &query).await?;
        info!(
            total_count = results.total_count,
            returned = results.entries.len(),
            "search completed"
        );

        Ok(results)
    }
}
