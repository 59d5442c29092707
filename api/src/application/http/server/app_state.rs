use std::sync::Arc;
use std::time::Duration;

use boxportal_core::application::PortalService;

use crate::{application::auth::SessionStore, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: PortalService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: PortalService) -> Self {
        let sessions = SessionStore::new(
            service.clock(),
            Duration::from_secs(args.session.ttl_secs),
        );

        Self {
            args,
            service,
            sessions,
        }
    }
}
