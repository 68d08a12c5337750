use crate::bridge::browser::{BrowserHost, PageHandle, QueryInjector};
use crate::bridge::dispatcher::QueryDispatcher;
use crate::bridge::installer::PageBridgeInstaller;
use crate::build::{BackgroundExecutor, BuildCollaborators, BuildOrchestrator};

use std::sync::Arc;

use log::info;

/// One project's build bridge: orchestrator plus the browser-facing handlers.
#[derive(Clone)]
pub struct BuildConnector {
    orchestrator: BuildOrchestrator,
    dispatcher: QueryDispatcher,
}

impl BuildConnector {
    pub fn new(collaborators: BuildCollaborators, executor: Arc<dyn BackgroundExecutor>) -> Self {
        let orchestrator = BuildOrchestrator::new(collaborators, executor);
        let dispatcher = QueryDispatcher::new(orchestrator.clone());
        Self {
            orchestrator,
            dispatcher,
        }
    }

    pub fn orchestrator(&self) -> &BuildOrchestrator {
        &self.orchestrator
    }

    pub fn dispatcher(&self) -> &QueryDispatcher {
        &self.dispatcher
    }

    /// Register the query handler and the load-end installer with `browser`.
    pub fn initialize_handlers(&self, browser: &dyn BrowserHost, injector: Arc<dyn QueryInjector>) {
        let dispatcher = self.dispatcher.clone();
        browser.add_query_handler(Box::new(move |raw: &str| dispatcher.on_inbound_query(raw)));

        let installer = PageBridgeInstaller::new(injector);
        browser.add_load_handler(Box::new(move |page: &dyn PageHandle| installer.install(page)));

        info!("Build bridge handlers registered");
    }
}
