use crate::CONNECTOR_GLOBAL;
use crate::bridge::browser::{PageHandle, QueryInjector};
use crate::codec::Operation;

use std::sync::Arc;

use log::debug;

/// Installs the connector namespace into freshly loaded pages.
#[derive(Clone)]
pub struct PageBridgeInstaller {
    injector: Arc<dyn QueryInjector>,
}

impl PageBridgeInstaller {
    pub fn new(injector: Arc<dyn QueryInjector>) -> Self {
        Self { injector }
    }

    /// Define the namespace in `page`, replacing whatever a previous load
    /// installed. Call once per load-end event.
    pub fn install(&self, page: &dyn PageHandle) {
        let url = page.url();
        debug!("Installing {CONNECTOR_GLOBAL} into {url}");
        page.execute_script(&bridge_script(self.injector.as_ref()), &url);
    }
}

/// Script assigning `window.orionBuildConnector` with one function per
/// operation. Each function joins its name and arguments with newlines and
/// passes the result to the injected query call.
pub fn bridge_script(injector: &dyn QueryInjector) -> String {
    let members = Operation::ALL
        .into_iter()
        .map(|operation| {
            format!(
                "    {name}: function({parameters}) {{\n        {body}\n    }}",
                name = operation.name(),
                parameters = operation.parameters().join(", "),
                body = injector.inject(&request_expression(operation)),
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!("{CONNECTOR_GLOBAL} = {{\n{members}\n}};")
}

/// JavaScript expression building the encoded query for `operation`.
fn request_expression(operation: Operation) -> String {
    let mut expression = format!("'{}'", operation.name());
    for parameter in operation.parameters() {
        expression.push_str(" + '\\n' + ");
        expression.push_str(parameter);
    }
    expression
}
