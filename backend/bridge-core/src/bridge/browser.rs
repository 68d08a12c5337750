//! Narrow views of the embedded browser the bridge needs.

/// A loaded page that native code can run script in.
pub trait PageHandle {
    fn url(&self) -> String;

    /// Run `script` in the page. `script_url` is only used for diagnostics.
    fn execute_script(&self, script: &str, script_url: &str);
}

/// Produces page-side code that sends a string to native query handlers.
pub trait QueryInjector: Send + Sync {
    /// Script statement sending the value of the JavaScript expression
    /// `request` to the native side.
    fn inject(&self, request: &str) -> String;
}

/// Receives a raw query; returns whether it was handled.
pub type QueryHandler = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Called after a page finished loading.
pub type LoadHandler = Box<dyn Fn(&dyn PageHandle) + Send + Sync>;

/// Registration points of the host browser.
pub trait BrowserHost {
    /// Handlers are tried in registration order until one returns `true`.
    fn add_query_handler(&self, handler: QueryHandler);

    fn add_load_handler(&self, handler: LoadHandler);
}

/// Navigation of the project's browser panel.
pub trait BrowserNavigation {
    fn load_url(&self, url: &str);
}

/// User-facing notifications of the host IDE.
pub trait Notifier {
    fn notify(&self, message: &str);
}
