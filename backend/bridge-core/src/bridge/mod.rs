//! The two-way bridge between the embedded page and native code.
//!
//! # Direction page -> native
//!
//! The installer defines `window.orionBuildConnector` on every page load. Each
//! function on it encodes its arguments with the line codec and hands the
//! string to the host's query channel, where [`QueryDispatcher`] decodes it and
//! calls the [`BuildOrchestrator`](crate::build::BuildOrchestrator).
//!
//! # Direction native -> page
//!
//! Native code only talks to the page by executing script through a
//! [`PageHandle`]; installing the namespace is the one push this layer makes.

mod browser;
mod connector;
mod dispatcher;
mod installer;

pub use browser::{
    BrowserHost, BrowserNavigation, LoadHandler, Notifier, PageHandle, QueryHandler, QueryInjector,
};
pub use connector::BuildConnector;
pub use dispatcher::{Dispatch, QueryDispatcher};
pub use installer::{PageBridgeInstaller, bridge_script};
