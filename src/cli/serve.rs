//! `adr serve`: runs the JSON API over the current workspace

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use super::output::Output;
use crate::storage::Workspace;
use crate::web::{self, AppState};

/// Installs the stderr log subscriber
///
/// `RUST_LOG` wins over the default level. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn run(output: &Output, addr: SocketAddr) -> Result<()> {
    init_tracing(output.is_verbose());

    // Without a workspace the server still starts; data endpoints answer 503.
    let state = match Workspace::open_current() {
        Ok(workspace) => {
            info!(dir = %workspace.adr_dir().display(), "serving ADRs");
            AppState::for_repository(workspace.repository())
        }
        Err(e) => {
            warn!(error = %e, "no ADR workspace, repository not configured");
            AppState::unconfigured()
        }
    };

    output.verbose_ctx("serve", &format!("binding {addr}"));

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime
        .block_on(web::serve(addr, state))
        .with_context(|| format!("serving on {addr}"))
}
