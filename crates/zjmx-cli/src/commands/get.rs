//! Get command implementation

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

use zjmx_client::{ClientConfig, ConfigFile, JmxClient, Request};

use crate::output::{render_response, OutputStyle};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Options given on the command line
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub connect_timeout: Option<u64>,
    pub timeout: Option<u64>,
}

/// Required options that were given neither as flags nor in the config file
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Missing required options: {}", .0.join(", "))]
pub struct MissingOptions(pub Vec<&'static str>);

/// Everything needed to run one exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    pub gateway: String,
    pub client: ClientConfig,
    pub request: Request,
}

/// Merge command-line options over the config file
///
/// Flags win over the file; timeouts set nowhere fall back to 3 s for
/// connect and 5 s for read and write. An explicit zero in either place
/// disables that deadline.
pub fn resolve(
    options: Options,
    file: &ConfigFile,
    keys: Vec<String>,
) -> Result<Exchange, MissingOptions> {
    let host = options.host.or_else(|| file.gateway.host.clone());
    let port = options.port.or(file.gateway.port);
    let server_host = options.server_host.or_else(|| file.server.host.clone());
    let server_port = options.server_port.or(file.server.port);

    let mut missing = Vec::new();
    if host.is_none() {
        missing.push("--host");
    }
    if port.is_none() {
        missing.push("--port");
    }
    if server_host.is_none() {
        missing.push("--server-host");
    }
    if server_port.is_none() {
        missing.push("--server-port");
    }

    let (Some(host), Some(port), Some(server_host), Some(server_port)) =
        (host, port, server_host, server_port)
    else {
        return Err(MissingOptions(missing));
    };

    let mut client = file.client.over(ClientConfig {
        connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        write_timeout: DEFAULT_IO_TIMEOUT,
        read_timeout: DEFAULT_IO_TIMEOUT,
        ..Default::default()
    });
    if let Some(secs) = options.connect_timeout {
        client.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = options.timeout {
        client.write_timeout = Duration::from_secs(secs);
        client.read_timeout = Duration::from_secs(secs);
    }

    let mut request = Request::new(server_host, server_port, keys);

    // The password is only sent together with a user
    let user = options.user.or_else(|| file.server.username.clone());
    if let Some(user) = user {
        let password = options
            .password
            .or_else(|| file.server.password.clone())
            .unwrap_or_default();
        request = request.with_credentials(user, password);
    }

    Ok(Exchange {
        gateway: format!("{}:{}", host, port),
        client,
        request,
    })
}

/// Execute the get command
pub fn get_command(exchange: &Exchange, style: &OutputStyle) -> Result<()> {
    let client = JmxClient::with_config(&exchange.gateway, exchange.client.clone())?;

    tracing::info!(
        gateway = %client.addr(),
        server = %exchange.request.server,
        port = exchange.request.port,
        "Fetching {} key(s)",
        exchange.request.keys.len()
    );

    let resp = client.get(&exchange.request)?;

    let failed = render_response(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        style,
        &resp,
        &exchange.request.keys,
    )?;
    if failed > 0 {
        tracing::warn!(failed, "Some discovery values could not be parsed");
    }

    io::stdout().flush()?;
    Ok(())
}
