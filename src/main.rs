use clap::{Arg, ArgAction, Command};
use std::process;
use tracing::{error, info};

mod mcp;
mod tools;
mod utils;
mod web;

use mcp::server::McpServer;

#[actix_web::main]
async fn main() {
    let matches = Command::new("mcp-senate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("MCP server and web API for the Brazilian Senate open-data service")
        .long_about(
            "By default this runs a Model Context Protocol server on stdio with two tools:\n\
            - getBillText: fetch a bill's legislative process and extract its document texts\n\
            - getSenatorProfile: look up a senator's profile and optional voting history\n\n\
            With --http it instead serves a REST API:\n\
            - GET /senate/bill_types\n\
            - GET /senate/bills?{year,bill_type,number,author,keyword}\n\
            - GET /senate/bill?code=...",
        )
        .arg(
            Arg::new("http")
                .long("http")
                .help("Serve the REST API over HTTP instead of MCP on stdio")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to bind the HTTP server to")
                .default_value("127.0.0.1")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Port to bind the HTTP server to")
                .default_value("6969")
                .value_parser(clap::value_parser!(u16))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Log errors only (for MCP clients)")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    // Logs go to stderr only; stdout is reserved for JSON-RPC.
    let log_level = if std::env::var("RUST_LOG").is_ok() {
        None
    } else if matches.get_flag("quiet") {
        Some("error")
    } else {
        Some("info")
    };

    if let Some(level) = log_level {
        std::env::set_var("RUST_LOG", level);
    }

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if matches.get_flag("http") {
        let host = matches
            .get_one::<String>("host")
            .map(String::as_str)
            .unwrap_or("127.0.0.1");
        let port = *matches.get_one::<u16>("port").unwrap_or(&6969);

        if let Err(e) = web::serve(host, port).await {
            error!("HTTP server error: {}", e);
            process::exit(1);
        }
    } else {
        info!("Starting MCP server...");

        let mut server = McpServer::new();
        if let Err(e) = server.start().await {
            error!("Failed to start server: {}", e);
            process::exit(1);
        }
    }
}
