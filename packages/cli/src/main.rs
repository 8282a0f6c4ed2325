//! `dcat`: data catalog command-line client.
//!
//! Talks to a catalog endpoint through the blocking client:
//!
//! - **`operations`**: list every operation with its verb and path.
//! - **`call`**: invoke any operation by wire name.
//! - **`search`**: keyword search.
//! - **`lineage`**: fetch the lineage graph around an entity.
//! - **`typedefs`**: list type definitions or their headers.
//!
//! Request bodies are read from a file path or from stdin (`-`). Responses
//! are printed as pretty JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use datacatalog::{
    BodyKind, Error, ErrorPolicy, Operation, Payload, RequestOptions, Response,
    DEFAULT_API_VERSION,
};
use datacatalog_api::{LineageDirection, LineageQuery, SearchRequest, TypeCategory, TypesQuery};
use datacatalog_client::{BlockingCatalogClient, ClientConfig};
use tracing::{debug, warn};

/// dcat: data catalog CLI
///
/// Search, browse lineage, and manage type definitions in a data catalog.
#[derive(Parser)]
#[command(name = "dcat", version, about, long_about = None)]
struct Cli {
    /// Catalog endpoint, e.g. `https://acct.purview.azure.com/catalog`.
    #[arg(long, env = "CATALOG_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "CATALOG_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Value of the `api-version` query parameter.
    #[arg(long, env = "CATALOG_API_VERSION", global = true, default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Request timeout in seconds.
    #[arg(long, env = "CATALOG_TIMEOUT_SECS", global = true, default_value_t = ClientConfig::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every operation the client knows, with verb and path template.
    Operations,

    /// Invoke any operation by its wire name.
    ///
    /// Examples:
    ///
    ///   dcat call getRelationship --path guid=4b1e... --query extendedInfo=true
    ///
    ///   dcat call createTypeDefinitions --body typedefs.json
    Call {
        /// Wire name, e.g. `getLineageGraph`. See `dcat operations`.
        operation: String,

        /// Path parameter as NAME=VALUE. Repeatable.
        #[arg(long = "path", value_name = "NAME=VALUE")]
        path: Vec<String>,

        /// Extra query parameter as NAME=VALUE. Repeatable.
        #[arg(long = "query", value_name = "NAME=VALUE")]
        query: Vec<String>,

        /// JSON request body: a file path, or `-` for stdin.
        #[arg(long)]
        body: Option<PathBuf>,

        /// Print the status line and headers before the body, and do not
        /// fail on non-2xx statuses.
        #[arg(long, short = 'i')]
        include_response: bool,
    },

    /// Search the catalog by keyword.
    Search {
        keywords: String,

        #[arg(long, default_value_t = 10)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Print the lineage graph around an entity.
    Lineage {
        /// Entity GUID.
        guid: String,

        /// INPUT, OUTPUT, or BOTH.
        #[arg(long, default_value = "BOTH")]
        direction: LineageDirection,

        #[arg(long)]
        depth: Option<u32>,

        #[arg(long)]
        width: Option<u32>,
    },

    /// List type definitions.
    Typedefs {
        /// Only this category, e.g. `entity` or `ENUM`.
        #[arg(long)]
        category: Option<TypeCategory>,

        /// Print only name, guid, and category.
        #[arg(long)]
        headers: bool,

        /// Include term templates in the listing.
        #[arg(long)]
        include_term_template: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dcat=info,datacatalog_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Operations => {
            for op in Operation::ALL {
                let d = op.descriptor();
                let body = match d.body {
                    BodyKind::None => String::new(),
                    BodyKind::Json(schema) => format!("  body: {schema}"),
                };
                println!(
                    "{:<30} {:<13} {:<7} {}{}",
                    d.name,
                    d.group.to_string(),
                    d.method.to_string(),
                    d.path,
                    body
                );
            }
        }

        Command::Call {
            operation,
            path,
            query,
            body,
            include_response,
        } => {
            let include_response = *include_response;
            let client = connect(&cli);
            let op: Operation = operation.parse().unwrap_or_else(|e| fatal(&format!("{e}")));

            let path_args: Vec<(String, String)> =
                path.iter().map(|p| split_pair(p, "--path")).collect();
            let path_refs: Vec<(&str, &str)> = path_args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();

            let mut options = RequestOptions::new();
            for q in query {
                let (name, value) = split_pair(q, "--query");
                options = options.query_param(name, value);
            }
            if include_response {
                options = options.error_policy(ErrorPolicy::Return);
            }

            let body = body
                .as_ref()
                .map(|p| Payload::from_json_bytes(read_input(p).into_bytes()));

            debug!(operation = %op, paths = path_refs.len(), "invoking");
            let response = client
                .invoke(op, &path_refs, body, options)
                .send_with_response()
                .unwrap_or_else(|e| fatal(&describe(&e)));

            if include_response {
                print_head(&response);
            }
            print_payload(response.payload());
            if !response.is_success() {
                warn!(operation = %op, status = response.status(), "operation did not succeed");
                process::exit(1);
            }
        }

        Command::Search {
            keywords,
            limit,
            offset,
        } => {
            let client = connect(&cli);
            let body = Payload::from_json(&SearchRequest::keywords(keywords).page(*offset, *limit))
                .unwrap_or_else(|e| fatal(&format!("failed to encode request: {e}")));
            let payload = client
                .discovery()
                .query(body, RequestOptions::new())
                .send()
                .unwrap_or_else(|e| fatal(&format!("search failed: {}", describe(&e))));
            print_payload(&payload);
        }

        Command::Lineage {
            guid,
            direction,
            depth,
            width,
        } => {
            let client = connect(&cli);
            let mut query = LineageQuery::new(*direction);
            if let Some(depth) = *depth {
                query = query.depth(depth);
            }
            if let Some(width) = *width {
                query = query.width(width);
            }
            let payload = client
                .lineage()
                .get_lineage_graph(guid, query.into())
                .send()
                .unwrap_or_else(|e| fatal(&format!("lineage failed: {}", describe(&e))));
            print_payload(&payload);
        }

        Command::Typedefs {
            category,
            headers,
            include_term_template,
        } => {
            let client = connect(&cli);
            let options: RequestOptions = TypesQuery {
                include_term_template: include_term_template.then_some(true),
                category: *category,
            }
            .into();
            let types = client.types();
            let call = if *headers {
                types.list_type_definition_headers(options)
            } else {
                types.get_all_type_definitions(options)
            };
            let payload = call
                .send()
                .unwrap_or_else(|e| fatal(&format!("listing type definitions failed: {}", describe(&e))));
            print_payload(&payload);
        }
    }
}

/// Build the blocking client from the global flags.
fn connect(cli: &Cli) -> BlockingCatalogClient {
    let endpoint = cli
        .endpoint
        .as_deref()
        .unwrap_or_else(|| fatal("no endpoint: pass --endpoint or set CATALOG_ENDPOINT"));

    let mut builder = BlockingCatalogClient::builder(endpoint)
        .api_version(&cli.api_version)
        .timeout(Duration::from_secs(cli.timeout));
    if let Some(token) = &cli.token {
        builder = builder.token(token);
    }
    debug!(endpoint, api_version = %cli.api_version, timeout = cli.timeout, "connecting");
    builder
        .build_blocking()
        .unwrap_or_else(|e| fatal(&format!("invalid client configuration: {e}")))
}

fn split_pair(arg: &str, flag: &str) -> (String, String) {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => (name.to_string(), value.to_string()),
        _ => fatal(&format!("{flag} expects NAME=VALUE, got {arg:?}")),
    }
}

fn print_head(response: &Response) {
    println!("HTTP {}", response.status());
    for (name, value) in response.headers() {
        println!("{name}: {value}");
    }
    println!();
}

/// Pretty-print a JSON payload; anything else is written as-is.
fn print_payload(payload: &Payload) {
    if payload.is_empty() {
        return;
    }
    match payload.json::<serde_json::Value>() {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(s) => println!("{s}"),
            Err(e) => fatal(&format!("failed to format response: {e}")),
        },
        Err(_) => println!("{}", String::from_utf8_lossy(payload.as_bytes())),
    }
}

fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// The error, followed by the service's `errorCode` and `errorMessage` when
/// the response carried the standard error body.
fn describe(err: &Error) -> String {
    match err.service_error() {
        Some(body) => format!("{err} ({}: {})", body.error_code, body.error_message),
        None => err.to_string(),
    }
}

fn fatal(msg: &str) -> ! {
    eprintln!("dcat: {}", msg);
    process::exit(2);
}
