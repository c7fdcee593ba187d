//! # Command Line
//!
//! `clap` definitions. Each screen of the admin client becomes a command:
//!
//! ```text
//! inventario login --email a@x.com          sign in (password prompted)
//! inventario menu                           navigation for this session
//! inventario list pedidos --page 2          one page of a resource table
//! inventario create pedidos --json '{...}'  presence-checked create
//! inventario config set-url http://...      point at another backend
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use inventario_core::resource::Resource;

/// Inventario admin client.
#[derive(Parser, Debug)]
#[command(name = "inventario", version, about = "Inventario admin client")]
pub struct Cli {
    /// Path to the client config file (default: platform config dir).
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Debug logging for the inventario crates.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and remove the persisted session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Show the navigation menu for the current session.
    Menu,

    /// Create a self-registered account.
    Register {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        telefono: Option<String>,
        /// Company id to attach the account to.
        #[arg(long)]
        empresa: Option<i64>,
        /// Password (prompted when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// List one page of a resource.
    List {
        /// Resource name (e.g. empresas, pedidos, movimientos).
        resource: Resource,
        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Rows per page (default from config).
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Stock view of the product catalogue.
    Inventory {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show one record.
    Get { resource: Resource, id: String },

    /// Create a record from JSON.
    Create {
        resource: Resource,
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Replace a record with JSON.
    Update {
        resource: Resource,
        id: String,
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Delete a record.
    Delete {
        resource: Resource,
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Inspect or edit the client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where a create/update payload comes from.
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct BodyArgs {
    /// Inline JSON body.
    #[arg(long = "json")]
    pub json: Option<String>,

    /// Read the JSON body from a file.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the config file location.
    Path,
    /// Store a new backend origin in the config file.
    SetUrl { url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_alias() {
        let cli = Cli::try_parse_from(["inventario", "list", "orders", "--page", "2"]).unwrap();
        match cli.command {
            Command::List {
                resource,
                page,
                page_size,
            } => {
                assert_eq!(resource, Resource::Pedidos);
                assert_eq!(page, 2);
                assert_eq!(page_size, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[test]
    fn test_unknown_resource_is_rejected() {
        assert!(Cli::try_parse_from(["inventario", "list", "facturas"]).is_err());
    }

    #[test]
    fn test_create_needs_exactly_one_body_source() {
        assert!(Cli::try_parse_from(["inventario", "create", "empresas"]).is_err());
        assert!(Cli::try_parse_from([
            "inventario", "create", "empresas", "--json", "{}", "-f", "x.json"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["inventario", "create", "empresas", "--json", "{}"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["inventario", "menu", "-o", "json", "--config", "/tmp/c.toml"])
            .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
