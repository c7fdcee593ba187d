//! # Inventario CLI Library
//!
//! Command-line front end of the Inventario admin client. Every screen of
//! the back office is a command; the session persists between runs.
//!
//! ## Module Organization
//! ```text
//! inventario_cli/
//! ├── lib.rs          ◄─── You are here (dispatch & rendering)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Loaded configuration
//! │   └── session.rs  ◄─── Restored session store
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, navigation helper
//! │   ├── auth.rs     ◄─── login, logout, whoami, register
//! │   ├── menu.rs     ◄─── navigation menu
//! │   ├── resource.rs ◄─── generic CRUD over the resource catalogue
//! │   └── config.rs   ◄─── config show, path, set-url
//! ├── output.rs       ◄─── tables, menus, notifications
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → client.toml → INVENTARIO_* env → validate              │
//! │                                                                         │
//! │  2. Config commands stop here (no session, no network)                  │
//! │                                                                         │
//! │  3. Open Session State ───────────────────────────────────────────────► │
//! │     • restore the stored session (legacy key migrated once)            │
//! │                                                                         │
//! │  4. Run the command, render the result                                  │
//! │     • failures become an error notification and exit code 1             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use inventario_core::auth::Registration;
use inventario_core::NOTIFICATION_LIFE_MS;

use cli::{BodyArgs, Cli, Command, ConfigAction, OutputFormat};
use error::{ApiError, ApiResult};
use state::{ConfigState, SessionState};

/// Runs one CLI invocation.
///
/// Command failures are rendered (notification on stderr, or the error
/// object with `-o json`) and turned into a failing exit code.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let format = cli.output;
    let config = ConfigState::load(cli.config);
    let life_ms = failure_life_ms(config.as_ref().ok());

    let result = match config {
        Ok(config) => execute(&config, format, cli.command).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            debug!(code = ?err.code, "Command failed");
            match format {
                OutputFormat::Json => output::print_json(&err)?,
                OutputFormat::Table => output::notify(&err.to_notification(life_ms)),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Lifetime of an error notification. The built-in default applies only
/// when the configuration itself failed to load.
fn failure_life_ms(config: Option<&ConfigState>) -> u64 {
    config.map_or(NOTIFICATION_LIFE_MS, |c| c.config.ui.notification_life_ms)
}

/// Initializes the tracing subscriber. Logs go to stderr.
///
/// ## Log Levels
/// - Default: warnings only
/// - `-v`: `info,inventario=debug,reqwest=warn`
/// - `RUST_LOG` overrides both
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,inventario=debug,reqwest=warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn execute(config: &ConfigState, format: OutputFormat, command: Command) -> ApiResult<()> {
    match command {
        Command::Config { action } => run_config(config, format, action),
        command => {
            let state = SessionState::open(&config.config).await?;
            info!(origin = %config.config.base_url(), "Inventario CLI ready");
            run_session(config, &state, format, command).await
        }
    }
}

fn run_config(config: &ConfigState, format: OutputFormat, action: ConfigAction) -> ApiResult<()> {
    match action {
        ConfigAction::Show => match format {
            OutputFormat::Json => output::print_json(&config.config)?,
            OutputFormat::Table => println!("{}", commands::config::show(config)?),
        },
        ConfigAction::Path => println!("{}", commands::config::path(config)?.display()),
        ConfigAction::SetUrl { url } => {
            let path = commands::config::set_url(config, &url)?;
            println!("API URL set to {} ({})", url, path.display());
        }
    }
    Ok(())
}

async fn run_session(
    config: &ConfigState,
    state: &SessionState,
    format: OutputFormat,
    command: Command,
) -> ApiResult<()> {
    match command {
        Command::Login { email, password } => {
            let email = match email {
                Some(email) => email,
                None => prompt_line("Email: ")?,
            };
            let password = match password {
                Some(password) => password,
                None => prompt_password("Password: ")?,
            };

            let outcome = commands::auth::login(state, &email, &password).await?;
            output::notify(&outcome.notification);
            if format == OutputFormat::Json {
                output::print_json(&outcome.session.user)?;
            }
            arrive(commands::follow(outcome.navigation).await.path(), format);
        }

        Command::Logout => {
            let navigation = commands::auth::logout(state).await?;
            arrive(commands::follow(navigation).await.path(), format);
        }

        Command::Whoami => {
            let session = commands::auth::whoami(state).await?;
            match format {
                OutputFormat::Json => output::print_json(&session.user)?,
                OutputFormat::Table => println!("{}", output::render_session(&session)),
            }
        }

        Command::Menu => {
            let menu = commands::menu::menu(state).await;
            match format {
                OutputFormat::Json => output::print_json(&menu)?,
                OutputFormat::Table => println!("{}", output::render_menu(&menu)),
            }
        }

        Command::Register {
            nombre,
            email,
            telefono,
            empresa,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => {
                    let first = prompt_password("Password: ")?;
                    let confirm = prompt_password("Confirm password: ")?;
                    if first != confirm {
                        return Err(ApiError::input("Passwords do not match."));
                    }
                    first
                }
            };

            let registration = Registration {
                nombre_completo: nombre,
                email,
                telefono,
                password,
                empresa_id: empresa,
            };
            let (notification, navigation) = commands::auth::register(state, registration).await?;
            output::notify(&notification);
            arrive(commands::follow(navigation).await.path(), format);
        }

        Command::List {
            resource,
            page,
            page_size,
        } => {
            let view = commands::resource::list(state, resource, page, page_size).await?;
            print_table(&view, format)?;
        }

        Command::Inventory { page, page_size } => {
            let view = commands::resource::inventory(state, page, page_size).await?;
            print_table(&view, format)?;
        }

        Command::Get { resource, id } => {
            let record = commands::resource::get(state, resource, &id).await?;
            output::print_json(&record)?;
        }

        Command::Create { resource, body } => {
            let body = read_body(&body)?;
            let (created, notification) = commands::resource::create(state, resource, body).await?;
            output::notify(&notification);
            if let Some(record) = created {
                output::print_json(&record)?;
            }
        }

        Command::Update { resource, id, body } => {
            let body = read_body(&body)?;
            let (updated, notification) =
                commands::resource::update(state, resource, &id, body).await?;
            output::notify(&notification);
            if let Some(record) = updated {
                output::print_json(&record)?;
            }
        }

        Command::Delete { resource, id, yes } => {
            if !yes && !confirm(&format!("Delete {} {}? [y/N]: ", resource, id))? {
                eprintln!("Cancelled.");
                return Ok(());
            }
            let notification = commands::resource::delete(state, resource, &id).await?;
            output::notify(&notification);
        }

        Command::Config { action } => run_config(config, format, action)?,
    }
    Ok(())
}

// =============================================================================
// Terminal Helpers
// =============================================================================

fn arrive(path: &str, format: OutputFormat) {
    if format == OutputFormat::Table {
        println!("→ {}", path);
    }
}

fn print_table(view: &commands::resource::TableView, format: OutputFormat) -> ApiResult<()> {
    match format {
        OutputFormat::Json => output::print_json(view),
        OutputFormat::Table => {
            println!("{}", output::render_table(view));
            Ok(())
        }
    }
}

fn prompt_line(label: &str) -> ApiResult<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(strip_line_ending(&line).to_string())
}

/// Drops only the terminator, so a prompted value compares exactly like
/// the same value passed as a flag.
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn prompt_password(label: &str) -> ApiResult<String> {
    Ok(rpassword::prompt_password(label)?)
}

fn confirm(question: &str) -> ApiResult<bool> {
    eprint!("{}", question);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Reads a create/update body from `--json` or `--file`.
fn read_body(args: &BodyArgs) -> ApiResult<Value> {
    let text = match (&args.json, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => read_file(path)?,
        (None, None) => return Err(ApiError::input("Provide --json or -f <file>.")),
    };
    serde_json::from_str(&text).map_err(|e| ApiError::validation(format!("Invalid JSON: {}", e)))
}

fn read_file(path: &Path) -> ApiResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ApiError::input(format!("Cannot read {}: {}", path.display(), e)))
}
