//! Kanap - terminal storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kanap products
//! kanap product 107fb5b75607497b96722bda5b504926
//!
//! # Fill the cart
//! kanap add 107fb5b75607497b96722bda5b504926 --color Blue --quantity 2
//! kanap cart
//! kanap cart set 107fb5b75607497b96722bda5b504926 --color Blue --quantity 3
//! kanap cart remove 107fb5b75607497b96722bda5b504926 --color Blue
//!
//! # Place the order
//! kanap checkout --first-name Jean --last-name Dupont \
//!     --address "10 quai de la Charente" --city Paris --email jean@example.com
//! ```
//!
//! Rendered pages go to stdout; logs go to stderr (`RUST_LOG` to adjust).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use askama::Template;
use clap::{Args, Parser, Subcommand};
use kanap_core::{ContactInfo, OrderId, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kanap_storefront::config::StorefrontConfig;
use kanap_storefront::error::StorefrontError;
use kanap_storefront::pages;
use kanap_storefront::state::AppState;

#[derive(Parser)]
#[command(name = "kanap")]
#[command(author, version, about = "Kanap storefront client")]
struct Cli {
    /// Catalog API base URL (overrides `KANAP_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the cart (overrides `KANAP_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product
    Products,
    /// Show one product
    Product {
        /// Product id
        id: String,
    },
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,
        #[command(flatten)]
        selection: Selection,
    },
    /// Show or edit the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Validate contact details and place the order
    Checkout(ContactArgs),
    /// Show the confirmation page for an order
    Confirmation {
        /// Order id returned by checkout
        order_id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Change the quantity of a line
    Set {
        /// Product id
        id: String,
        #[command(flatten)]
        selection: Selection,
    },
    /// Delete a line
    Remove {
        /// Product id
        id: String,
        /// Line color
        #[arg(short, long)]
        color: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct Selection {
    /// Product color
    #[arg(short, long)]
    color: String,

    /// Number of units (1-100)
    #[arg(short, long)]
    quantity: u32,
}

#[derive(Args)]
struct ContactArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    email: String,
}

impl From<ContactArgs> for ContactInfo {
    fn from(args: ContactArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            address: args.address,
            city: args.city,
            email: args.email,
        }
    }
}

/// What a command produced.
enum Output {
    Page(String),
    /// Page describing input the shopper has to fix.
    Rejected(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Defaults to warn level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kanap_storefront=warn,kanap=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(Output::Page(page)) => emit(&page, ExitCode::SUCCESS),
        Ok(Output::Rejected(page)) => emit(&page, ExitCode::from(2)),
        Err(e) if e.is_user_error() => emit(&e.user_message(), ExitCode::from(2)),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            emit(&e.user_message(), ExitCode::FAILURE)
        }
    }
}

fn emit(text: &str, code: ExitCode) -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{}", text.trim_end()).is_err() {
        return ExitCode::FAILURE;
    }
    code
}

async fn run(cli: Cli) -> Result<Output, StorefrontError> {
    let config =
        StorefrontConfig::from_env()?.with_overrides(cli.api_url.as_deref(), cli.data_dir)?;
    let state = AppState::new(&config)?;
    let (store, catalog) = (state.cart(), state.catalog());

    let page = match cli.command {
        Commands::Products => pages::listing::listing(catalog).await?.render()?,
        Commands::Product { id } => {
            pages::product::show(catalog, &ProductId::new(id))
                .await?
                .render()?
        }
        Commands::Add { id, selection } => {
            pages::product::add_to_cart(
                store,
                catalog,
                &ProductId::new(id),
                &selection.color,
                selection.quantity,
            )
            .await?
            .render()?
        }
        Commands::Cart { action } => match action {
            None => pages::cart::cart_view(store, catalog).await?.render()?,
            Some(CartAction::Set { id, selection }) => {
                pages::cart::update_quantity(
                    store,
                    catalog,
                    &ProductId::new(id),
                    &selection.color,
                    selection.quantity,
                )
                .await?
                .render()?
            }
            Some(CartAction::Remove { id, color }) => {
                pages::cart::remove_line(store, catalog, &ProductId::new(id), &color)
                    .await?
                    .render()?
            }
            Some(CartAction::Clear) => {
                store.clear()?;
                pages::cart::cart_view(store, catalog).await?.render()?
            }
        },
        Commands::Checkout(contact) => {
            let page = pages::checkout::submit(store, catalog, contact.into()).await?;
            let rendered = page.render()?;
            if !page.is_confirmation() {
                return Ok(Output::Rejected(rendered));
            }
            rendered
        }
        Commands::Confirmation { order_id } => {
            pages::checkout::confirmation(OrderId::new(order_id)).render()?
        }
    };

    Ok(Output::Page(page))
}
