//! Leather Lane CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse, filter and sort the catalog
//! leather-lane products --category footwear --sort price-asc
//! leather-lane products --query "minPrice=15000&maxPrice=25000&page=1"
//!
//! # Manage the cart
//! leather-lane cart add leather-jacket -q 2
//! leather-lane cart show
//!
//! # Check out
//! leather-lane checkout --first-name Ayesha --last-name Khan \
//!     --email ayesha@example.pk --phone 03001234567 --address "12 Mall Road" \
//!     --city Lahore --state Punjab --zip-code 54000 --shipping express
//! ```
//!
//! # Commands
//!
//! - `products` - List products, filtered, sorted and paginated
//! - `product` - Show one product
//! - `suggest` - Search suggestions for partial input
//! - `cart` - Show or change the cart
//! - `checkout` - Run the checkout flow and place an order
//! - `order-success` - Show the order confirmation view
//!
//! The cart is stored in `LEATHER_LANE_DATA_DIR` (default `.leather-lane`).
//! Logs go to stderr; `RUST_LOG` and `LEATHER_LANE_LOG_FORMAT` control them.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leather_lane_core::{Category, PaymentMethod, Price, ShippingMethod};
use leather_lane_storefront::config::{LogFormat, StorefrontConfig};
use leather_lane_storefront::error::AppError;
use leather_lane_storefront::order::ConfirmationQuery;
use leather_lane_storefront::search::{CatalogQuery, SortMode};
use leather_lane_storefront::state::Storefront;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "leather-lane")]
#[command(author, version, about = "Leather Lane storefront")]
struct Cli {
    /// Directory holding the cart (overrides `LEATHER_LANE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),
    /// Show a product
    Product {
        /// Product id
        id: String,
    },
    /// Suggest products for partial search input
    Suggest {
        /// Search text, typed one character at a time
        text: String,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Check out the current cart
    Checkout(commands::checkout::CheckoutArgs),
    /// Show the order confirmation
    OrderSuccess {
        /// Order id marker set by checkout
        #[arg(long = "order-id")]
        order_id: Option<String>,

        /// Shipping method chosen at checkout
        #[arg(long)]
        shipping: Option<ShippingMethod>,

        /// Payment method chosen at checkout
        #[arg(long)]
        payment: Option<PaymentMethod>,
    },
}

#[derive(clap::Args)]
struct ProductsArgs {
    /// Raw query string; other filter flags are applied on top
    #[arg(long)]
    query: Option<String>,

    /// Text to search for in names and descriptions
    #[arg(short, long)]
    search: Option<String>,

    /// Category (`apparel`, `accessories`, `footwear`, `industrial`)
    #[arg(short, long)]
    category: Option<Category>,

    /// Lowest price, inclusive
    #[arg(long)]
    min_price: Option<u64>,

    /// Highest price, inclusive
    #[arg(long)]
    max_price: Option<u64>,

    /// Sort order (`featured`, `price-asc`, `price-desc`, `rating`, `newest`)
    #[arg(long)]
    sort: Option<String>,

    /// Page number
    #[arg(short, long)]
    page: Option<usize>,
}

impl ProductsArgs {
    fn into_query(self) -> CatalogQuery {
        let mut query = self
            .query
            .as_deref()
            .map(CatalogQuery::from_query_string)
            .unwrap_or_default();

        if let Some(search) = self.search {
            query = query.with_search(search);
        }
        if let Some(category) = self.category {
            query = CatalogQuery {
                category: Some(category.as_str().to_owned()),
                page: 1,
                ..query
            };
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            query = query.with_price_range(
                self.min_price.map_or(query.min_price, Price::new),
                self.max_price.map_or(query.max_price, Price::new),
            );
        }
        if let Some(sort) = self.sort {
            query = query.with_sort(SortMode::parse(&sort));
        }
        if let Some(page) = self.page {
            query = query.with_page(page);
        }
        query
    }
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the subtotal
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Quantity (1-10)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity
    Update {
        /// Product id
        id: String,

        /// New quantity (at least 1)
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_tracing(config.as_ref().map(|c| c.log_format).unwrap_or_default());

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        println!("{}", e.user_message());
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "leather_lane_storefront=info,leather_lane_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

async fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), AppError> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let mut storefront = Storefront::open(config)?;

    match cli.command {
        Commands::Products(args) => commands::products::list(&storefront, &args.into_query()),
        Commands::Product { id } => commands::products::show(&storefront, &id)?,
        Commands::Suggest { text } => commands::products::suggest(&storefront, &text).await,
        Commands::Cart { action } => match action.unwrap_or(CartAction::Show) {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { id, quantity } => {
                commands::cart::add(&mut storefront, &id, quantity)?;
            }
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut storefront, &id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, &id),
            CartAction::Clear => commands::cart::clear(&mut storefront),
        },
        Commands::Checkout(args) => commands::checkout::run(&mut storefront, args).await?,
        Commands::OrderSuccess {
            order_id,
            shipping,
            payment,
        } => commands::order::show(
            &mut storefront,
            ConfirmationQuery {
                order_id,
                shipping_method: shipping,
                payment_method: payment,
            },
        ),
    }
    Ok(())
}
