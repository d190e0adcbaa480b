use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    presenter::pretty_json, ApiTransport, Bootstrap, StartupPlan, StorefrontCommand,
    TransportConfig,
};
use shared::{
    domain::{CategoryId, CustomerId, SkuId},
    protocol::CreateOrderRequest,
};
use tracing::info;

mod config;
mod terminal;

use config::{load_settings, parse_origin};
use terminal::{TerminalAcknowledger, TerminalPage};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Health probe followed by the delayed category load.
    Start {
        #[arg(long)]
        initial_load_delay_ms: Option<u64>,
        #[arg(long)]
        health_interval_secs: Option<u64>,
    },
    Categories,
    Products {
        #[arg(long)]
        category_id: Option<String>,
    },
    Cart {
        customer_id: String,
    },
    Orders {
        customer_id: String,
    },
    AddToCart {
        customer_id: String,
        sku_id: String,
        #[arg(long)]
        quantity: Option<u32>,
    },
    UpdateCartItem {
        customer_id: String,
        sku_id: String,
        quantity: u32,
    },
    RemoveCartItem {
        customer_id: String,
        sku_id: String,
    },
    ClearCart {
        customer_id: String,
    },
    PlaceOrder {
        customer_id: String,
        #[arg(long)]
        shipping_address: String,
        #[arg(long)]
        billing_address: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Health,
    /// Simulates a click on a navigation link.
    Navigate {
        href: String,
    },
}

impl Command {
    fn storefront_command(&self) -> Option<StorefrontCommand> {
        let command = match self {
            Command::Start { .. } | Command::Navigate { .. } => return None,
            Command::Categories => StorefrontCommand::LoadCategories,
            Command::Products { category_id } => StorefrontCommand::LoadProducts {
                category_id: category_id.as_deref().map(CategoryId::new),
            },
            Command::Cart { customer_id } => StorefrontCommand::LoadCart {
                customer_id: CustomerId::new(customer_id.as_str()),
            },
            Command::Orders { customer_id } => StorefrontCommand::LoadOrders {
                customer_id: CustomerId::new(customer_id.as_str()),
            },
            Command::AddToCart {
                customer_id,
                sku_id,
                quantity,
            } => StorefrontCommand::AddToCart {
                customer_id: CustomerId::new(customer_id.as_str()),
                sku_id: SkuId::new(sku_id.as_str()),
                quantity: *quantity,
            },
            Command::UpdateCartItem {
                customer_id,
                sku_id,
                quantity,
            } => StorefrontCommand::UpdateCartItem {
                customer_id: CustomerId::new(customer_id.as_str()),
                sku_id: SkuId::new(sku_id.as_str()),
                quantity: *quantity,
            },
            Command::RemoveCartItem {
                customer_id,
                sku_id,
            } => StorefrontCommand::RemoveCartItem {
                customer_id: CustomerId::new(customer_id.as_str()),
                sku_id: SkuId::new(sku_id.as_str()),
            },
            Command::ClearCart { customer_id } => StorefrontCommand::ClearCart {
                customer_id: CustomerId::new(customer_id.as_str()),
            },
            Command::PlaceOrder {
                customer_id,
                shipping_address,
                billing_address,
                notes,
            } => StorefrontCommand::PlaceOrder {
                customer_id: CustomerId::new(customer_id.as_str()),
                order: CreateOrderRequest::new(
                    shipping_address.as_str(),
                    billing_address.as_str(),
                    notes.clone(),
                ),
            },
            Command::Health => StorefrontCommand::CheckHealth,
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(v) = cli.server_url {
        settings.server_url = v;
    }
    if let Some(v) = cli.api_base {
        settings.api_base = v;
    }
    if let Command::Start {
        initial_load_delay_ms,
        health_interval_secs,
    } = &cli.command
    {
        if let Some(v) = initial_load_delay_ms {
            settings.initial_load_delay_ms = *v;
        }
        if let Some(v) = health_interval_secs {
            settings.health_interval_secs = Some(*v);
        }
    }

    let origin = parse_origin(&settings.server_url)?;
    info!(server_url = %origin, api_base = %settings.api_base, "storefront console starting");
    let transport =
        ApiTransport::new(TransportConfig::new(origin).with_api_base(settings.api_base.clone()));
    let bootstrap = Bootstrap::new(
        transport,
        Arc::new(TerminalPage::storefront()),
        Arc::new(TerminalAcknowledger),
    );

    let Some(command) = cli.command.storefront_command() else {
        return match cli.command {
            Command::Navigate { href } => {
                let storefront = bootstrap
                    .with_plan(StartupPlan::from_tasks(Vec::new()))
                    .initialize(async {})
                    .await;
                let disposition = storefront.navigator().on_link_click(&href);
                println!("{href}: {disposition:?}");
                Ok(())
            }
            _ => {
                let mut storefront = bootstrap
                    .with_plan(settings.startup_plan())
                    .initialize(async {})
                    .await;
                storefront.wait_for_startup().await;
                if settings.health_interval_secs.is_some_and(|secs| secs > 0) {
                    info!("watching service health; press ctrl-c to stop");
                    tokio::signal::ctrl_c().await?;
                }
                Ok(())
            }
        };
    };

    let storefront = bootstrap
        .with_plan(StartupPlan::from_tasks(Vec::new()))
        .initialize(async {})
        .await;
    let is_mutation = command.is_mutation();
    let result = storefront.dispatch(command).await;
    if is_mutation {
        storefront.operations().settle().await;
    }

    match result? {
        Some(payload) => println!("{}", pretty_json(&payload)),
        None if matches!(cli.command, Command::Health) => println!("service unreachable"),
        None => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
