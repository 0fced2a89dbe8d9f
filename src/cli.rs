use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Admin client for the order register API.
#[derive(Parser, Debug)]
#[command(name = "order_register", version)]
pub struct Cli {
    /// Base URL of the API, overriding config file and environment.
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,
    /// TOML config file (default: ./order-register.toml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Screen to open; orders when omitted.
    #[command(subcommand)]
    pub screen: Option<Screen>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Screen {
    #[command(subcommand)]
    Orders(OrderCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Products(ProductCommand),
}

impl Screen {
    /// Short label for log spans; argument values stay out of the logs.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Orders(OrderCommand::List { .. }) => "orders list",
            Screen::Orders(OrderCommand::Add { .. }) => "orders add",
            Screen::Orders(OrderCommand::Edit { .. }) => "orders edit",
            Screen::Orders(OrderCommand::Delete { .. }) => "orders delete",
            Screen::Users(UserCommand::List { .. }) => "users list",
            Screen::Users(UserCommand::Add { .. }) => "users add",
            Screen::Users(UserCommand::Edit { .. }) => "users edit",
            Screen::Products(ProductCommand::List) => "products list",
            Screen::Products(ProductCommand::Add { .. }) => "products add",
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Orders(OrderCommand::List { page: 1, details: false, expand: Vec::new() })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum OrderCommand {
    /// Show one page of orders.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Expand the detail row of every order on the page.
        #[arg(long)]
        details: bool,
        /// Toggle the detail row of one order; repeatable.
        #[arg(long, value_name = "ORDER_ID")]
        expand: Vec<i64>,
    },
    /// Place an order and take its quantity out of stock.
    Add {
        #[arg(long)]
        user: String,
        #[arg(long)]
        product: i64,
        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,
        #[arg(long, default_value = "")]
        description: String,
        /// Lower the quantity to the available stock instead of rejecting it.
        #[arg(long)]
        clamp_to_stock: bool,
    },
    /// Change an order's product, quantity or description.
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        product: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        quantity: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        /// Lower the quantity to the available stock instead of rejecting it.
        #[arg(long)]
        clamp_to_stock: bool,
        /// Page to look on first.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Delete an order and return its quantity to stock.
    Delete {
        #[arg(long)]
        id: i64,
        /// Confirm the deletion; without it the order is only shown.
        #[arg(long)]
        yes: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Show one page of users.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Register a user.
    Add {
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        password: String,
    },
    /// Change a user's first and last name.
    Edit {
        #[arg(long)]
        id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProductCommand {
    /// Show every product.
    List,
    /// Add a product.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: u32,
    },
}
