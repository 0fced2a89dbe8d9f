use tracing::{info, instrument};

use crate::app_system::OrderSystem;
use crate::cli::{OrderCommand, ProductCommand, Screen, UserCommand};
use crate::config::Settings;
use crate::controller::{Notice, OrderForm, OrderManager, ProductManager, UserManager};
use crate::domain::{ProductCreate, UserCreate};
use crate::view::{
    page_links, render_order_details, render_order_form, render_orders, render_products, render_users,
};

/// What a screen leaves on the terminal: the rendered view and the last notice.
#[derive(Debug, Default)]
pub struct Output {
    pub text: String,
    pub notice: Option<Notice>,
}

impl Output {
    pub fn failed(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }

    fn notice(notice: Notice) -> Self {
        Self { text: String::new(), notice: Some(notice) }
    }
}

/// Runs one screen action against the system. Managers hold client clones and
/// are dropped before this returns, so the system can shut down afterwards.
#[instrument(skip_all, fields(screen = screen.name()))]
pub async fn execute(screen: Screen, system: &OrderSystem, settings: &Settings) -> Output {
    info!("Opening screen");
    match screen {
        Screen::Orders(command) => {
            let manager = OrderManager::new(
                system.order_client.clone(),
                system.user_client.clone(),
                system.product_client.clone(),
                settings.order_page_size,
                settings.reconcile_stock_on_update,
            );
            orders(command, manager).await
        }
        Screen::Users(command) => {
            let manager = UserManager::new(system.user_client.clone(), settings.user_page_size);
            users(command, manager).await
        }
        Screen::Products(command) => products(command, ProductManager::new(system.product_client.clone())).await,
    }
}

/// Loads the first page, then follows the selector link for `page`. A page
/// outside the links is requested as given.
async fn open_order_page(manager: &mut OrderManager, page: u32) {
    manager.go_to_page(1).await;
    if page == 1 {
        return;
    }
    match page_links(manager.page(), manager.page_count()).into_iter().find(|l| l.number == page) {
        Some(link) => link.select(|p| manager.set_page(p)),
        None => manager.set_page(page),
    }
    manager.refresh().await;
}

async fn open_user_page(manager: &mut UserManager, page: u32) {
    manager.go_to_page(1).await;
    if page == 1 {
        return;
    }
    match page_links(manager.page(), manager.page_count()).into_iter().find(|l| l.number == page) {
        Some(link) => link.select(|p| manager.set_page(p)),
        None => manager.set_page(page),
    }
    manager.refresh().await;
}

fn enter_quantity(form: &mut OrderForm, quantity: i64, clamp_to_stock: bool) {
    if clamp_to_stock {
        form.set_quantity(quantity);
    } else {
        form.set_quantity_unclamped(quantity);
    }
}

fn order_list(manager: &OrderManager) -> String {
    render_orders(manager.rows(), |id| manager.is_expanded(id), manager.page(), manager.page_count())
}

fn user_list(manager: &UserManager) -> String {
    render_users(manager.rows(), manager.page(), manager.page_count())
}

async fn orders(command: OrderCommand, mut manager: OrderManager) -> Output {
    match command {
        OrderCommand::List { page, details, expand } => {
            open_order_page(&mut manager, page).await;
            if details {
                manager.expand_all();
            }
            for order_id in expand {
                manager.toggle_details(order_id);
            }
            Output { text: order_list(&manager), notice: None }
        }
        OrderCommand::Add { user, product, quantity, description, clamp_to_stock } => {
            manager.refresh().await;
            let form = manager.open_add().await;
            if !form.select_user(&user) {
                return Output::notice(Notice::error("Order Status", format!("Unknown user {user}")));
            }
            if !form.select_product(product) {
                return Output::notice(Notice::error("Order Status", format!("Unknown product {product}")));
            }
            enter_quantity(form, quantity, clamp_to_stock);
            form.set_description(description);
            let mut text = render_order_form(form);

            manager.submit_add().await;
            let notice = manager.add_dialog.dismiss_notice();
            if !manager.add_dialog.is_open() {
                text.push('\n');
                text.push_str(&order_list(&manager));
            }
            Output { text, notice }
        }
        OrderCommand::Edit { id, product, quantity, description, clamp_to_stock, page } => {
            open_order_page(&mut manager, page).await;
            let Some(form) = manager.open_edit(id).await else {
                return Output { text: String::new(), notice: manager.edit_dialog.dismiss_notice() };
            };
            if let Some(product) = product {
                if !form.select_product(product) {
                    return Output::notice(Notice::error("Order Status", format!("Unknown product {product}")));
                }
            }
            if let Some(quantity) = quantity {
                enter_quantity(form, quantity, clamp_to_stock);
            }
            if let Some(description) = description {
                form.set_description(description);
            }
            let mut text = render_order_form(form);

            manager.submit_edit().await;
            let notice = manager.edit_dialog.dismiss_notice();
            if !manager.edit_dialog.is_open() {
                text.push('\n');
                text.push_str(&order_list(&manager));
            }
            Output { text, notice }
        }
        OrderCommand::Delete { id, yes, page } => {
            open_order_page(&mut manager, page).await;
            let Some(order) = manager.open_delete(id).await else {
                return Output { text: String::new(), notice: manager.delete_dialog.dismiss_notice() };
            };
            let mut text = format!("Are you sure you want to delete order {}?\n{}", order.id, render_order_details(order));
            if !yes {
                manager.cancel_delete();
                text.push_str("Pass --yes to confirm.\n");
                return Output { text, notice: None };
            }

            manager.confirm_delete().await;
            let notice = manager.delete_dialog.dismiss_notice();
            if !manager.delete_dialog.is_open() {
                text.push('\n');
                text.push_str(&order_list(&manager));
            }
            Output { text, notice }
        }
    }
}

async fn users(command: UserCommand, mut manager: UserManager) -> Output {
    match command {
        UserCommand::List { page } => {
            open_user_page(&mut manager, page).await;
            Output { text: user_list(&manager), notice: None }
        }
        UserCommand::Add { user_name, first_name, last_name, password } => {
            manager
                .add_user(UserCreate { user_name, first_name, last_name, password })
                .await;
            let notice = manager.add_dialog.dismiss_notice();
            Output { text: user_list(&manager), notice }
        }
        UserCommand::Edit { id, first_name, last_name, page } => {
            open_user_page(&mut manager, page).await;
            if manager.open_edit(&id).await {
                manager.save_edit(&first_name, &last_name).await;
            }
            let notice = manager.edit_dialog.dismiss_notice();
            Output { text: user_list(&manager), notice }
        }
    }
}

async fn products(command: ProductCommand, mut manager: ProductManager) -> Output {
    match command {
        ProductCommand::List => {
            manager.refresh().await;
            Output { text: render_products(manager.rows()), notice: None }
        }
        ProductCommand::Add { name, description, price, stock } => {
            manager
                .add_product(ProductCreate { name, description, price, stock })
                .await;
            let notice = manager.add_dialog.dismiss_notice();
            Output { text: render_products(manager.rows()), notice }
        }
    }
}
