use std::io;

use clap::{Args, Subcommand};

use tokri::{
    invoice::{Invoice, format_minor},
    order::{OrderId, OrderRecord, OrderStatus},
};
use tokri_app::{api::data::OrderStatusUpdate, context::AppContext};

use super::require_session;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// List orders, optionally filtered by status
    List(ListOrdersArgs),

    /// Print an order's invoice
    Show(ShowOrderArgs),

    /// Update an order's status and tracking details
    SetStatus(SetStatusArgs),

    /// Delete an order
    Delete(DeleteOrderArgs),
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    /// Only show orders in this status
    #[arg(long, value_enum)]
    status: Option<OrderStatus>,
}

#[derive(Debug, Args)]
struct ShowOrderArgs {
    /// Order id or order number
    #[arg(long)]
    order: String,
}

#[derive(Debug, Args)]
struct SetStatusArgs {
    /// Order id
    #[arg(long)]
    id: String,

    /// New status
    #[arg(long, value_enum)]
    status: OrderStatus,

    /// Courier tracking number
    #[arg(long)]
    tracking: Option<String>,
}

#[derive(Debug, Args)]
struct DeleteOrderArgs {
    /// Order id
    #[arg(long)]
    id: String,
}

pub(crate) async fn run(app: &AppContext, command: OrderCommand) -> Result<(), String> {
    require_session(app)?;

    match command.command {
        OrderSubcommand::List(args) => list(app, args).await,
        OrderSubcommand::Show(args) => show(app, args).await,
        OrderSubcommand::SetStatus(args) => set_status(app, args).await,
        OrderSubcommand::Delete(args) => delete(app, args).await,
    }
}

async fn list(app: &AppContext, args: ListOrdersArgs) -> Result<(), String> {
    let orders = app
        .orders
        .list_orders(args.status)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders");
        return Ok(());
    }

    for order in orders {
        println!("order: {}", order.order_number);
        println!("placed: {}", order.order_date);
        println!("status: {}", order.status);
        println!("customer: {}", order.customer.name);
        println!(
            "total: {}",
            format_minor(order.grand_total).map_err(|error| error.to_string())?
        );
        println!();
    }

    Ok(())
}

async fn show(app: &AppContext, args: ShowOrderArgs) -> Result<(), String> {
    let orders = app
        .orders
        .list_orders(None)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    let order = orders
        .iter()
        .find(|order| matches_reference(order, &args.order))
        .ok_or_else(|| format!("order {} not found", args.order))?;

    Invoice::new(order)
        .write_to(io::stdout())
        .map_err(|error| format!("failed to render invoice: {error}"))
}

async fn set_status(app: &AppContext, args: SetStatusArgs) -> Result<(), String> {
    let order = app
        .orders
        .update_order(
            &OrderId::new(&args.id),
            &OrderStatusUpdate {
                status: args.status,
                tracking_number: args.tracking,
            },
        )
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order {} is now {}", order.order_number, order.status);

    Ok(())
}

async fn delete(app: &AppContext, args: DeleteOrderArgs) -> Result<(), String> {
    app.orders
        .delete_order(&OrderId::new(&args.id))
        .await
        .map_err(|error| format!("failed to delete order: {error}"))?;

    println!("deleted order {}", args.id);

    Ok(())
}

/// An order can be referenced by its backend id or its order number.
fn matches_reference(order: &OrderRecord, reference: &str) -> bool {
    order.order_number == reference
        || order
            .id
            .as_ref()
            .is_some_and(|id| id.as_str() == reference)
}
