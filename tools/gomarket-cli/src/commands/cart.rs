//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use gomarket_cart::{CartItem, CartStore, NewCartItem, ProductId};
use gomarket_kv::{FileStore, KvStore};

use super::{AddArgs, QuantityArgs, ResetArgs};
use crate::context::Context;
use crate::output::{format_price, truncate};

const WIDTHS: [usize; 4] = [16, 32, 5, 10];

/// Print the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart().await?;
    print_cart(&cart, ctx);
    Ok(())
}

/// Add a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    if !args.price.is_finite() || args.price < 0.0 {
        bail!("Price must be a non-negative number, got {}", args.price);
    }

    let cart = ctx.open_cart().await?;
    let id = ProductId::new(args.id);

    let already_present = cart.contains(&id);

    let product = NewCartItem::new(id.clone(), args.title, args.image_url, args.price);
    cart.add_to_cart(product).await?;

    if already_present {
        ctx.output.warn(&format!(
            "{} is already in the cart; use `gomarket inc {}`",
            id, id
        ));
    } else {
        ctx.output.success(&format!("Added {}", id));
    }
    print_cart(&cart, ctx);
    Ok(())
}

/// Increase a product's quantity.
pub async fn increment(args: QuantityArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart().await?;
    let id = ProductId::new(args.id);

    if !cart.contains(&id) {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    cart.increment(&id).await?;

    if let Some(item) = cart.get(&id) {
        ctx.output.success(&format!("{} × {}", item.id, item.quantity));
    }
    print_cart(&cart, ctx);
    Ok(())
}

/// Decrease a product's quantity.
pub async fn decrement(args: QuantityArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart().await?;
    let id = ProductId::new(args.id);

    let was_present = cart.contains(&id);
    if !was_present {
        ctx.output.warn(&format!("{} is not in the cart", id));
    }
    cart.decrement(&id).await?;

    match cart.get(&id) {
        Some(item) => ctx.output.success(&format!("{} × {}", item.id, item.quantity)),
        None if was_present => ctx.output.success(&format!("Removed {}", id)),
        None => {}
    }
    print_cart(&cart, ctx);
    Ok(())
}

/// Delete the saved snapshot.
pub async fn reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let key = ctx.config.cart.storage_key.as_str();

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the saved cart in {}?", store.base_path().display()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    store.delete(key).await?;
    ctx.output.success("Cart cleared");
    Ok(())
}

fn print_cart(cart: &CartStore<FileStore>, ctx: &Context) {
    let items = cart.products();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "products": items,
            "item_count": cart.item_count(),
        }));
        return;
    }

    ctx.output.header("Cart");

    if items.is_empty() {
        ctx.output.info("The cart is empty.");
        return;
    }

    ctx.output.table_row(&["ID", "TITLE", "QTY", "PRICE"], &WIDTHS);
    for item in &items {
        print_row(item, ctx);
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "{} product(s), {} item(s)",
        items.len(),
        cart.item_count()
    ));
}

fn print_row(item: &CartItem, ctx: &Context) {
    let title = truncate(&item.title, WIDTHS[1]);
    let quantity = item.quantity.to_string();
    let price = format_price(item.price);
    ctx.output
        .table_row(&[item.id.as_str(), &title, &quantity, &price], &WIDTHS);
}
