use clap::{Args, Subcommand};

use tokri::{
    invoice,
    products::{ColorOption, Product, ProductId},
};
use tokri_app::{
    api::data::{NewProduct, ProductUpdate},
    catalog::Catalog,
    context::AppContext,
};

use super::require_session;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// List the catalog
    List,

    /// Search the catalog
    Search(SearchArgs),

    /// Show a single product
    Show(ShowArgs),

    /// Create a product
    Create(CreateProductArgs),

    /// Update a product
    Update(UpdateProductArgs),

    /// Delete a product
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search phrase
    query: String,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Product id
    #[arg(long)]
    id: String,
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in minor currency units (poisha)
    #[arg(long)]
    price: u64,

    /// Units in stock
    #[arg(long)]
    stock: u32,

    /// Color variant as `value:name`; repeat for multiple variants
    #[arg(long = "color", value_parser = parse_color)]
    colors: Vec<ColorOption>,

    /// Product image URL
    #[arg(long)]
    image_url: Option<String>,

    /// Product description
    #[arg(long)]
    description: Option<String>,

    /// Category name
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateProductArgs {
    /// Product id
    #[arg(long)]
    id: String,

    /// New product name
    #[arg(long)]
    name: Option<String>,

    /// New unit price in minor currency units (poisha)
    #[arg(long)]
    price: Option<u64>,

    /// New stock count
    #[arg(long)]
    stock: Option<u32>,

    /// Replacement color variants as `value:name`; repeat for multiple
    #[arg(long = "color", value_parser = parse_color)]
    colors: Option<Vec<ColorOption>>,

    /// New image URL
    #[arg(long)]
    image_url: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New category name
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    /// Product id
    #[arg(long)]
    id: String,
}

pub(crate) async fn run(app: &AppContext, command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::List => list(app).await,
        ProductSubcommand::Search(args) => search(app, args).await,
        ProductSubcommand::Show(args) => show(app, args).await,
        ProductSubcommand::Create(args) => create(app, args).await,
        ProductSubcommand::Update(args) => update(app, args).await,
        ProductSubcommand::Delete(args) => delete(app, args).await,
    }
}

async fn list(app: &AppContext) -> Result<(), String> {
    let catalog = Catalog::new(app.products.clone(), app.banners.clone());
    let products = catalog.storefront_products().await;

    if products.is_empty() {
        println!("no products");
        return Ok(());
    }

    for product in products {
        print_product(&product)?;
    }

    Ok(())
}

async fn search(app: &AppContext, args: SearchArgs) -> Result<(), String> {
    let catalog = Catalog::new(app.products.clone(), app.banners.clone());
    let products = catalog.search(&args.query).await;

    if products.is_empty() {
        println!("no products match \"{}\"", args.query);
        return Ok(());
    }

    for product in products {
        print_product(&product)?;
    }

    Ok(())
}

async fn show(app: &AppContext, args: ShowArgs) -> Result<(), String> {
    let catalog = Catalog::new(app.products.clone(), app.banners.clone());

    match catalog.product(&ProductId::new(&args.id)).await {
        Some(product) => print_product(&product),
        None => Err(format!("product {} not found", args.id)),
    }
}

async fn create(app: &AppContext, args: CreateProductArgs) -> Result<(), String> {
    require_session(app)?;

    let product = app
        .products
        .create_product(&NewProduct {
            name: args.name,
            price: args.price,
            stock: args.stock,
            colors: args.colors,
            image_url: args.image_url,
            description: args.description,
            category: args.category,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("created product {}", product.id);

    Ok(())
}

async fn update(app: &AppContext, args: UpdateProductArgs) -> Result<(), String> {
    require_session(app)?;

    let product = app
        .products
        .update_product(
            &ProductId::new(&args.id),
            &ProductUpdate {
                name: args.name,
                price: args.price,
                stock: args.stock,
                colors: args.colors,
                image_url: args.image_url,
                description: args.description,
                category: args.category,
            },
        )
        .await
        .map_err(|error| format!("failed to update product: {error}"))?;

    println!("updated product {}", product.id);
    print_product(&product)?;

    Ok(())
}

async fn delete(app: &AppContext, args: DeleteProductArgs) -> Result<(), String> {
    require_session(app)?;

    app.products
        .delete_product(&ProductId::new(&args.id))
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    println!("deleted product {}", args.id);

    Ok(())
}

fn print_product(product: &Product) -> Result<(), String> {
    println!("id: {}", product.id);
    println!("name: {}", product.name);
    println!(
        "price: {}",
        invoice::format_minor(product.price).map_err(|error| error.to_string())?
    );
    println!("stock: {}", product.stock);

    if !product.colors.is_empty() {
        let colors: Vec<String> = product
            .colors
            .iter()
            .map(|color| format!("{} ({})", color.name, color.value))
            .collect();

        println!("colors: {}", colors.join(", "));
    }

    if let Some(category) = &product.category {
        println!("category: {category}");
    }

    println!();

    Ok(())
}

fn parse_color(raw: &str) -> Result<ColorOption, String> {
    raw.split_once(':')
        .map(|(value, name)| ColorOption::new(value, name))
        .ok_or_else(|| format!("invalid color \"{raw}\", expected value:name"))
}
