use clap::{Args, Subcommand};

use tokri_app::{
    api::data::{Banner, BannerId, BannerUpdate, NewBanner},
    context::AppContext,
};

use super::require_session;

#[derive(Debug, Args)]
pub(crate) struct BannerCommand {
    #[command(subcommand)]
    command: BannerSubcommand,
}

#[derive(Debug, Subcommand)]
enum BannerSubcommand {
    /// List all banners
    List,

    /// Create a banner
    Create(CreateBannerArgs),

    /// Update a banner
    Update(UpdateBannerArgs),

    /// Delete a banner
    Delete(DeleteBannerArgs),
}

#[derive(Debug, Args)]
struct CreateBannerArgs {
    /// Banner title
    #[arg(long)]
    title: String,

    /// Banner image URL
    #[arg(long)]
    image_url: String,

    /// Link the banner points at
    #[arg(long)]
    link: Option<String>,

    /// Show the banner on the storefront immediately
    #[arg(long, default_value_t = false)]
    active: bool,
}

#[derive(Debug, Args)]
struct UpdateBannerArgs {
    /// Banner id
    #[arg(long)]
    id: String,

    /// New title
    #[arg(long)]
    title: Option<String>,

    /// New image URL
    #[arg(long)]
    image_url: Option<String>,

    /// New link
    #[arg(long)]
    link: Option<String>,

    /// Switch the banner on or off
    #[arg(long)]
    active: Option<bool>,
}

#[derive(Debug, Args)]
struct DeleteBannerArgs {
    /// Banner id
    #[arg(long)]
    id: String,
}

pub(crate) async fn run(app: &AppContext, command: BannerCommand) -> Result<(), String> {
    match command.command {
        BannerSubcommand::List => list(app).await,
        BannerSubcommand::Create(args) => create(app, args).await,
        BannerSubcommand::Update(args) => update(app, args).await,
        BannerSubcommand::Delete(args) => delete(app, args).await,
    }
}

async fn list(app: &AppContext) -> Result<(), String> {
    let banners = app
        .banners
        .list_banners()
        .await
        .map_err(|error| format!("failed to list banners: {error}"))?;

    if banners.is_empty() {
        println!("no banners");
        return Ok(());
    }

    for banner in banners {
        print_banner(&banner);
    }

    Ok(())
}

async fn create(app: &AppContext, args: CreateBannerArgs) -> Result<(), String> {
    require_session(app)?;

    let banner = app
        .banners
        .create_banner(&NewBanner {
            title: args.title,
            image_url: args.image_url,
            link: args.link,
            active: args.active,
        })
        .await
        .map_err(|error| format!("failed to create banner: {error}"))?;

    println!("created banner {}", banner.id);

    Ok(())
}

async fn update(app: &AppContext, args: UpdateBannerArgs) -> Result<(), String> {
    require_session(app)?;

    let banner = app
        .banners
        .update_banner(
            &BannerId::new(&args.id),
            &BannerUpdate {
                title: args.title,
                image_url: args.image_url,
                link: args.link,
                active: args.active,
            },
        )
        .await
        .map_err(|error| format!("failed to update banner: {error}"))?;

    println!("updated banner {}", banner.id);
    print_banner(&banner);

    Ok(())
}

async fn delete(app: &AppContext, args: DeleteBannerArgs) -> Result<(), String> {
    require_session(app)?;

    app.banners
        .delete_banner(&BannerId::new(&args.id))
        .await
        .map_err(|error| format!("failed to delete banner: {error}"))?;

    println!("deleted banner {}", args.id);

    Ok(())
}

fn print_banner(banner: &Banner) {
    println!("id: {}", banner.id);
    println!("title: {}", banner.title);
    println!("image_url: {}", banner.image_url);
    println!(
        "link: {}",
        banner.link.as_deref().unwrap_or("none")
    );
    println!("active: {}", banner.active);
    println!();
}
