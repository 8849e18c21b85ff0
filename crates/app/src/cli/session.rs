use clap::Args;
use jiff::Timestamp;

use tokri_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Admin username
    #[arg(long)]
    username: String,

    /// Admin password
    #[arg(long, env = "TOKRI_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(app: &AppContext, args: LoginArgs) -> Result<(), String> {
    let session = app
        .auth
        .login(&args.username, &args.password, Timestamp::now())
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    println!("logged in as {}", session.username);
    println!("the session expires in 24 hours");

    Ok(())
}

pub(crate) fn logout(app: &AppContext) -> Result<(), String> {
    app.auth
        .logout()
        .map_err(|error| format!("logout failed: {error}"))?;

    println!("logged out");

    Ok(())
}
