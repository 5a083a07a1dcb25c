//
//  scribe-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! The token is stored in the system keyring under the configured host. A
//! 401 from any command clears it, after which `scribe auth login` is needed
//! again.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::json;

use crate::api::{ApiError, User};
use crate::auth::mask_token;
use crate::context::AppContext;
use crate::interactive::{prompt_input, prompt_password, read_secret_from_stdin};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with email and password
    Login(LoginArgs),

    /// Forget the stored token
    Logout,

    /// Show the current user and token state
    Status(StatusArgs),

    /// Print the stored token
    Token,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email (prompted for when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the full token instead of a masked one
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = AppContext::resolve(global)?;
        match &self.command {
            AuthSubcommand::Login(args) => login(&ctx, args).await,
            AuthSubcommand::Logout => logout(&ctx),
            AuthSubcommand::Status(args) => status(&ctx, args).await,
            AuthSubcommand::Token => token(&ctx),
        }
    }
}

async fn login(ctx: &AppContext, args: &LoginArgs) -> Result<()> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt_input("Email")?,
    };
    let password = if args.password_stdin {
        read_secret_from_stdin()?
    } else {
        prompt_password("Password")?
    };

    ctx.client.auth().login(&email, &password).await?;

    ctx.output
        .write_success(&format!("Logged in to {} as {}", ctx.host(), email));
    if ctx.output.is_json() {
        ctx.output
            .write_value(&json!({"host": ctx.host(), "email": email, "logged_in": true}))?;
    }
    Ok(())
}

fn logout(ctx: &AppContext) -> Result<()> {
    ctx.client.auth().logout()?;
    ctx.output.write_success(&format!("Logged out of {}", ctx.host()));
    Ok(())
}

async fn status(ctx: &AppContext, args: &StatusArgs) -> Result<()> {
    let Some(token) = ctx.client.tokens().get()? else {
        bail!("Not logged in to {}. Run 'scribe auth login' first.", ctx.host());
    };

    let user = match ctx.client.auth().me().await {
        Ok(response) => Some(response.json::<User>()?),
        Err(e @ ApiError::Unauthorized { .. }) => return Err(e.into()),
        Err(e) => {
            ctx.output
                .write_warning(&format!("Could not fetch the current user: {}", e));
            None
        }
    };

    let shown = if args.show_token {
        token
    } else {
        mask_token(&token)
    };

    if ctx.output.is_json() {
        return ctx.output.write_value(&json!({
            "host": ctx.host(),
            "user": user,
            "token": shown,
            "prefix": ctx.client.current_prefix().to_string(),
        }));
    }

    println!("{}", style(ctx.host()).bold());
    if let Some(user) = user {
        let name = user.full_name.or(user.email).unwrap_or(user.id);
        println!("  Logged in as {}", style(name).green());
    }
    println!("  Token: {}", shown);
    println!("  Route prefix: {}", ctx.client.current_prefix());
    Ok(())
}

fn token(ctx: &AppContext) -> Result<()> {
    match ctx.client.tokens().get()? {
        Some(token) => {
            println!("{}", token);
            Ok(())
        }
        None => bail!("Not logged in to {}", ctx.host()),
    }
}
