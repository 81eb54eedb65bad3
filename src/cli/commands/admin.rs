use std::io::Write;

use crate::config::Config;
use crate::db::{AdminProvision, Store};

/// Display name given to a freshly created admin.
pub const DEFAULT_ADMIN_NAME: &str = "Admin";

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads the password twice with terminal echo off until both entries match.
fn prompt_password() -> anyhow::Result<String> {
    read_confirmed(|label| rpassword::prompt_password(label))
}

fn read_confirmed(
    mut read: impl FnMut(&str) -> std::io::Result<String>,
) -> anyhow::Result<String> {
    loop {
        let password = read("Password: ")?;
        let confirmation = read("Repeat for confirmation: ")?;

        if password == confirmation {
            return Ok(password);
        }
        println!("Error: The two entered values do not match.");
    }
}

pub async fn cmd_admin(
    config: &Config,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };

    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password must not be empty");
    }

    let store = Store::connect(&config.general).await?;

    match store
        .upsert_admin(&username, &password, DEFAULT_ADMIN_NAME, &config.security)
        .await?
    {
        AdminProvision::Created => println!("Created admin user."),
        AdminProvision::Updated => println!("Updated admin user."),
    }

    println!("Done.");
    Ok(())
}
