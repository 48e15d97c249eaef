//! Account command - balances per account.

use anyhow::Result;
use clap::Args;
use console::Style;
use iol_client::AccountStatus;

use super::Context;
use crate::output::{field, print_header, print_json};

/// Arguments for the account command.
#[derive(Args, Debug)]
pub struct AccountArgs {}

/// Run the account command.
pub async fn run(_args: AccountArgs, ctx: &Context) -> Result<()> {
    let status = ctx
        .with_client(|client| async move { client.get_account_status().await })
        .await?;

    if ctx.json_output {
        print_json(&status)
    } else {
        print_table(&status);
        Ok(())
    }
}

fn print_table(status: &AccountStatus) {
    let dim = Style::new().dim();

    print_header("Account Status");
    println!();

    if status.cuentas.is_empty() {
        println!("  {}", dim.apply_to("No accounts."));
        println!();
        return;
    }

    println!(
        "  {:<12} {:<22} {:<14} {:>16} {:>16}",
        "NUMBER", "TYPE", "CURRENCY", "AVAILABLE", "TOTAL"
    );
    println!("  {}", dim.apply_to("-".repeat(84)));

    for account in &status.cuentas {
        println!(
            "  {:<12} {:<22} {:<14} {:>16} {:>16}",
            field(account, &["numero"]),
            field(account, &["tipo"]),
            field(account, &["moneda"]),
            field(account, &["disponible"]),
            field(account, &["total"]),
        );
    }

    println!();
}
