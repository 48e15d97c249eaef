//! Portfolio command - holdings and totals.

use anyhow::Result;
use clap::Args;
use console::Style;
use iol_client::Portfolio;

use super::Context;
use crate::output::{field, print_field, print_header, print_json, truncate};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Portfolio country (default: from config, then argentina)
    #[arg(short, long)]
    pub country: Option<String>,
}

/// Run the portfolio command.
pub async fn run(args: PortfolioArgs, ctx: &Context) -> Result<()> {
    let country = args.country.as_deref().unwrap_or(ctx.config.country());

    let portfolio = ctx
        .with_client(|client| async move { client.get_portfolio(country).await })
        .await?;

    if ctx.json_output {
        print_json(&portfolio)
    } else {
        print_table(&portfolio, country);
        Ok(())
    }
}

fn print_table(portfolio: &Portfolio, country: &str) {
    let dim = Style::new().dim();

    print_header(&format!("Portfolio ({})", country));
    println!();

    if portfolio.activos.is_empty() {
        println!("  {}", dim.apply_to("No assets."));
    } else {
        println!(
            "  {:<10} {:<30} {:>10} {:>14} {:>16}",
            "SYMBOL", "DESCRIPTION", "QUANTITY", "LAST PRICE", "VALUE"
        );
        println!("  {}", dim.apply_to("-".repeat(84)));

        for asset in &portfolio.activos {
            println!(
                "  {:<10} {:<30} {:>10} {:>14} {:>16}",
                truncate(&field(asset, &["titulo", "simbolo"]), 10),
                truncate(&field(asset, &["titulo", "descripcion"]), 30),
                field(asset, &["cantidad"]),
                field(asset, &["ultimoPrecio"]),
                field(asset, &["valorizado"]),
            );
        }
    }

    println!();
    print_field("Total ARS:", field(&portfolio.total, &[]));
    print_field("Total USD:", field(&portfolio.total_usd, &[]));
    println!();
}
