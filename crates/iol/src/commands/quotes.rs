//! Quotes command - market panel for an instrument type.

use anyhow::Result;
use clap::Args;
use console::Style;
use iol_client::{Quote, QuotesQuery};

use super::Context;
use crate::output::{field, print_header, print_json, truncate};

/// Arguments for the quotes command.
#[derive(Args, Debug)]
pub struct QuotesArgs {
    /// Instrument type: acciones, bonos, cedears, opciones, ... (default: from config)
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Market country (default: from config, then argentina)
    #[arg(short, long)]
    pub country: Option<String>,

    /// Show at most this many quotes
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Run the quotes command.
pub async fn run(args: QuotesArgs, ctx: &Context) -> Result<()> {
    let query = QuotesQuery {
        instrument: args
            .instrument
            .unwrap_or_else(|| ctx.config.instrument().to_string()),
        country: args
            .country
            .unwrap_or_else(|| ctx.config.country().to_string()),
    };

    let query = &query;
    let mut quotes = ctx
        .with_client(|client| async move { client.get_quotes(query).await })
        .await?;

    if let Some(limit) = args.limit {
        quotes.truncate(limit);
    }

    if ctx.json_output {
        print_json(&quotes)
    } else {
        print_table(&quotes, query);
        Ok(())
    }
}

fn print_table(quotes: &[Quote], query: &QuotesQuery) {
    let dim = Style::new().dim();

    print_header(&format!("Quotes: {} ({})", query.instrument, query.country));
    println!();

    if quotes.is_empty() {
        println!("  {}", dim.apply_to("No quotes."));
        println!();
        return;
    }

    println!(
        "  {:<10} {:<30} {:>14} {:>10} {:>14}",
        "SYMBOL", "DESCRIPTION", "LAST PRICE", "CHANGE %", "VOLUME"
    );
    println!("  {}", dim.apply_to("-".repeat(82)));

    for quote in quotes {
        println!(
            "  {:<10} {:<30} {:>14} {:>10} {:>14}",
            truncate(&field(quote, &["simbolo"]), 10),
            truncate(&field(quote, &["descripcion"]), 30),
            field(quote, &["ultimoPrecio"]),
            field(quote, &["variacionPorcentual"]),
            field(quote, &["volumen"]),
        );
    }

    println!();
    println!("  {}", dim.apply_to(format!("{} quotes", quotes.len())));
    println!();
}
