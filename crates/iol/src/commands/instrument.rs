//! Instrument command - details for a single symbol.

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use super::Context;
use crate::output::{field, print_field, print_header, print_json};

/// Arguments for the instrument command.
#[derive(Args, Debug)]
pub struct InstrumentArgs {
    /// Instrument symbol, e.g. GGAL
    pub symbol: String,

    /// Market (default: from config, then bCBA)
    #[arg(short, long)]
    pub market: Option<String>,
}

/// Run the instrument command.
pub async fn run(args: InstrumentArgs, ctx: &Context) -> Result<()> {
    let market = args.market.as_deref().unwrap_or(ctx.config.market());
    let symbol = args.symbol.as_str();

    let detail = ctx
        .with_client(|client| async move { client.get_instrument_detail(symbol, market).await })
        .await?;

    if ctx.json_output || ctx.verbose {
        return print_json(&detail);
    }

    print_summary(&detail, symbol, market);
    Ok(())
}

fn print_summary(detail: &Value, symbol: &str, market: &str) {
    print_header(&format!("{} ({})", symbol, market));
    println!();
    print_field("Symbol:", field(detail, &["simbolo"]));
    print_field("Description:", field(detail, &["descripcion"]));
    print_field("Type:", field(detail, &["tipo"]));
    print_field("Currency:", field(detail, &["moneda"]));
    print_field("Market:", field(detail, &["mercado"]));
    print_field("Last price:", field(detail, &["ultimoPrecio"]));
    println!();
}
