use super::ui::{self, StyleType};
use crate::core::conversion::{Conversion, ConversionRequest, Severity, to_cents};
use crate::core::resolver::RateResolver;
use anyhow::Result;
use tracing::info;

/// Converts a single amount and prints the result as a table.
pub async fn run(resolver: &RateResolver, amount: &str, from: &str, to: &str) -> Result<()> {
    let outcome = match ConversionRequest::from_input(amount, from, to) {
        Ok(request) => {
            let pb = ui::new_spinner("Fetching exchange rates...");
            let outcome = resolver.resolve(&request).await;
            pb.finish_and_clear();
            outcome
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(conversion) => {
            info!(provider = conversion.provider, "{}", conversion);
            print_conversion(&conversion);
            Ok(())
        }
        Err(e) => {
            let style_type = match e.severity() {
                Severity::Warning => StyleType::Warning,
                _ => StyleType::Error,
            };
            eprintln!("{}", ui::style_text(&e.to_string(), style_type));
            Err(e.into())
        }
    }
}

fn print_conversion(conversion: &Conversion) {
    let request = &conversion.request;

    println!("{}", ui::style_text("Conversion", StyleType::Title));
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(request.source().as_str()),
        ui::header_cell(request.target().as_str()),
    ]);
    table.add_row(vec![
        ui::amount_cell(&format!("{:.2}", to_cents(request.amount())), false),
        ui::amount_cell(&format!("{:.2}", to_cents(conversion.converted)), true),
    ]);
    println!("{table}");
    println!("{}", ui::style_text(&conversion.to_string(), StyleType::Success));
    println!(
        "{}",
        ui::style_text(&format!("Rates from {}", conversion.provider), StyleType::Subtle)
    );
}
