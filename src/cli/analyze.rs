use anyhow::{Context, Result};
use clap::Args;

use solsight::analysis::{self, AnalysisOutcome, ImageSource, VisionClient};
use solsight::config::Config;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a rooftop image (jpeg/png/gif/webp)
    pub image: Option<String>,

    /// Analyze an image by URL instead of a local file
    #[arg(long, conflicts_with = "image")]
    pub url: Option<String>,

    /// Average monthly electricity bill in USD (overrides config)
    #[arg(short, long)]
    pub bill: Option<f64>,

    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key (overrides the configured environment variable)
    #[arg(long, env = "SOLSIGHT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(model) = args.model {
        config.api.model = model;
    }

    let source = if let Some(url) = args.url {
        ImageSource::Url(url)
    } else if let Some(path) = args.image {
        let expanded = shellexpand::tilde(&path).to_string();
        let data = tokio::fs::read(&expanded)
            .await
            .with_context(|| format!("Failed to read image file: {expanded}"))?;
        let mime = analysis::image::sniff_mime(&data);
        ImageSource::Bytes { data, mime }
    } else {
        anyhow::bail!("Provide an image path or --url <URL>");
    };

    let client = VisionClient::new(&config.api, args.api_key)?;
    let bill = args.bill.unwrap_or(config.analysis.default_monthly_bill_usd);

    tracing::info!("Analyzing rooftop with model {}", client.model());
    let outcome = analysis::run_pipeline(&client, &source, bill).await?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        _ => print_text(&outcome)?,
    }

    Ok(())
}

fn print_text(outcome: &AnalysisOutcome) -> Result<()> {
    println!("== AI Vision Analysis ==");
    println!("{}", serde_json::to_string_pretty(&outcome.analysis)?);

    let sp = &outcome.solar_potential;
    println!("\n== Solar Potential ==");
    println!("Estimated DC capacity:       {:.2} kW", sp.estimated_dc_capacity_kw);
    println!("Estimated number of panels:  {}", sp.num_panels);
    println!(
        "Estimated annual production: {:.0} kWh",
        sp.estimated_annual_production_kwh
    );
    for note in &sp.notes {
        println!("  note: {note}");
    }

    let roi = &outcome.roi_estimate;
    println!("\n== ROI Estimate ==");
    println!("Gross system cost:      ${:.0}", roi.gross_system_cost_usd);
    println!(
        "Net cost after ITC:     ${:.0}",
        roi.net_system_cost_after_itc_usd
    );
    println!(
        "Estimated annual savings: ${:.0}",
        roi.estimated_annual_savings_usd
    );
    println!("Simple payback period:  {} years", roi.simple_payback_years);
    for note in &roi.notes {
        println!("  note: {note}");
    }

    println!("\n== Recommendations ==");
    for rec in &outcome.recommendations {
        println!("- {rec}");
    }

    tracing::debug!("Raw provider response: {}", outcome.raw_response);

    Ok(())
}
