//! Extract metadata for a URL given on the command line.
//!
//! Runs the structural and fallback strategies only, so it works without
//! render or vision credentials:
//!
//! ```sh
//! cargo run -p extraction --example extract_url -- https://www.rust-lang.org/
//! ```

use std::sync::Arc;

use extraction::{FallbackStrategy, Orchestrator, PipelineConfig, Strategy, StructuralStrategy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.rust-lang.org/".to_string());

    let config = PipelineConfig::default();
    let strategies: Vec<Arc<dyn Strategy>> = vec![
        Arc::new(StructuralStrategy::new(&config)?),
        Arc::new(FallbackStrategy::new()),
    ];
    let orchestrator = Orchestrator::new(strategies, &config);

    let outcome = orchestrator.run(&url, None).await?;

    println!("strategy:   {}", outcome.strategy);
    println!("confidence: {:.2}", outcome.confidence);
    println!("canonical:  {}", outcome.canonical_url);
    println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    Ok(())
}
