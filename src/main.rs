//! Brandseek - AI-powered brand name generation with availability verification
//!
//! Generates brand name candidates with an LLM and keeps the ones whose
//! .com domain shows no registration evidence, looping until enough
//! available names have accumulated.

use brandseek::{
    llm::BrandGenerator,
    run::{RunConfig, RunController},
    types::LlmConfig,
    Result,
};
use indicatif::ProgressBar;
use rand::Rng;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the library
    if let Err(e) = brandseek::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Get command line arguments
    let args: Vec<String> = env::args().collect();

    // Check for help
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    // Determine if user provided a product brief
    let brief = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        String::new()
    };

    // Run the main flow
    if let Err(e) = run_brandseek(&brief).await {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }

    Ok(())
}

/// Main brandseek workflow
async fn run_brandseek(brief: &str) -> Result<()> {
    println!("🔥 Brandseek - AI-powered brand name generation");
    println!("═══════════════════════════════════════════════");
    println!();

    // Set up LLM generator
    let generator = BrandGenerator::new();
    setup_llm_providers(&generator)?;

    let brief = if brief.is_empty() {
        let fallback = random_brief();
        println!("🎲 No brief given, generating brands for: \"{}\"", fallback);
        fallback.to_string()
    } else {
        println!("🎯 Generating brands for: \"{}\"", brief);
        brief.to_string()
    };

    let config = RunConfig::default();
    let target = config.target_available;
    let controller = RunController::new(generator, config);

    println!("🤖 Searching until {} available names are found...", target);
    println!();

    let progress = ProgressBar::new(target as u64);
    let mut accepted = Vec::new();
    let mut pass_number = 0u32;

    while accepted.len() < target {
        pass_number += 1;
        let before = accepted.len();
        let outcome = controller.run_pass(&brief, &mut accepted).await?;

        progress.set_position(accepted.len().min(target) as u64);
        progress.suspend(|| {
            println!(
                "🔍 Pass {}: {} candidates checked, {} new available name(s)",
                pass_number, outcome.candidates, outcome.accepted
            );
            for record in &accepted[before..] {
                println!("   ✅ {} ({})", record.name, record.domain);
            }
        });
    }

    progress.finish_and_clear();
    display_results(&accepted, pass_number);

    Ok(())
}

/// Setup LLM providers from environment variables
fn setup_llm_providers(generator: &BrandGenerator) -> Result<()> {
    // Try to add OpenAI provider
    if let Ok(api_key) = env::var("OPENAI_API_KEY") {
        let config = LlmConfig {
            provider: "openai".to_string(),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string()),
            api_key,
            base_url: env::var("OPENAI_BASE_URL").ok(),
            temperature: 0.5,
        };
        generator.add_provider(&config)?;
        generator.set_default_provider("openai");
        println!("✅ OpenAI provider configured");
    }

    // Try to add Anthropic provider
    if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
        let config = LlmConfig {
            provider: "anthropic".to_string(),
            model: env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| "claude-4-sonnet".to_string()),
            api_key,
            base_url: None,
            temperature: 0.5,
        };
        generator.add_provider(&config)?;
        if !generator.has_provider("openai") {
            generator.set_default_provider("anthropic");
        }
        println!("✅ Anthropic provider configured");
    }

    if !generator.is_ready() {
        return Err(brandseek::BrandSeekError::config(
            "No LLM providers configured. Please set OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.".to_string(),
        ));
    }

    Ok(())
}

/// Fallback product brief when the user gives none
fn random_brief() -> &'static str {
    let briefs = [
        "innovative tech startup",
        "creative digital agency",
        "modern e-commerce platform",
        "AI-powered productivity tool",
        "sustainable lifestyle brand",
        "next-generation mobile app",
        "revolutionary fintech service",
        "online independent bookstore",
    ];

    let mut rng = rand::thread_rng();
    briefs[rng.gen_range(0..briefs.len())]
}

/// Display the accumulated available brands
fn display_results(accepted: &[brandseek::AvailabilityRecord], passes: u32) {
    println!();
    println!("🎉 Available Brands ({}):", accepted.len());
    println!("─────────────────────────");
    for (i, record) in accepted.iter().enumerate() {
        println!("{:2}. {:<20} {}", i + 1, record.name, record.domain);
    }

    println!();
    println!("📈 Summary:");
    println!("   ✅ Available: {}", accepted.len());
    println!("   🔁 Passes: {}", passes);
}

/// Print help information
fn print_help() {
    println!("🔥 Brandseek - AI-powered brand name generation");
    println!("═══════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    brandseek [BRIEF]");
    println!();
    println!("EXAMPLES:");
    println!("    brandseek                           # Generate brands for a random brief");
    println!("    brandseek \"AI productivity app\"     # Generate brands for a product brief");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    OPENAI_API_KEY     OpenAI API key");
    println!("    ANTHROPIC_API_KEY  Anthropic API key");
    println!();
    println!("    OPENAI_MODEL       OpenAI model (default: gpt-4.1-mini)");
    println!("    ANTHROPIC_MODEL    Anthropic model (default: claude-4-sonnet)");
    println!("    OPENAI_BASE_URL    OpenAI-compatible endpoint override");
    println!();
    println!("FEATURES:");
    println!("    • Schema-constrained brand name generation (OpenAI or Anthropic)");
    println!("    • DNS probe plus WHOIS cross-check before accepting a name");
    println!("    • Loops until 20 available .com names have accumulated");
    println!();
    println!("Made with ❤️ and 🦀 Rust");
}
