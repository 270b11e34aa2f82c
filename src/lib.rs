//! Brandseek - AI-powered brand name generation with availability verification
//!
//! Generates candidate brand names with an LLM, probes DNS and WHOIS for
//! registration evidence, and accumulates names that appear genuinely
//! unregistered until a target count is reached.

pub mod check;
pub mod error;
pub mod llm;
pub mod run;
pub mod types;

// Re-export commonly used types
pub use error::{BrandSeekError, Result};
pub use types::{
    AvailabilityRecord, Candidate, GenerationConfig, LlmConfig, RegistrationInfo,
};

// Re-export main functionality
pub use check::{aggregate, DnsProber, WhoisClient};
pub use llm::BrandGenerator;
pub use run::{RunConfig, RunController};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
