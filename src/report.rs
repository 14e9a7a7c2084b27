//! Report rendering: human-readable text or JSON

use std::fmt::Write as _;

use keymix_core::{Digest, DIGEST_BITS};
use serde::Serialize;

use crate::harness::{
    AvalancheResult, CollisionResult, DiffusionResult, Harness, KeyedHash, PreimageResult,
};

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How a digest is written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputEncoding {
    /// The 28 digest bytes as-is
    Raw,
    /// Lowercase hexadecimal
    #[default]
    Hex,
}

impl OutputEncoding {
    pub fn encode(self, digest: &Digest) -> Vec<u8> {
        match self {
            Self::Raw => digest.to_vec(),
            Self::Hex => hex::encode(digest).into_bytes(),
        }
    }
}

/// Results of all four measurements for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub function: String,
    pub key: String,
    pub input: String,
    pub seed: u64,
    #[serde(serialize_with = "hex::serialize")]
    pub digest: Digest,
    pub trials: usize,
    pub iterations: u64,
    pub avalanche: AvalancheResult,
    pub diffusion: DiffusionResult,
    pub collision: CollisionResult,
    pub preimage: PreimageResult,
}

impl Report {
    /// Run avalanche and diffusion with `trials`, collision sampling with
    /// `iterations` samples, and a preimage search for the digest of `input`
    /// with `iterations` attempts over candidates of `input`'s length
    pub fn run<H: KeyedHash + ?Sized>(
        harness: &Harness<'_, H>,
        function: &str,
        input: &[u8],
        trials: usize,
        iterations: u64,
    ) -> Self {
        let digest = harness.digest(input);

        Self {
            function: function.to_string(),
            key: String::from_utf8_lossy(harness.key().as_bytes()).into_owned(),
            input: String::from_utf8_lossy(input).into_owned(),
            seed: harness.seed(),
            digest,
            trials,
            iterations,
            avalanche: harness.avalanche(input, trials),
            diffusion: harness.diffusion(input, trials),
            collision: harness.collision(iterations),
            preimage: harness.preimage(&digest, input.len(), iterations),
        }
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== KeyMix Harness ===");
        let _ = writeln!(out, "Function:   {}", self.function);
        let _ = writeln!(out, "Key:        {}", self.key);
        let _ = writeln!(out, "Input:      {}", self.input);
        let _ = writeln!(out, "Seed:       {}", self.seed);
        let _ = writeln!(out, "Digest:     {}", hex::encode(self.digest));
        let _ = writeln!(
            out,
            "Avalanche:  {:.2}% ({:.2} of {} bits over {} trials)",
            self.avalanche.percentage(),
            self.avalanche.average,
            DIGEST_BITS,
            self.avalanche.distances.len()
        );
        let _ = writeln!(out, "Diffusion:  {:.2}%", self.diffusion * 100.0);
        let _ = writeln!(
            out,
            "Collisions: {} of {} ({:.6}%)",
            self.collision.collisions,
            self.collision.iterations,
            self.collision.rate() * 100.0
        );
        let _ = match &self.preimage {
            PreimageResult::Found { candidate, tries } => writeln!(
                out,
                "Preimage:   found {} after {} tries",
                hex::encode(candidate),
                tries
            ),
            PreimageResult::NotFound { tries_exhausted } => writeln!(
                out,
                "Preimage:   not found after {} tries",
                tries_exhausted
            ),
        };
        out
    }
}
