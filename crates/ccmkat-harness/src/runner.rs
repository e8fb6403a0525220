//! Runs vectors through the validator and engine and judges the output.
//!
//! Each vector goes through the same pipeline:
//!
//! ```text
//! validate → check_lengths → build oracle → seal → checks
//! ```
//!
//! The oracle is built from the validated key by a factory closure only
//! after both validation steps pass, so a rejected vector never constructs
//! or calls a block cipher.

use std::{panic, thread};

use ccmkat_crypto::{Aes128Oracle, BlockCipher, Key, check_lengths, seal, validate};

use crate::{
    checks::{CheckRegistry, Observation},
    outcome::{FailureReason, Outcome, VectorReport},
    summary::Summary,
    vector::TestVector,
};

/// Run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Worker threads for [`Harness::run_all_parallel`]. Values below 2 run
    /// sequentially.
    pub jobs: usize,
    /// Keep the computed `ciphertext ‖ tag` in each report.
    pub capture_output: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { jobs: 1, capture_output: false }
    }
}

/// Factory type of the production oracle.
pub type Aes128Factory = fn(&Key) -> Aes128Oracle;

/// Conformance harness over an oracle factory.
pub struct Harness<F> {
    oracle: F,
    checks: CheckRegistry,
    config: RunConfig,
}

impl Harness<Aes128Factory> {
    /// Harness backed by the AES-128 oracle.
    pub fn aes128() -> Self {
        Self::new(Aes128Oracle::new as Aes128Factory)
    }
}

impl<F> Harness<F> {
    /// Harness over `oracle` with the standard checks and default config.
    pub fn new(oracle: F) -> Self {
        Self { oracle, checks: CheckRegistry::standard(), config: RunConfig::default() }
    }

    /// Replace the run settings.
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the output checks.
    pub fn with_checks(mut self, checks: CheckRegistry) -> Self {
        self.checks = checks;
        self
    }

    /// Current run settings.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run one vector.
    pub fn run<C>(&self, vector: &TestVector) -> VectorReport
    where
        F: Fn(&Key) -> C,
        C: BlockCipher,
    {
        let span = tracing::debug_span!("vector", id = %vector.id);
        let _enter = span.enter();

        let (outcome, output) = match self.compute::<C>(vector) {
            Ok(output) => {
                let observation = Observation { expected: &vector.expected, actual: &output };
                let outcome = match self.checks.check_first(&observation) {
                    Ok(()) => Outcome::Pass,
                    Err(reason) => Outcome::Fail(reason),
                };
                (outcome, Some(output))
            },
            Err(reason) => (Outcome::Fail(reason), None),
        };

        match &outcome {
            Outcome::Pass => tracing::debug!("vector passed"),
            Outcome::Fail(reason) => {
                tracing::warn!(tag = reason.tag(), %reason, "vector failed");
            },
        }

        VectorReport {
            id: vector.id.clone(),
            outcome,
            output: output.filter(|_| self.config.capture_output),
        }
    }

    /// Run vectors sequentially, in input order.
    pub fn run_all<C>(&self, vectors: &[TestVector]) -> Summary
    where
        F: Fn(&Key) -> C,
        C: BlockCipher,
    {
        let summary: Summary = vectors.iter().map(|v| self.run::<C>(v)).collect();
        log_summary(&summary);
        summary
    }

    /// Run vectors across `config.jobs` scoped worker threads.
    ///
    /// Vectors are split into contiguous chunks, one per worker. Each worker
    /// builds its own oracles and collects its own reports; reports are
    /// concatenated in chunk order afterwards, so the summary matches
    /// [`Harness::run_all`] exactly.
    pub fn run_all_parallel<C>(&self, vectors: &[TestVector]) -> Summary
    where
        F: Fn(&Key) -> C + Sync,
        C: BlockCipher,
    {
        let jobs = self.config.jobs;
        if jobs <= 1 || vectors.len() <= 1 {
            return self.run_all::<C>(vectors);
        }

        let chunk_size = vectors.len().div_ceil(jobs).max(1);
        tracing::debug!(jobs, chunk_size, total = vectors.len(), "running in parallel");

        let reports: Vec<VectorReport> = thread::scope(|scope| {
            let workers: Vec<_> = vectors
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk.iter().map(|v| self.run::<C>(v)).collect::<Vec<VectorReport>>()
                    })
                })
                .collect();

            workers
                .into_iter()
                .flat_map(|worker| match worker.join() {
                    Ok(reports) => reports,
                    Err(payload) => panic::resume_unwind(payload),
                })
                .collect()
        });

        let summary = Summary::from_reports(reports);
        log_summary(&summary);
        summary
    }

    fn compute<C>(&self, vector: &TestVector) -> Result<Vec<u8>, FailureReason>
    where
        F: Fn(&Key) -> C,
        C: BlockCipher,
    {
        let params = validate(vector.key.as_deref(), vector.nonce.as_deref(), vector.mlen)?;
        check_lengths(vector.header.len(), vector.plaintext.len())?;

        let cipher = (self.oracle)(params.key());
        let sealed = seal(&cipher, &params, &vector.header, &vector.plaintext)?;
        Ok(sealed.into_bytes())
    }
}

fn log_summary(summary: &Summary) {
    if summary.is_success() {
        tracing::info!(passed = summary.count_pass(), "conformance run passed");
    } else {
        tracing::info!(
            passed = summary.count_pass(),
            failed = summary.count_fail(),
            "conformance run failed"
        );
    }
}
