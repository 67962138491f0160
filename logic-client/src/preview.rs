//! Background compilation for live previews.
//!
//! Requests are queued on a channel and compiled one at a time by a worker
//! thread. When requests pile up while the worker is busy, only the latest
//! is compiled and the others are dropped.

use crossbeam_channel::{unbounded, Receiver, Sender};
use logic_codegen::{compile, GenerationOutput, Request};
use logic_compiler::errors::Result;
use logic_compiler::Loader;
use logic_syntax::ast::Document;
use std::thread::JoinHandle;

/// A compilation request with its sequence number.
#[derive(Debug)]
pub struct Job {
    pub sequence: u64,
    pub document: Document,
    pub request: Request,
}

/// The result of the compilation of a job.
#[derive(Debug)]
pub struct Outcome {
    pub sequence: u64,
    pub result: Result<GenerationOutput>,
}

/// Drains the queue, keeping only the most recent job.
pub fn latest(first: Job, jobs: &Receiver<Job>) -> Job {
    jobs.try_iter().fold(first, |skipped, job| {
        log::debug!("dropping preview request {}", skipped.sequence);
        job
    })
}

pub struct Preview {
    jobs: Option<Sender<Job>>,
    outcomes: Receiver<Outcome>,
    worker: Option<JoinHandle<()>>,
    sequence: u64,
}

impl Preview {
    /// Starts the worker thread, which owns the loader.
    pub fn spawn<L: Loader + Send + 'static>(mut loader: L) -> Self {
        let (jobs, queue) = unbounded::<Job>();
        let (results, outcomes) = unbounded::<Outcome>();
        let worker = std::thread::spawn(move || {
            while let Ok(job) = queue.recv() {
                let job = latest(job, &queue);
                log::debug!("compiling preview request {}", job.sequence);
                let result = compile(job.document, &job.request, &mut loader);
                let outcome = Outcome {
                    sequence: job.sequence,
                    result,
                };
                if results.send(outcome).is_err() {
                    break;
                }
            }
        });
        Preview {
            jobs: Some(jobs),
            outcomes,
            worker: Some(worker),
            sequence: 0,
        }
    }

    /// Queues a request, returning its sequence number.
    pub fn submit(&mut self, document: Document, request: Request) -> u64 {
        self.sequence += 1;
        let job = Job {
            sequence: self.sequence,
            document,
            request,
        };
        if let Some(jobs) = &self.jobs {
            if jobs.send(job).is_err() {
                log::warn!("preview worker has stopped");
            }
        }
        self.sequence
    }

    pub fn outcomes(&self) -> &Receiver<Outcome> {
        &self.outcomes
    }

    /// Waits for the outcome of the given request, skipping older ones.
    /// Returns `None` if the worker stopped first.
    pub fn wait_for(&self, sequence: u64) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.sequence >= sequence)
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("preview worker panicked");
            }
        }
    }
}
