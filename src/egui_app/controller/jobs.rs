use std::sync::{
    Arc,
    mpsc::{Receiver, Sender},
};
use std::thread;

use crate::prediction::{FormInput, PredictError, PredictionBackend, PredictionResult};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJob {
    pub(crate) request_id: u64,
    pub(crate) input: FormInput,
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<PredictionResult, PredictError>,
}

/// Background work owned by the controller, reported back over one channel.
pub(crate) struct ControllerJobs {
    backend: Arc<dyn PredictionBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_request_id: u64,
    prediction_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn PredictionBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
            next_request_id: 1,
            prediction_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn prediction_in_progress(&self) -> bool {
        self.prediction_in_progress
    }

    /// Allocate the id for the next prediction request.
    pub(super) fn next_prediction_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        id
    }

    /// Spawn the request on a worker thread; ignored while one is in flight.
    ///
    /// The worker owns its copy of the input and never gets cancelled. If the
    /// controller is gone by the time it finishes, the result is dropped.
    pub(super) fn begin_prediction(&mut self, job: PredictionJob) -> bool {
        if self.prediction_in_progress {
            return false;
        }
        self.prediction_in_progress = true;
        let tx = self.message_tx.clone();
        let backend = Arc::clone(&self.backend);
        thread::spawn(move || {
            let result = backend.predict(&job.input);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult {
                request_id: job.request_id,
                result,
            }));
        });
        true
    }

    pub(super) fn clear_prediction(&mut self) {
        self.prediction_in_progress = false;
    }
}
