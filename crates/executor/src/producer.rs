use tokio::sync::mpsc::Sender;
use tracing::info;

use super::{
    error::Error,
    types::{QueryRequest, QueryStreamer},
};

pub struct Producer<S: QueryStreamer> {
    streamer: S,
}

impl<S> Producer<S>
where
    S: QueryStreamer,
{
    pub fn new(streamer: S) -> Self {
        Producer { streamer }
    }

    /// Runs the streamer on its own task. The sender is dropped when the
    /// stream ends, which closes the channel for the runner.
    pub fn spawn(self, sender: Sender<Vec<QueryRequest>>) -> tokio::task::JoinHandle<Result<(), Error>> {
        info!("Producer ready.");
        tokio::spawn(async move { self.streamer.run_stream(sender).await })
    }
}
