use crate::{logging::DealLogsLayer, Status};
use tracing::Level;
use tracing_subscriber::{fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt};

pub struct Tracing;

impl Tracing {
    /// Installs the global subscriber: human readable logs on stderr plus
    /// the structured event collector.
    pub fn setup(name: &str) -> Result<(), Status> {
        Tracing::setup_with_level(name, Level::INFO)
    }

    pub fn setup_with_level(name: &str, level: Level) -> Result<(), Status> {
        match tracing_subscriber::registry()
            .with(DealLogsLayer)
            .with(
                tracing_subscriber::fmt::Layer::new()
                    .with_writer(std::io::stderr.with_max_level(level)),
            )
            .try_init()
        {
            Ok(()) => {
                tracing::debug!("tracing initialised for {name}");
                Ok(())
            }
            Err(e) => {
                eprintln!("{e}");
                Err(Status::new("Failed to setup tracing", e))
            }
        }
    }
}
