/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::io;
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, OutputFormat, SimulationConfig, SimulationParams};
use crate::elevator::{ElevatorConsumer, Fleet};
use crate::floor::FloorProducer;
use crate::registry::CallRegistry;
use crate::shared::{ElevatorReport, ProgressEvent, SimulationSummary};
use crate::simulation::Narrator;

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("failed to spawn thread '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("thread '{0}' panicked")]
    ThreadPanicked(String),
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * # Simulation
 * Wires one producer thread per floor and one consumer thread per elevator around a shared
 * `CallRegistry`, and a narrator thread for the progress events.
 *
 * Shutdown order: producers are joined first, since only they know when the last call has
 * been generated. The registry is then closed, which wakes every waiting consumer, and the
 * consumers are joined. The narrator goes last, after the final event.
 */
pub struct Simulation {
    params: SimulationParams,
    config: SimulationConfig,
    format: OutputFormat,
}

impl Simulation {
    pub fn new(params: SimulationParams, config: &Config) -> Simulation {
        Simulation {
            params,
            config: config.simulation.clone(),
            format: config.output.format,
        }
    }

    pub fn run(&self) -> Result<SimulationSummary, SimulationError> {
        let fleet = Arc::new(Fleet::new(self.params.n_elevators));
        let registry = Arc::new(CallRegistry::new(
            self.params.n_floors,
            self.params.n_calls,
            fleet.clone(),
        ));
        let (event_tx, event_rx) = cbc::unbounded::<ProgressEvent>();

        let narrator = Narrator::new(self.format, event_rx);
        let narrator_thread = spawn("narrator".to_string(), move || narrator.run())?;

        let result = self.run_workers(&registry, &fleet, &event_tx);

        // Also reached on errors, so consumers never wait on a registry nobody closes
        registry.close();

        let generated = registry.generated_count();
        let serviced = registry.serviced_count();
        let _ = event_tx.send(ProgressEvent::SimulationComplete {
            generated,
            serviced,
        });
        drop(event_tx);
        join("narrator".to_string(), narrator_thread)?;

        let elevators = result?;
        Ok(SimulationSummary {
            n_floors: self.params.n_floors,
            n_elevators: self.params.n_elevators,
            generated,
            serviced,
            elevators,
        })
    }

    fn run_workers(
        &self,
        registry: &Arc<CallRegistry>,
        fleet: &Arc<Fleet>,
        event_tx: &cbc::Sender<ProgressEvent>,
    ) -> Result<Vec<ElevatorReport>, SimulationError> {
        let mut consumers = Vec::with_capacity(self.params.n_elevators);
        for id in 0..self.params.n_elevators {
            let consumer = ElevatorConsumer::new(
                id,
                &self.config,
                registry.clone(),
                fleet.clone(),
                event_tx.clone(),
            );
            let name = format!("elevator-{}", id);
            consumers.push((name.clone(), spawn(name, move || consumer.run())?));
        }
        log::info!("Started {} elevator threads", consumers.len());

        let mut producers = Vec::with_capacity(self.params.n_floors as usize);
        for floor in 0..self.params.n_floors {
            let producer = FloorProducer::new(floor, &self.config, registry.clone(), event_tx.clone());
            let name = format!("floor-{}", floor);
            producers.push((name.clone(), spawn(name, move || producer.run())?));
        }
        log::info!("Started {} floor threads", producers.len());

        for (name, handle) in producers {
            let created = join(name.clone(), handle)?;
            log::debug!("{} finished after {} calls", name, created);
        }
        log::info!(
            "All floor threads finished, {} calls generated",
            registry.generated_count()
        );

        registry.close();

        let mut reports = Vec::with_capacity(consumers.len());
        for (name, handle) in consumers {
            reports.push(join(name, handle)?);
        }
        log::info!("All elevator threads finished");

        let unserviced: Vec<usize> = registry
            .calls()
            .iter()
            .filter(|call| !call.serviced)
            .map(|call| call.id)
            .collect();
        if !unserviced.is_empty() {
            log::warn!("Calls left unserviced: {:?}", unserviced);
        }

        Ok(reports)
    }
}

fn spawn<T, F>(name: String, f: F) -> Result<JoinHandle<T>, SimulationError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Builder::new()
        .name(name.clone())
        .spawn(f)
        .map_err(|source| SimulationError::Spawn { name, source })
}

fn join<T>(name: String, handle: JoinHandle<T>) -> Result<T, SimulationError> {
    handle
        .join()
        .map_err(|_| SimulationError::ThreadPanicked(name))
}
