//! The `Harness` struct and its step loop.

use log::{debug, info};

use tsh_core::{RunConfig, SimRng, Step, StepSnapshot};
use tsh_policy::{Command, StepPolicy};
use tsh_traci::SimulatorLink;

use crate::{RunError, RunObserver, RunResult};

/// One harness run: a simulator link, a policy, and a step budget.
///
/// The harness owns the link exclusively for the duration of the run and
/// guarantees `close` is called on it exactly once, on both the success and
/// the error path.
pub struct Harness<L: SimulatorLink, P: StepPolicy> {
    pub config: RunConfig,
    pub link:   L,
    pub policy: P,
    /// Run-level RNG, seeded from `config.seed`.
    pub rng: SimRng,
    /// Lanes polled for occupancy each step (the configured slot lanes).
    polled_lanes: Vec<String>,
}

impl<L: SimulatorLink, P: StepPolicy> Harness<L, P> {
    pub fn new(config: RunConfig, link: L, policy: P, polled_lanes: Vec<String>) -> Self {
        let rng = SimRng::new(config.seed);
        Self { config, link, policy, rng, polled_lanes }
    }

    /// Run the full step budget, then close the link.
    ///
    /// The link is closed even when a step fails; the step error takes
    /// precedence over any close error in the returned result.
    pub fn run<O: RunObserver>(&mut self, observer: &mut O) -> RunResult<()> {
        let result = self.run_inner(observer);
        let closed = self.link.close();
        result?;
        closed?;
        Ok(())
    }

    fn run_inner<O: RunObserver>(&mut self, observer: &mut O) -> RunResult<()> {
        self.config
            .validate()
            .map_err(|e| RunError::Config(e.to_string()))?;

        info!(
            "starting run: {} steps, recording every {}",
            self.config.total_steps, self.config.record_interval_steps
        );

        for n in 0..self.config.total_steps {
            let step = Step(n);

            self.link.advance_step()?;
            observer.on_step_start(step);

            let snapshot = self.collect_snapshot(step)?;
            let commands = self.policy.plan(&snapshot, &mut self.rng);
            let issued = commands.len();
            for command in commands {
                self.apply(command)?;
            }
            debug!("{step}: {} vehicles, {issued} commands", snapshot.vehicles.len());

            observer.on_step_end(step, &snapshot, issued);
            if self.config.is_record_step(step) {
                observer.on_record(step, &snapshot);
            }

            if let Some(pause) = self.config.step_pacing() {
                std::thread::sleep(pause);
            }
        }

        observer.on_run_end(self.config.end_step());
        info!("run complete at {}", self.config.end_step());
        Ok(())
    }

    /// Poll everything the policies and recorders need for one step.
    ///
    /// Rebuilt from scratch each step — the snapshot is the only carrier of
    /// simulator state, and it does not outlive the step.
    fn collect_snapshot(&mut self, step: Step) -> RunResult<StepSnapshot> {
        let mut snapshot = StepSnapshot::new(step);

        for id in self.link.list_vehicles()? {
            snapshot.vehicles.push(self.link.vehicle_state(&id)?);
        }
        for lane in &self.polled_lanes {
            let count = self.link.lane_vehicle_count(lane)?;
            snapshot.lane_counts.insert(lane.clone(), count);
        }
        Ok(snapshot)
    }

    fn apply(&mut self, command: Command) -> RunResult<()> {
        match command {
            Command::Retarget { vehicle, edge } => {
                self.link.change_target(&vehicle, &edge)?;
            }
        }
        Ok(())
    }
}
