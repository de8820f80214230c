use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

use clinic_client::ClinicApi;

use crate::loader::{AppointmentLoader, PatientLoader};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Owns the periodic refresh task. Dropping the handle leaves the task
/// running for the life of the runtime; `cancel` stops it.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stops future ticks. Loads already started by a tick run to completion.
    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Reload both lists every `period`, first tick one period from now.
///
/// Each tick's loads run in their own task so a slow backend never delays
/// the next tick; overlapping loads are left to race.
pub fn spawn_refresh<A: ClinicApi>(
    patients: PatientLoader<A>,
    appointments: AppointmentLoader<A>,
    period: Duration,
) -> RefreshHandle {
    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);

        loop {
            interval.tick().await;
            debug!("Periodic refresh");

            let patients = patients.clone();
            let appointments = appointments.clone();
            tokio::spawn(async move {
                futures_util::future::join(patients.load(), appointments.load()).await;
            });
        }
    });

    RefreshHandle { task }
}
