use std::{fmt, sync::Arc};

use tracing::{info, warn};

use super::{LedgerSnapshot, PersistenceGateway};
use crate::{errors::SaveError, ledger::Clock, ledger::Ledger};

/// Where the ledger opened at startup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    Sample,
    Default,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadSource::Primary => "saved ledger",
            LoadSource::Sample => "sample data",
            LoadSource::Default => "empty ledger",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct StartupLedger {
    pub ledger: Ledger,
    pub source: LoadSource,
}

/// Opens the ledger from `primary`, falling back to `sample` and finally to an empty
/// default ledger. Read failures are logged and never fatal.
pub fn load_or_default(
    primary: &dyn PersistenceGateway,
    sample: &dyn PersistenceGateway,
    clock: Arc<dyn Clock>,
) -> StartupLedger {
    for (source, gateway) in [(LoadSource::Primary, primary), (LoadSource::Sample, sample)] {
        match gateway.load() {
            Ok(Some(snapshot)) => {
                info!(
                    %source,
                    transactions = snapshot.transactions.len(),
                    "ledger loaded"
                );
                return StartupLedger {
                    ledger: snapshot.into_ledger(Arc::clone(&clock)),
                    source,
                };
            }
            Ok(None) => info!(%source, "nothing stored; trying next source"),
            Err(err) => warn!(%source, error = %err, "failed to load ledger; trying next source"),
        }
    }

    info!("starting with an empty ledger");
    StartupLedger {
        ledger: LedgerSnapshot::default().into_ledger(clock),
        source: LoadSource::Default,
    }
}

/// Writes `ledger` through `gateway` and clears its dirty flag on success.
pub fn save_ledger(gateway: &dyn PersistenceGateway, ledger: &mut Ledger) -> Result<(), SaveError> {
    gateway.save(&LedgerSnapshot::from(&*ledger))?;
    ledger.mark_saved();
    Ok(())
}
