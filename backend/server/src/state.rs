use std::sync::Arc;

use roster::{RosterError, RosterStore};
use tokio::sync::Mutex;

use super::{
    activity::ActivityLabel, checkin::Ledger, config::Config, counter::DailyCounter,
    mode::ModeFlag,
};

pub struct State {
    pub config: Config,
    pub ledger: Mutex<Ledger>,
    pub daily: Arc<DailyCounter>,
    pub mode: ModeFlag,
    pub activity: Mutex<ActivityLabel>,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, RosterError> {
        let store = RosterStore::open(&config.roster_path)?;
        let activity = ActivityLabel::open(&config.activity_path, &config.default_activity)?;

        Ok(Arc::new(Self {
            ledger: Mutex::new(Ledger::new(store, config.time_zone)),
            daily: Arc::new(DailyCounter::default()),
            mode: ModeFlag::new(config.demo_mode),
            activity: Mutex::new(activity),
            config,
        }))
    }
}
