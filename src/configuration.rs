use crate::slots::{DurationLimits, SlotGridConfig};

pub trait Configuration: Clone + Send + Sync + 'static {
    fn admin_password(&self) -> String;
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    fn slot_grid(&self) -> SlotGridConfig;
    fn duration_limits(&self) -> DurationLimits;
}
