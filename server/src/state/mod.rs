pub(crate) mod agent_record;
pub(crate) mod life_state;
pub(crate) mod state_tracker;
