use std::sync::Arc;

use ferrite_digit::{Network, NetworkParameters, Result};

/// Everything request handlers need. Built once, never mutated.
#[derive(Debug)]
pub struct AppState {
    pub network: Network,
    pub hidden: (usize, usize),
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(params: &NetworkParameters) -> Result<AppState> {
        Ok(AppState {
            network: Network::from_parameters(params)?,
            hidden: params.hidden_sizes(),
        })
    }
}
