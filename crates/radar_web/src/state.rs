use radar_core::{DashboardConfig, DataStoreReader};

pub struct AppState {
    pub reader: DataStoreReader,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            reader: DataStoreReader::from_config(config),
        }
    }
}
