// Application state for HTTP handlers
use crate::application::dashboard_refresher::DashboardRefresher;
use crate::application::tile_container::TileContainer;
use crate::application::view_switcher::ViewSwitcher;
use crate::domain::view::ViewId;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub refresher: Arc<DashboardRefresher>,
    pub container: Arc<dyn TileContainer>,
    pub switcher: Arc<Mutex<ViewSwitcher>>,
    /// View whose region holds the tile container
    pub host_view: ViewId,
    /// Page reload period, kept in step with the refresh interval
    pub reload_every: Duration,
}
