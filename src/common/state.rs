// Application state shared across all modules

use std::sync::Arc;

use crate::comments::services::CommentsService;
use crate::matches::facade::MatchDetailFacade;
use crate::matches::services::MatchCommandService;
use crate::scheduling::services::SchedulingService;

/// Application state containing the shared services
#[derive(Clone)]
pub struct AppState {
    pub facade: Arc<MatchDetailFacade>,
    pub commands: Arc<MatchCommandService>,
    pub comments: Arc<CommentsService>,
    pub scheduling: Arc<SchedulingService>,
}
