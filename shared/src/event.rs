use serde::{Deserialize, Serialize};

use crate::capabilities::FetchResult;
use crate::config::FeedConfig;
use crate::model::{RequestEpoch, StationId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // --- Lifecycle ---
    ViewMounted,
    ViewUnmounted,
    FeedConfigured { config: FeedConfig },

    // --- User intents ---
    FilterChanged { value: String },
    FilterCleared,
    StationSelected { id: StationId },
    RetryRequested,

    // --- Internal ---
    #[serde(skip)]
    StationsLoaded {
        epoch: RequestEpoch,
        outcome: FetchResult,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewMounted => "view_mounted",
            Self::ViewUnmounted => "view_unmounted",
            Self::FeedConfigured { .. } => "feed_configured",
            Self::FilterChanged { .. } => "filter_changed",
            Self::FilterCleared => "filter_cleared",
            Self::StationSelected { .. } => "station_selected",
            Self::RetryRequested => "retry_requested",
            Self::StationsLoaded { .. } => "stations_loaded",
        }
    }

    pub fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::FilterChanged { .. }
                | Self::FilterCleared
                | Self::StationSelected { .. }
                | Self::RetryRequested
        )
    }
}
