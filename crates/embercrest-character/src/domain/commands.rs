//! Commands for the Character context.

use embercrest_content::domain::attributes::PrimaryStats;
use uuid::Uuid;

/// Command to spend unspent attribute points.
#[derive(Debug, Clone)]
pub struct AllocateAttributes {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The character identifier.
    pub character_id: Uuid,
    /// Points to add to each attribute.
    pub allocation: PrimaryStats,
}
