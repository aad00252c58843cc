pub mod activity;
pub mod bills;
pub mod calendar;
pub mod config;
pub mod expand;
pub mod goals;
pub mod period;
pub mod plan;
pub mod system;

use crate::cli::registry::CommandRegistry;

/// Period arguments shared by the listing commands.
pub(crate) const PERIOD_USAGE: &str =
    "period: today | this-week | last-week | this-month | last-month | month <YYYY-MM> | custom <from> <to>";

pub fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        period::definitions(),
        activity::definitions(),
        calendar::definitions(),
        bills::definitions(),
        expand::definitions(),
        plan::definitions(),
        goals::definitions(),
        config::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
