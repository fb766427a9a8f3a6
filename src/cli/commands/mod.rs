mod account;
mod init;
mod interactions;
mod reference;
mod report;
mod users;

pub use account::{cmd_forgot_password, cmd_passwd, cmd_register};
pub use init::cmd_init;
pub use interactions::{
    cmd_interaction_edit, cmd_interaction_remove, cmd_interactions_clear, cmd_interactions_list,
    cmd_interactions_reset, cmd_log,
};
pub use reference::cmd_reference;
pub use report::{
    cmd_analysis, cmd_export_analysis, cmd_export_collaborators, cmd_export_report, cmd_report,
};
pub use users::{
    cmd_user_approve, cmd_user_delete, cmd_user_reject, cmd_user_reset_password,
    cmd_user_toggle_admin, cmd_user_update, cmd_users_list,
};

use chrono::{DateTime, Local, Utc};

/// Desk-local `dd/mm/YYYY HH:MM`.
fn local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}
