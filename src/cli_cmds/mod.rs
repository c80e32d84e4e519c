mod index_cmds;
mod match_cmds;

pub use index_cmds::{cmd_list, cmd_update};
pub use match_cmds::{cmd_apply, cmd_color, cmd_preview};
